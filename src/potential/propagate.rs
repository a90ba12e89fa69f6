//! Wavefront propagation drivers.

use log::debug;

use crate::core::GridCoord;
use crate::grid::CostGrid;

use super::buckets::PriorityBuckets;
use super::field::PotentialField;
use super::update;

/// Counters gathered while a propagation runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Cycles executed before termination
    pub cycles: usize,
    /// Total cells drained from the current bucket
    pub cells_processed: usize,
    /// Largest single-cycle bucket fill observed
    pub max_bucket_fill: usize,
    /// Threshold advances (overflow graduations)
    pub threshold_advances: usize,
}

/// Breadth-first (Dijkstra) propagation from the seeded goal.
///
/// Runs up to `cycles` bucket cycles, stopping early when the queues drain
/// or, with `stop_at_start`, as soon as the start cell receives a finite
/// potential.
pub fn propagate_dijkstra(
    grid: &CostGrid,
    field: &mut PotentialField,
    buckets: &mut PriorityBuckets,
    start: GridCoord,
    cycles: usize,
    stop_at_start: bool,
) -> PropagationStats {
    let start_idx = grid.index(start);
    let mut stats = PropagationStats::default();

    while stats.cycles < cycles {
        if buckets.is_exhausted() {
            break;
        }
        stats.cycles += 1;

        let batch = buckets.begin_cycle();
        stats.cells_processed += batch.len();
        stats.max_bucket_fill = stats.max_bucket_fill.max(batch.len());

        for &n in &batch {
            update::update_cell(grid, field, buckets, n);
        }
        if buckets.end_cycle(batch) {
            stats.threshold_advances += 1;
        }

        if stop_at_start && field.is_reached(start_idx) {
            break;
        }
    }

    debug!(
        "[Propagate] dijkstra: {} cycles, {} cells, max bucket {}, {} threshold advances",
        stats.cycles, stats.cells_processed, stats.max_bucket_fill, stats.threshold_advances
    );
    stats
}

/// Best-first (A*) propagation from the seeded goal.
///
/// Scheduling is biased toward the start by the Euclidean heuristic inside
/// the updater; the loop always stops once the start cell is reached.
/// Callers pre-seed the bucket threshold with the goal-to-start heuristic.
pub fn propagate_astar(
    grid: &CostGrid,
    field: &mut PotentialField,
    buckets: &mut PriorityBuckets,
    start: GridCoord,
    cycles: usize,
) -> PropagationStats {
    let start_idx = grid.index(start);
    let mut stats = PropagationStats::default();

    while stats.cycles < cycles {
        if buckets.is_exhausted() {
            break;
        }
        stats.cycles += 1;

        let batch = buckets.begin_cycle();
        stats.cells_processed += batch.len();
        stats.max_bucket_fill = stats.max_bucket_fill.max(batch.len());

        for &n in &batch {
            update::update_cell_astar(grid, field, buckets, n, start);
        }
        if buckets.end_cycle(batch) {
            stats.threshold_advances += 1;
        }

        if field.is_reached(start_idx) {
            break;
        }
    }

    debug!(
        "[Propagate] astar: {} cycles, {} cells, max bucket {}, {} threshold advances",
        stats.cycles, stats.cells_processed, stats.max_bucket_fill, stats.threshold_advances
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::costs;
    use crate::potential::buckets::BucketKind;
    use crate::potential::field::POT_HIGH;

    fn seed_goal(grid: &CostGrid, field: &mut PotentialField, buckets: &mut PriorityBuckets, goal: GridCoord) {
        let k = grid.index(goal);
        field.set(k, 0.0);
        let w = grid.width();
        for m in [k - 1, k + 1, k - w, k + w] {
            if grid.is_traversable(m) {
                buckets.push(BucketKind::Current, m);
            }
        }
    }

    fn open_world(w: usize, h: usize) -> (CostGrid, PotentialField, PriorityBuckets) {
        let grid = CostGrid::new(w, h);
        let field = PotentialField::new(w, h);
        let mut buckets = PriorityBuckets::new(w * h, 10_000, 2.0 * costs::NEUTRAL as f32);
        buckets.reset(costs::OBSTACLE as f32);
        (grid, field, buckets)
    }

    #[test]
    fn test_dijkstra_reaches_start() {
        let (grid, mut field, mut buckets) = open_world(20, 20);
        let goal = GridCoord::new(10, 10);
        let start = GridCoord::new(2, 2);
        seed_goal(&grid, &mut field, &mut buckets, goal);

        let stats = propagate_dijkstra(&grid, &mut field, &mut buckets, start, 400, false);
        assert!(stats.cells_processed > 0);
        assert!(field.is_reached(grid.index(start)));
        assert_eq!(field.get(grid.index(goal)), 0.0);
    }

    #[test]
    fn test_goal_keeps_zero_potential() {
        let (grid, mut field, mut buckets) = open_world(16, 16);
        let goal = GridCoord::new(8, 8);
        seed_goal(&grid, &mut field, &mut buckets, goal);
        propagate_dijkstra(&grid, &mut field, &mut buckets, GridCoord::new(2, 2), 400, false);
        assert_eq!(field.get(grid.index(goal)), 0.0);
    }

    #[test]
    fn test_no_potential_in_obstacles() {
        let (mut grid, mut field, mut buckets) = open_world(16, 16);
        for y in 2..14 {
            grid.set_cost(GridCoord::new(7, y), costs::OBSTACLE);
        }
        let goal = GridCoord::new(12, 8);
        seed_goal(&grid, &mut field, &mut buckets, goal);
        propagate_dijkstra(&grid, &mut field, &mut buckets, GridCoord::new(2, 8), 400, false);

        for y in 2..14 {
            let idx = grid.index(GridCoord::new(7, y));
            assert_eq!(field.get(idx), POT_HIGH);
        }
    }

    #[test]
    fn test_walled_goal_exhausts_queues() {
        let (mut grid, mut field, mut buckets) = open_world(16, 16);
        let goal = GridCoord::new(8, 8);
        for c in goal.neighbors_4() {
            grid.set_cost(c, costs::OBSTACLE);
        }
        grid.set_cost(GridCoord::new(7, 7), costs::OBSTACLE);
        grid.set_cost(GridCoord::new(9, 7), costs::OBSTACLE);
        grid.set_cost(GridCoord::new(7, 9), costs::OBSTACLE);
        grid.set_cost(GridCoord::new(9, 9), costs::OBSTACLE);

        let start = GridCoord::new(2, 2);
        seed_goal(&grid, &mut field, &mut buckets, goal);
        let stats = propagate_dijkstra(&grid, &mut field, &mut buckets, start, 400, false);

        assert_eq!(stats.cells_processed, 0);
        assert!(!field.is_reached(grid.index(start)));
    }

    #[test]
    fn test_astar_stops_at_start() {
        let (grid, mut field, mut buckets) = open_world(30, 30);
        let goal = GridCoord::new(25, 25);
        let start = GridCoord::new(4, 4);
        buckets.raise_threshold(goal.euclidean_distance(&start) * costs::NEUTRAL as f32);
        seed_goal(&grid, &mut field, &mut buckets, goal);

        propagate_astar(&grid, &mut field, &mut buckets, start, 2000);
        assert!(field.is_reached(grid.index(start)));
    }

    #[test]
    fn test_potential_grows_with_distance() {
        let (grid, mut field, mut buckets) = open_world(20, 20);
        let goal = GridCoord::new(10, 10);
        seed_goal(&grid, &mut field, &mut buckets, goal);
        propagate_dijkstra(&grid, &mut field, &mut buckets, GridCoord::new(1, 1), 400, false);

        let near = field.get(grid.index(GridCoord::new(11, 10)));
        let far = field.get(grid.index(GridCoord::new(15, 10)));
        assert!(near < far);
        assert!(near >= 0.0);
    }
}
