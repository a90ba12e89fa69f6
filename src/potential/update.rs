//! Per-cell potential updates.
//!
//! Both variants compute the same planar-wave potential from the two lowest
//! axis neighbours; they differ only in the priority used to place relaxed
//! neighbours into buckets. No bounds checks here: every cell handed to an
//! updater is traversable, and traversable cells are interior because the
//! border frame is sealed lethal.

use crate::core::GridCoord;
use crate::grid::{costs, CostGrid};

use super::buckets::{BucketKind, PriorityBuckets};
use super::field::PotentialField;

const INVSQRT2: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Quadratic approximation to the two-neighbour eikonal solution
/// `(1 + sqrt(2 - d^2)) / 2`, accurate to about 0.003 on the unit interval.
#[inline]
pub(crate) fn interpolation_factor(d: f32) -> f32 {
    -0.2301 * d * d + 0.5307 * d + 0.7040
}

/// Planar-wave potential for cell `n` from its four axis neighbours, or
/// `None` when `n` is lethal and must not carry potential.
#[inline]
fn planar_wave(grid: &CostGrid, field: &PotentialField, n: usize) -> Option<f32> {
    if !grid.is_traversable(n) {
        return None;
    }
    let w = grid.width();

    let l = field.get(n - 1);
    let r = field.get(n + 1);
    let u = field.get(n - w);
    let d = field.get(n + w);

    // lowest per axis, then the lower of the two
    let tc = l.min(r);
    let mut ta = u.min(d);
    let mut dc = tc - ta;
    if dc < 0.0 {
        dc = -dc;
        ta = tc;
    }

    let hf = grid.cost(n) as f32;
    let pot = if dc >= hf {
        // wavefront nearly parallel to an axis: single-neighbour update
        ta + hf
    } else {
        ta + hf * interpolation_factor(dc / hf)
    };
    Some(pot)
}

/// Write the relaxed potential and enqueue any neighbour that could improve
/// from it. `priority` is the value compared against the bucket threshold
/// (the raw potential for Dijkstra, heuristic-biased for A*).
#[inline]
fn relax(
    grid: &CostGrid,
    field: &mut PotentialField,
    buckets: &mut PriorityBuckets,
    n: usize,
    pot: f32,
    priority: f32,
) {
    let w = grid.width();
    field.set(n, pot);

    let kind = if priority < buckets.threshold() {
        BucketKind::Next
    } else {
        BucketKind::Overflow
    };

    // A neighbour is worth revisiting when its potential exceeds what it
    // could reach through n, estimated with the diagonally scaled edge cost.
    for m in [n - 1, n + 1, n - w, n + w] {
        let edge = INVSQRT2 * grid.cost(m) as f32;
        if field.get(m) > priority + edge && grid.is_traversable(m) {
            buckets.push(kind, m);
        }
    }
}

/// Dijkstra update: relax cell `n` and enqueue improvable neighbours by raw
/// potential.
pub fn update_cell(grid: &CostGrid, field: &mut PotentialField, buckets: &mut PriorityBuckets, n: usize) {
    if let Some(pot) = planar_wave(grid, field, n) {
        if pot < field.get(n) {
            relax(grid, field, buckets, n, pot, pot);
        }
    }
}

/// A* update: identical relaxation, but scheduling priority is biased by the
/// Euclidean distance to the start. The stored potential stays un-biased so
/// the field keeps meaning cost-to-goal.
pub fn update_cell_astar(
    grid: &CostGrid,
    field: &mut PotentialField,
    buckets: &mut PriorityBuckets,
    n: usize,
    start: GridCoord,
) {
    if let Some(pot) = planar_wave(grid, field, n) {
        if pot < field.get(n) {
            let dist = grid.coord(n).euclidean_distance(&start) * costs::NEUTRAL as f32;
            relax(grid, field, buckets, n, pot, pot + dist);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::potential::field::POT_HIGH;

    fn setup(w: usize, h: usize) -> (CostGrid, PotentialField, PriorityBuckets) {
        let grid = CostGrid::new(w, h);
        let field = PotentialField::new(w, h);
        let mut buckets = PriorityBuckets::new(w * h, 100, 100.0);
        buckets.reset(costs::OBSTACLE as f32);
        (grid, field, buckets)
    }

    #[test]
    fn test_interpolation_factor_endpoints() {
        assert!((interpolation_factor(0.0) - 0.7040).abs() < 1e-6);
        assert!((interpolation_factor(1.0) - 1.0046).abs() < 1e-6);
    }

    #[test]
    fn test_perpendicular_wavefront_single_neighbour() {
        // only the upper neighbour is reached: pot = ta + hf
        let (grid, mut field, mut buckets) = setup(5, 5);
        let n = field.index(crate::core::GridCoord::new(2, 2));
        field.set(n - 5, 100.0);
        update_cell(&grid, &mut field, &mut buckets, n);
        assert!((field.get(n) - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_aligned_wavefront_quadratic() {
        // both axis minima equal: d = 0, pot = ta + 0.704 * hf
        let (grid, mut field, mut buckets) = setup(5, 5);
        let n = field.index(crate::core::GridCoord::new(2, 2));
        field.set(n - 5, 100.0);
        field.set(n - 1, 100.0);
        update_cell(&grid, &mut field, &mut buckets, n);
        assert!((field.get(n) - (100.0 + 0.704 * 50.0)).abs() < 1e-2);
    }

    #[test]
    fn test_no_write_into_obstacle() {
        let (mut grid, mut field, mut buckets) = setup(5, 5);
        let c = crate::core::GridCoord::new(2, 2);
        grid.set_cost(c, costs::OBSTACLE);
        let n = field.index(c);
        field.set(n - 5, 0.0);
        update_cell(&grid, &mut field, &mut buckets, n);
        assert_eq!(field.get(n), POT_HIGH);
    }

    #[test]
    fn test_relaxation_never_raises() {
        let (grid, mut field, mut buckets) = setup(5, 5);
        let n = field.index(crate::core::GridCoord::new(2, 2));
        field.set(n, 10.0);
        field.set(n - 5, 100.0);
        // planar wave would give 150, worse than the current 10
        update_cell(&grid, &mut field, &mut buckets, n);
        assert_eq!(field.get(n), 10.0);
    }

    #[test]
    fn test_improvable_neighbours_enqueued() {
        let (grid, mut field, mut buckets) = setup(5, 5);
        let n = field.index(crate::core::GridCoord::new(2, 2));
        field.set(n - 5, 0.0);
        update_cell(&grid, &mut field, &mut buckets, n);
        // pot(n) = 50, below the threshold of 254: unreached neighbours of n
        // land in the next bucket
        assert!(buckets.is_pending(n - 1));
        assert!(buckets.is_pending(n + 1));
        assert!(buckets.is_pending(n + 5));
        // the source neighbour is already lower than pot + edge
        assert!(!buckets.is_pending(n - 5));
    }

    #[test]
    fn test_astar_bias_changes_bucket_not_value() {
        let (grid, mut field, mut buckets) = setup(7, 7);
        let n = field.index(crate::core::GridCoord::new(3, 3));
        field.set(n - 7, 0.0);
        // start far away: bias pushes scheduling above the threshold
        let start = crate::core::GridCoord::new(6, 6);
        update_cell_astar(&grid, &mut field, &mut buckets, n, start);
        assert!((field.get(n) - 50.0).abs() < 1e-3);
        assert!(buckets.is_pending(n + 1));
    }
}
