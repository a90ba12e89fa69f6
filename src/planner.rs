//! Planner facade owning all propagation and tracing buffers.

use log::debug;

use crate::config::PlannerSettings;
use crate::core::{GridCoord, PathPoint};
use crate::error::{PlanFailure, PlanResult};
use crate::grid::{costs, CostGrid};
use crate::pathfinding::{GradientField, GradientTracer, TraceStats};
use crate::potential::{
    propagate_astar, propagate_dijkstra, BucketKind, PotentialField, PriorityBuckets,
    PropagationStats, POT_HIGH,
};

/// Navigation-function planner over a fixed-size cost grid.
///
/// A planner instance owns every buffer it needs: the prepared cost grid,
/// the potential field, the bucket scheduler, the gradient cache and the
/// path storage. Re-planning on new costs or endpoints reuses the buffers;
/// [`PotentialPlanner::resize`] reallocates them. Instances are independent,
/// so concurrent planning means one planner per thread.
///
/// ```rust,ignore
/// use kshetra_nav::{GridCoord, PotentialPlanner};
///
/// let mut planner = PotentialPlanner::new(120, 80);
/// planner.set_cost_map(&cells, true, true)?;
/// planner.set_goal(GridCoord::new(100, 40));
/// planner.set_start(GridCoord::new(10, 40));
/// let path = planner.plan_astar()?;
/// ```
#[derive(Clone, Debug)]
pub struct PotentialPlanner {
    grid: CostGrid,
    field: PotentialField,
    buckets: PriorityBuckets,
    gradients: GradientField,
    tracer: GradientTracer,
    settings: PlannerSettings,
    goal: GridCoord,
    start: GridCoord,
    last_path_cost: f32,
    last_propagation: PropagationStats,
}

impl PotentialPlanner {
    /// Create a planner for a `width` x `height` grid with default settings.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_settings(width, height, PlannerSettings::default())
    }

    /// Create a planner with explicit settings.
    pub fn with_settings(width: usize, height: usize, settings: PlannerSettings) -> Self {
        Self {
            grid: CostGrid::new(width, height),
            field: PotentialField::new(width, height),
            buckets: PriorityBuckets::new(
                width * height,
                settings.bucket_capacity,
                settings.priority_increment,
            ),
            gradients: GradientField::new(width, height),
            tracer: GradientTracer::new(settings.path_step),
            settings,
            goal: GridCoord::default(),
            start: GridCoord::default(),
            last_path_cost: POT_HIGH,
            last_propagation: PropagationStats::default(),
        }
    }

    /// Reallocate every buffer for new grid dimensions.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.grid.resize(width, height);
        self.field.resize(width, height);
        self.buckets.resize(width * height);
        self.gradients.resize(width, height);
    }

    /// Ingest a foreign cost map; see [`CostGrid::load`].
    pub fn set_cost_map(&mut self, src: &[u8], structured: bool, allow_unknown: bool) -> PlanResult<()> {
        self.grid.load(src, structured, allow_unknown)
    }

    /// Record the goal cell. The potential field gives cost to reach this
    /// cell, so it is the wavefront origin.
    pub fn set_goal(&mut self, goal: GridCoord) {
        debug!("[Planner] goal set to ({}, {})", goal.x, goal.y);
        self.goal = goal;
    }

    /// Record the start cell.
    pub fn set_start(&mut self, start: GridCoord) {
        debug!("[Planner] start set to ({}, {})", start.x, start.y);
        self.start = start;
    }

    /// Goal cell
    #[inline]
    pub fn goal(&self) -> GridCoord {
        self.goal
    }

    /// Start cell
    #[inline]
    pub fn start(&self) -> GridCoord {
        self.start
    }

    /// Prepared cost grid
    #[inline]
    pub fn cost_grid(&self) -> &CostGrid {
        &self.grid
    }

    /// Potential field of the last propagation
    #[inline]
    pub fn potential(&self) -> &PotentialField {
        &self.field
    }

    /// Waypoints recorded by the last trace, sub-cell, in cell units.
    /// A failed trace leaves its partial polyline here.
    #[inline]
    pub fn path(&self) -> &[PathPoint] {
        self.tracer.path()
    }

    /// Trace counters of the last planning attempt
    #[inline]
    pub fn trace_stats(&self) -> &TraceStats {
        self.tracer.stats()
    }

    /// Propagation counters of the last planning attempt
    #[inline]
    pub fn propagation_stats(&self) -> &PropagationStats {
        &self.last_propagation
    }

    /// Potential at the start cell as of the last A* termination.
    #[inline]
    pub fn last_path_cost(&self) -> f32 {
        self.last_path_cost
    }

    /// Plan with breadth-first wavefront propagation.
    ///
    /// With `stop_at_start` the propagation halts as soon as the start cell
    /// receives a potential; otherwise it runs until the cycle budget or
    /// queue exhaustion, which yields a fully converged field.
    pub fn plan_dijkstra(&mut self, stop_at_start: bool) -> PlanResult<&[PathPoint]> {
        self.prepare()?;

        let cycles = self.cycle_budget();
        self.last_propagation = propagate_dijkstra(
            &self.grid,
            &mut self.field,
            &mut self.buckets,
            self.start,
            cycles,
            stop_at_start,
        );

        if !self.field.is_reached(self.grid.index(self.start)) {
            debug!("[Planner] start cell never reached, goal unreachable");
            return Err(PlanFailure::Unreachable);
        }

        let max_steps = self.grid.len() / 2;
        self.tracer
            .trace(&self.field, &mut self.gradients, self.start, self.goal, max_steps)?;
        debug!("[Planner] dijkstra path found, {} waypoints", self.tracer.path().len());
        Ok(self.tracer.path())
    }

    /// Plan with start-biased best-first propagation.
    ///
    /// The potential field stays a true cost-to-goal; the Euclidean
    /// heuristic only steers which cells expand first.
    pub fn plan_astar(&mut self) -> PlanResult<&[PathPoint]> {
        self.prepare()?;

        // admit the heuristic-optimal corridor into the first bucket
        let heuristic = self.goal.euclidean_distance(&self.start) * costs::NEUTRAL as f32;
        self.buckets.raise_threshold(heuristic);

        let cycles = self.cycle_budget();
        self.last_propagation = propagate_astar(
            &self.grid,
            &mut self.field,
            &mut self.buckets,
            self.start,
            cycles,
        );

        let start_idx = self.grid.index(self.start);
        self.last_path_cost = self.field.get(start_idx);
        if !self.field.is_reached(start_idx) {
            debug!("[Planner] start cell never reached, goal unreachable");
            return Err(PlanFailure::Unreachable);
        }

        let max_steps = 4 * self.grid.width();
        self.tracer
            .trace(&self.field, &mut self.gradients, self.start, self.goal, max_steps)?;
        debug!("[Planner] astar path found, {} waypoints", self.tracer.path().len());
        Ok(self.tracer.path())
    }

    /// Reset all propagation state and seed the goal.
    fn prepare(&mut self) -> PlanResult<()> {
        if !self.grid.contains(self.goal) || !self.grid.contains(self.start) {
            return Err(PlanFailure::OutOfBounds);
        }

        self.field.reset();
        self.gradients.reset();
        self.grid.seal_border();
        self.buckets.reset(costs::OBSTACLE as f32);

        let goal_idx = self.grid.index(self.goal);
        self.seed(goal_idx, 0.0);

        let nobs = self.grid.count_lethal();
        debug!(
            "[Planner] prepared {}x{} grid, {} lethal cells",
            self.grid.width(),
            self.grid.height(),
            nobs
        );
        Ok(())
    }

    /// Assign a potential to one cell and queue its axis neighbours for
    /// expansion.
    fn seed(&mut self, k: usize, value: f32) {
        self.field.set(k, value);

        let w = self.grid.width() as i64;
        let ns = self.grid.len() as i64;
        for off in [-1, 1, -w, w] {
            let m = k as i64 + off;
            if m >= 0 && m < ns && self.grid.is_traversable(m as usize) {
                self.buckets.push(BucketKind::Current, m as usize);
            }
        }
    }

    /// Cycle budget scaling with grid size.
    #[inline]
    fn cycle_budget(&self) -> usize {
        (self.grid.len() / 20).max(self.grid.width() + self.grid.height())
    }
}

/// One-shot A* plan over a borrowed cost map.
///
/// Allocates a fresh planner per call; callers planning repeatedly on the
/// same dimensions should hold a [`PotentialPlanner`] instead and reuse its
/// buffers.
pub fn plan_astar_once(
    src: &[u8],
    width: usize,
    height: usize,
    goal: GridCoord,
    start: GridCoord,
) -> PlanResult<Vec<PathPoint>> {
    let mut planner = PotentialPlanner::new(width, height);
    planner.set_cost_map(src, true, true)?;
    planner.set_goal(goal);
    planner.set_start(start);
    planner.plan_astar().map(|path| path.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_out_of_bounds_goal() {
        let mut planner = PotentialPlanner::new(20, 20);
        planner.set_goal(GridCoord::new(25, 10));
        planner.set_start(GridCoord::new(5, 10));
        assert_eq!(planner.plan_dijkstra(false), Err(PlanFailure::OutOfBounds));
    }

    #[test]
    fn test_plan_open_grid() {
        let mut planner = PotentialPlanner::new(20, 20);
        planner.set_goal(GridCoord::new(15, 15));
        planner.set_start(GridCoord::new(3, 3));
        let path = planner.plan_dijkstra(false).unwrap();
        assert!(path.len() >= 2);
        let last = *path.last().unwrap();
        assert_eq!((last.x, last.y), (15.0, 15.0));
    }

    #[test]
    fn test_replan_reuses_buffers() {
        let mut planner = PotentialPlanner::new(20, 20);
        planner.set_goal(GridCoord::new(15, 15));
        planner.set_start(GridCoord::new(3, 3));
        planner.plan_astar().unwrap();
        let first_cost = planner.last_path_cost();

        // same problem again: same cost, fresh field
        planner.plan_astar().unwrap();
        assert_eq!(planner.last_path_cost(), first_cost);
    }

    #[test]
    fn test_plan_astar_once_wrapper() {
        let src = vec![0u8; 30 * 30];
        let path = plan_astar_once(
            &src,
            30,
            30,
            GridCoord::new(25, 25),
            GridCoord::new(4, 4),
        )
        .unwrap();
        assert!(!path.is_empty());
    }

    #[test]
    fn test_resize_reallocates() {
        let mut planner = PotentialPlanner::new(10, 10);
        planner.resize(40, 30);
        assert_eq!(planner.cost_grid().width(), 40);
        assert_eq!(planner.cost_grid().height(), 30);
        planner.set_goal(GridCoord::new(35, 25));
        planner.set_start(GridCoord::new(2, 2));
        assert!(planner.plan_dijkstra(false).is_ok());
    }
}
