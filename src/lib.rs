//! # KshetraNav
//!
//! 2D grid navigation-function planner for mobile robots.
//!
//! ## Overview
//!
//! Given a rectangular cost grid, a goal cell and a start cell, the planner
//! computes a scalar potential field giving the cost-to-goal of every
//! traversable cell, then extracts a smooth sub-cell path from start to
//! goal by gradient descent on that field:
//!
//! - **Wavefront propagation**: a quadratic two-neighbour interpolation
//!   (a discrete eikonal solver) updates each cell from its axis
//!   neighbours, scheduled through three priority buckets instead of a
//!   heap, either plain breadth-first (Dijkstra) or biased toward the
//!   start (A*).
//! - **Gradient tracing**: bilinear interpolation over cached per-cell unit
//!   gradients walks downhill in half-cell steps, with grid-following
//!   recovery next to unreached cells and on oscillation.
//!
//! The interpolated update trades exact shortest paths for a smooth
//! wavefront that gradient descent can follow.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kshetra_nav::{GridCoord, PotentialPlanner};
//!
//! let mut planner = PotentialPlanner::new(200, 200);
//! planner.set_cost_map(&cells, true, true)?;
//! planner.set_goal(GridCoord::new(150, 120));
//! planner.set_start(GridCoord::new(20, 30));
//!
//! let path = planner.plan_astar()?;
//! println!("{} waypoints, cost {}", path.len(), planner.last_path_cost());
//! ```
//!
//! ## Coordinate System
//!
//! Grid frame: x increases rightward, y increases downward, origin at cell
//! (0, 0). Path waypoints are sub-cell positions in the same frame, in
//! cell units.

#![warn(missing_docs)]

// Shared coordinate types
pub mod core;

// Cost grid storage and ingestion
pub mod grid;

// Potential propagation: field, bucket scheduler, cell updates
pub mod potential;

// Gradient computation and path tracing
pub mod pathfinding;

// Planner facade
pub mod planner;

// Configuration
pub mod config;

// Error types
pub mod error;

// Debug map persistence
pub mod io;

pub use crate::core::{GridCoord, PathPoint};

pub use config::{ConfigLoadError, NavConfig, PlannerSettings};

pub use error::{PlanFailure, PlanResult};

pub use grid::{costs, CostGrid};

pub use pathfinding::{GradientField, GradientTracer, TraceStats};

pub use planner::{plan_astar_once, PotentialPlanner};

pub use potential::{PotentialField, PriorityBuckets, PropagationStats, POT_HIGH};
