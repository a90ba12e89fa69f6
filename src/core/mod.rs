//! Shared coordinate types for the planner.

mod point;

pub use point::{GridCoord, PathPoint};
