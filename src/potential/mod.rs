//! Potential field propagation.
//!
//! The navigation function is a scalar potential over grid cells whose value
//! at a cell estimates the minimum accumulated traversal cost from that cell
//! to the goal. Propagation runs a wavefront outward from the goal:
//!
//! - [`PotentialField`] holds the per-cell estimates.
//! - [`PriorityBuckets`] approximates best-first ordering with three index
//!   buffers and a rising threshold instead of a general heap.
//! - [`update`] computes a cell's new potential from its four axis
//!   neighbours with a quadratic two-neighbour interpolation, in a plain
//!   Dijkstra variant and an A* variant that biases scheduling toward the
//!   start.
//! - [`propagate`] drives the buckets until the cycle budget runs out, the
//!   queues drain, or the start cell is reached.

mod buckets;
mod field;

pub mod propagate;
pub mod update;

pub use buckets::{BucketKind, PriorityBuckets, DEFAULT_BUCKET_CAPACITY};
pub use field::{PotentialField, POT_HIGH};
pub use propagate::{propagate_astar, propagate_dijkstra, PropagationStats};
