//! Cost grid storage and ingestion.
//!
//! The planner consumes per-cell traversal costs in the `0..=255` range.
//! [`CostGrid`] owns the prepared cost array: incoming values are remapped
//! onto the internal scale at ingestion (see [`CostGrid::load`]) and the
//! outer one-cell frame is sealed lethal so that four-neighbour index
//! arithmetic inside the grid never needs bounds checks.

mod cost_grid;

pub mod costs;

pub use cost_grid::CostGrid;
