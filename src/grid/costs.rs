//! Cost scale constants for the navigation grid.
//!
//! Incoming maps use `0..=252` for traversable cost, `253` for inscribed
//! obstacles, `254` for lethal obstacles and `255` for unknown space.
//! Internally everything traversable is remapped to
//! `NEUTRAL..=OBSTACLE - 1` so the potential update always pays at least
//! one neutral step per cell.

/// Cost of a perfectly free cell after remapping. Also the goal-proximity
/// threshold used by the path tracer: one neutral step from the goal.
pub const NEUTRAL: u8 = 50;

/// Scale factor applied to incoming traversable cost values.
pub const FACTOR: f32 = 0.8;

/// Lethal obstacle. Cells at or above this never receive a potential.
pub const OBSTACLE: u8 = 254;

/// Inscribed (inflated) obstacle in the external cost scale.
pub const INSCRIBED_EXT: u8 = 253;

/// Unknown space in the external cost scale.
pub const UNKNOWN_EXT: u8 = 255;

/// Width of the frame forced lethal when ingesting raw monochrome images.
pub const RAW_IMAGE_BORDER: usize = 7;
