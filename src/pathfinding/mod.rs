//! Path extraction from a propagated potential field.
//!
//! Tracing descends the potential surface from the start toward the goal:
//!
//! - [`GradientField`] lazily computes and caches per-cell unit gradients
//!   of the potential.
//! - [`GradientTracer`] follows the bilinearly interpolated gradient in
//!   sub-cell steps, falling back to direct grid following next to
//!   unreached cells and when the trace starts oscillating.

mod gradient;
mod tracer;

pub use gradient::GradientField;
pub use tracer::{GradientTracer, TraceStats};
