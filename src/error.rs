//! Error types for kshetra-nav.

use thiserror::Error;

/// Reasons a planning attempt can fail.
///
/// Planning never panics on bad inputs or unreachable goals; every failure
/// mode is surfaced through this enum.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFailure {
    /// Propagation finished without assigning the start cell a finite
    /// potential: the goal is walled off, or the cycle budget ran out first.
    #[error("goal unreachable from start")]
    Unreachable,

    /// The path tracer walked into the sealed border frame.
    #[error("path ran into the sealed grid border")]
    BorderReached,

    /// The tracer found a zero gradient away from the goal (flat plateau or
    /// isolated potential well).
    #[error("zero gradient at a non-goal cell")]
    ZeroGradient,

    /// The 3x3 recovery window's minimum was itself an unreached cell.
    #[error("surrounded by unreached potential, no recovery cell")]
    HighPotentialTrap,

    /// The tracer exhausted its step budget before nearing the goal.
    #[error("path step budget exhausted")]
    StepBudgetExhausted,

    /// Goal or start lies outside the grid, or a supplied cost map does not
    /// match the planner dimensions.
    #[error("coordinates or map size out of bounds")]
    OutOfBounds,
}

/// Convenience alias for planning results.
pub type PlanResult<T> = std::result::Result<T, PlanFailure>;
