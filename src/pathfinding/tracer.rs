//! Sub-cell gradient descent path tracer.

use log::debug;

use crate::core::{GridCoord, PathPoint};
use crate::error::{PlanFailure, PlanResult};
use crate::grid::costs;
use crate::potential::{PotentialField, POT_HIGH};

use super::gradient::GradientField;

/// Counters gathered while a trace runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Steps taken, successful or not
    pub steps: usize,
    /// Grid-following fallbacks engaged (high potential nearby or
    /// oscillation)
    pub recoveries: usize,
    /// Oscillations detected
    pub oscillations: usize,
}

/// Traces a polyline from start toward goal by descending the potential.
///
/// The tracer keeps a 2x2 interpolation stencil anchored at cell `stc` with
/// a fractional offset inside it, advancing by a fixed sub-cell step along
/// the bilinearly interpolated gradient. Next to unreached cells, or when
/// the trace revisits the same point two steps apart, it falls back to
/// stepping onto the lowest-potential cell of the surrounding 3x3 window.
#[derive(Clone, Debug)]
pub struct GradientTracer {
    step_size: f32,
    path: Vec<PathPoint>,
    stats: TraceStats,
}

impl GradientTracer {
    /// Create a tracer advancing `step_size` cells per step.
    pub fn new(step_size: f32) -> Self {
        Self {
            step_size,
            path: Vec::new(),
            stats: TraceStats::default(),
        }
    }

    /// Waypoints of the last trace
    #[inline]
    pub fn path(&self) -> &[PathPoint] {
        &self.path
    }

    /// Counters of the last trace
    #[inline]
    pub fn stats(&self) -> &TraceStats {
        &self.stats
    }

    /// Trace from `from` toward `goal` for at most `max_steps` steps.
    ///
    /// On success returns the number of waypoints recorded; the final
    /// waypoint is the goal cell. The trace ends successfully as soon as it
    /// stands on a cell within one neutral step of the goal.
    pub fn trace(
        &mut self,
        field: &PotentialField,
        gradients: &mut GradientField,
        from: GridCoord,
        goal: GridCoord,
        max_steps: usize,
    ) -> PlanResult<usize> {
        self.path.clear();
        self.stats = TraceStats::default();

        let w = field.width();
        let ns = field.len();
        let mut stc = field.index(from);
        let mut dx = 0.0f32;
        let mut dy = 0.0f32;

        for _ in 0..max_steps {
            self.stats.steps += 1;

            // standing within one neutral step of the goal ends the trace
            let nearest = (stc as i64 + dx.round() as i64 + w as i64 * dy.round() as i64)
                .clamp(0, ns as i64 - 1) as usize;
            if field.get(nearest) < costs::NEUTRAL as f32 {
                self.path.push(goal.into());
                return Ok(self.path.len());
            }

            // top or bottom sealed row means the trace escaped the field
            if stc < w || stc >= ns - w {
                debug!("[Trace] ran into the sealed border at index {}", stc);
                return Err(PlanFailure::BorderReached);
            }

            self.path
                .push(PathPoint::new((stc % w) as f32 + dx, (stc / w) as f32 + dy));

            let oscillating = Self::oscillation_detected(&self.path);
            if oscillating {
                self.stats.oscillations += 1;
                debug!("[Trace] oscillation detected, following grid");
            }

            if oscillating || Self::near_unreached(field, stc, w) {
                // grid-following fallback: hop to the lowest potential in
                // the 3x3 window and restart interpolation there
                self.stats.recoveries += 1;
                let (minc, minp) = Self::window_min(field, stc, w);
                stc = minc;
                dx = 0.0;
                dy = 0.0;

                if minp >= POT_HIGH {
                    debug!("[Trace] no reached cell in recovery window");
                    return Err(PlanFailure::HighPotentialTrap);
                }
            } else {
                // bilinear gradient over the 2x2 stencil
                gradients.compute(field, stc);
                gradients.compute(field, stc + 1);
                gradients.compute(field, stc + w);
                gradients.compute(field, stc + w + 1);

                let (g00x, g00y) = gradients.get(stc);
                let (g01x, g01y) = gradients.get(stc + 1);
                let (g10x, g10y) = gradients.get(stc + w);
                let (g11x, g11y) = gradients.get(stc + w + 1);

                let gx = (1.0 - dy) * ((1.0 - dx) * g00x + dx * g01x)
                    + dy * ((1.0 - dx) * g10x + dx * g11x);
                let gy = (1.0 - dy) * ((1.0 - dx) * g00y + dx * g01y)
                    + dy * ((1.0 - dx) * g10y + dx * g11y);

                if gx == 0.0 && gy == 0.0 {
                    debug!("[Trace] zero gradient away from goal");
                    return Err(PlanFailure::ZeroGradient);
                }

                let scale = self.step_size / gx.hypot(gy);
                dx += gx * scale;
                dy += gy * scale;

                // carry stencil overflows
                if dx > 1.0 {
                    stc += 1;
                    dx -= 1.0;
                }
                if dx < -1.0 {
                    stc -= 1;
                    dx += 1.0;
                }
                if dy > 1.0 {
                    stc += w;
                    dy -= 1.0;
                }
                if dy < -1.0 {
                    stc -= w;
                    dy += 1.0;
                }
            }
        }

        debug!("[Trace] step budget exhausted after {} steps", self.stats.steps);
        Err(PlanFailure::StepBudgetExhausted)
    }

    /// The trace oscillates when it revisits the exact same sub-cell point
    /// two steps apart.
    #[inline]
    fn oscillation_detected(path: &[PathPoint]) -> bool {
        let n = path.len();
        n > 2 && path[n - 1] == path[n - 3]
    }

    /// Potential at a window position; anything outside the field reads as
    /// unreached.
    #[inline]
    fn pot_at(field: &PotentialField, idx: i64) -> f32 {
        if idx < 0 || idx >= field.len() as i64 {
            POT_HIGH
        } else {
            field.get(idx as usize)
        }
    }

    /// Whether any cell of the 3x3 window around `stc` is unreached.
    fn near_unreached(field: &PotentialField, stc: usize, w: usize) -> bool {
        for dyo in -1i64..=1 {
            for dxo in -1i64..=1 {
                let idx = stc as i64 + dyo * w as i64 + dxo;
                if Self::pot_at(field, idx) >= POT_HIGH {
                    return true;
                }
            }
        }
        false
    }

    /// Index and potential of the lowest-potential cell in the 3x3 window
    /// around `stc`, the window centre included.
    fn window_min(field: &PotentialField, stc: usize, w: usize) -> (usize, f32) {
        let mut minc = stc;
        let mut minp = field.get(stc);
        for dyo in -1i64..=1 {
            for dxo in -1i64..=1 {
                let idx = stc as i64 + dyo * w as i64 + dxo;
                let p = Self::pot_at(field, idx);
                if p < minp {
                    minp = p;
                    minc = idx as usize;
                }
            }
        }
        (minc, minp)
    }
}
