//! Lazily computed unit gradients of the potential field.

use crate::grid::costs;
use crate::potential::{PotentialField, POT_HIGH};

/// Per-cell unit gradient of the potential. Positive x points right,
/// positive y points down, matching the grid frame. `(0, 0)` marks a cell
/// whose gradient has not been computed yet.
#[derive(Clone, Debug)]
pub struct GradientField {
    width: usize,
    gx: Vec<f32>,
    gy: Vec<f32>,
}

impl GradientField {
    /// Create a field with every gradient uncomputed.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            gx: vec![0.0; width * height],
            gy: vec![0.0; width * height],
        }
    }

    /// Cached gradient at a linear index
    #[inline]
    pub fn get(&self, idx: usize) -> (f32, f32) {
        (self.gx[idx], self.gy[idx])
    }

    /// Mark every gradient uncomputed.
    pub fn reset(&mut self) {
        self.gx.fill(0.0);
        self.gy.fill(0.0);
    }

    /// Reallocate for new dimensions.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.gx.clear();
        self.gx.resize(width * height, 0.0);
        self.gy.clear();
        self.gy.resize(width * height, 0.0);
    }

    /// Compute, cache and normalize the gradient at cell `n`.
    ///
    /// Returns the pre-normalization magnitude (1.0 for an already cached
    /// cell, 0.0 for frame cells and flat spots). Inside an unreached
    /// pocket the gradient points at full obstacle weight toward whichever
    /// axis neighbour is reachable, left and up winning ties.
    pub fn compute(&mut self, field: &PotentialField, n: usize) -> f32 {
        if self.gx[n] != 0.0 || self.gy[n] != 0.0 {
            return 1.0;
        }

        let w = self.width;
        let ns = self.gx.len();
        if n < w || n >= ns - w {
            return 0.0;
        }

        let cv = field.get(n);
        let mut dx = 0.0f32;
        let mut dy = 0.0f32;

        if cv >= POT_HIGH {
            if field.is_reached(n - 1) {
                dx = -(costs::OBSTACLE as f32);
            } else if field.is_reached(n + 1) {
                dx = costs::OBSTACLE as f32;
            }
            if field.is_reached(n - w) {
                dy = -(costs::OBSTACLE as f32);
            } else if field.is_reached(n + w) {
                dy = costs::OBSTACLE as f32;
            }
        } else {
            // centred difference over whichever neighbours are reached
            if field.is_reached(n - 1) {
                dx += field.get(n - 1) - cv;
            }
            if field.is_reached(n + 1) {
                dx += cv - field.get(n + 1);
            }
            if field.is_reached(n - w) {
                dy += field.get(n - w) - cv;
            }
            if field.is_reached(n + w) {
                dy += cv - field.get(n + w);
            }
        }

        let norm = dx.hypot(dy);
        if norm > 0.0 {
            self.gx[n] = dx / norm;
            self.gy[n] = dy / norm;
        }
        norm
    }
}
