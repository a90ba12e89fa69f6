//! Scalar cost-to-goal field.

use crate::core::GridCoord;

/// Sentinel potential for cells the wavefront has not reached.
pub const POT_HIGH: f32 = 1.0e10;

/// Per-cell estimated cost-to-goal, row-major, same layout as the cost grid.
#[derive(Clone, Debug)]
pub struct PotentialField {
    width: usize,
    height: usize,
    pot: Vec<f32>,
}

impl PotentialField {
    /// Create a field with every cell unreached.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pot: vec![POT_HIGH; width * height],
        }
    }

    /// Field width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total cell count
    #[inline]
    pub fn len(&self) -> usize {
        self.pot.len()
    }

    /// True when the field holds no cells
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pot.is_empty()
    }

    /// Linear index of a coordinate
    #[inline]
    pub fn index(&self, c: GridCoord) -> usize {
        c.y as usize * self.width + c.x as usize
    }

    /// Potential at a linear index
    #[inline]
    pub fn get(&self, idx: usize) -> f32 {
        self.pot[idx]
    }

    /// Overwrite the potential at a linear index
    #[inline]
    pub fn set(&mut self, idx: usize, v: f32) {
        self.pot[idx] = v;
    }

    /// Whether the wavefront has assigned this cell a finite potential
    #[inline]
    pub fn is_reached(&self, idx: usize) -> bool {
        self.pot[idx] < POT_HIGH
    }

    /// Raw potential values, row-major
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.pot
    }

    /// Mark every cell unreached.
    pub fn reset(&mut self) {
        self.pot.fill(POT_HIGH);
    }

    /// Reallocate for new dimensions; every cell starts unreached.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pot.clear();
        self.pot.resize(width * height, POT_HIGH);
    }
}
