//! Owned cost array with sealed borders.

use crate::core::GridCoord;
use crate::error::{PlanFailure, PlanResult};

use super::costs;

/// Per-cell traversal cost grid.
///
/// Cells are stored row-major, indexed by `k = y * width + x`. The outer
/// one-cell frame is kept at [`costs::OBSTACLE`] at all times so the
/// propagation and gradient kernels can touch all four axis neighbours of
/// any interior cell without bounds checks.
#[derive(Clone, Debug)]
pub struct CostGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl CostGrid {
    /// Create a grid with every interior cell at neutral cost.
    pub fn new(width: usize, height: usize) -> Self {
        let mut grid = Self {
            width,
            height,
            cells: vec![costs::NEUTRAL; width * height],
        };
        grid.seal_border();
        grid
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total cell count
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the grid holds no cells
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw cost values, row-major
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Linear index of a coordinate. Callers must check [`Self::contains`]
    /// first for untrusted coordinates.
    #[inline]
    pub fn index(&self, c: GridCoord) -> usize {
        c.y as usize * self.width + c.x as usize
    }

    /// Coordinate of a linear index
    #[inline]
    pub fn coord(&self, idx: usize) -> GridCoord {
        GridCoord::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    /// Whether a coordinate lies inside the grid
    #[inline]
    pub fn contains(&self, c: GridCoord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.width && (c.y as usize) < self.height
    }

    /// Cost at a linear index
    #[inline]
    pub fn cost(&self, idx: usize) -> u8 {
        self.cells[idx]
    }

    /// Cost at a coordinate; out-of-grid reads as lethal
    #[inline]
    pub fn cost_at(&self, c: GridCoord) -> u8 {
        if self.contains(c) {
            self.cells[self.index(c)]
        } else {
            costs::OBSTACLE
        }
    }

    /// Overwrite the cost of one cell. Intended for tests and map builders;
    /// ingestion goes through [`Self::load`].
    #[inline]
    pub fn set_cost(&mut self, c: GridCoord, v: u8) {
        let idx = self.index(c);
        self.cells[idx] = v;
    }

    /// Whether a cell can carry potential
    #[inline]
    pub fn is_traversable(&self, idx: usize) -> bool {
        self.cells[idx] < costs::OBSTACLE
    }

    /// Reallocate for new dimensions, resetting every cell to neutral.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width * height, costs::NEUTRAL);
        self.seal_border();
    }

    /// Ingest a foreign cost map of the same dimensions.
    ///
    /// Incoming values are remapped onto the internal scale:
    /// `v < 253` becomes `NEUTRAL + FACTOR * v` (capped below lethal),
    /// unknown space (`255`) becomes the costliest traversable value when
    /// `allow_unknown` is set, and everything else is lethal.
    ///
    /// `structured` distinguishes a navigation-stack cost field from a raw
    /// monochrome image; the raw variant additionally forces a
    /// [`costs::RAW_IMAGE_BORDER`]-cell frame lethal on every edge.
    pub fn load(&mut self, src: &[u8], structured: bool, allow_unknown: bool) -> PlanResult<()> {
        if src.len() != self.cells.len() {
            return Err(PlanFailure::OutOfBounds);
        }

        let border = if structured {
            0
        } else {
            costs::RAW_IMAGE_BORDER
        };

        for y in 0..self.height {
            for x in 0..self.width {
                let k = y * self.width + x;
                if !structured
                    && (y < border
                        || y >= self.height.saturating_sub(border)
                        || x < border
                        || x >= self.width.saturating_sub(border))
                {
                    self.cells[k] = costs::OBSTACLE;
                    continue;
                }
                self.cells[k] = Self::remap(src[k], allow_unknown);
            }
        }

        self.seal_border();
        Ok(())
    }

    /// Remap one external cost value onto the internal scale.
    #[inline]
    fn remap(v: u8, allow_unknown: bool) -> u8 {
        if v < costs::INSCRIBED_EXT {
            let scaled = (costs::NEUTRAL as f32 + costs::FACTOR * v as f32) as u8;
            scaled.min(costs::OBSTACLE - 1)
        } else if v == costs::UNKNOWN_EXT && allow_unknown {
            costs::OBSTACLE - 1
        } else {
            costs::OBSTACLE
        }
    }

    /// Force the outer one-cell frame lethal.
    pub fn seal_border(&mut self) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let w = self.width;
        let h = self.height;
        for x in 0..w {
            self.cells[x] = costs::OBSTACLE;
            self.cells[(h - 1) * w + x] = costs::OBSTACLE;
        }
        for y in 0..h {
            self.cells[y * w] = costs::OBSTACLE;
            self.cells[y * w + w - 1] = costs::OBSTACLE;
        }
    }

    /// Number of lethal cells. Diagnostic only.
    pub fn count_lethal(&self) -> usize {
        self.cells.iter().filter(|&&c| c >= costs::OBSTACLE).count()
    }
}
