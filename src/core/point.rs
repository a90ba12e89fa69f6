//! Point and coordinate types for the navigation grid.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Grid coordinates (integer cell indices).
///
/// The grid frame has x increasing rightward and y increasing downward,
/// with the origin at cell (0, 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate
    #[inline]
    pub fn euclidean_distance(&self, other: &GridCoord) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        dx.hypot(dy)
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Get the 4 cardinal neighbors (up, right, down, left in grid frame)
    #[inline]
    pub fn neighbors_4(&self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.x, self.y - 1),
            GridCoord::new(self.x + 1, self.y),
            GridCoord::new(self.x, self.y + 1),
            GridCoord::new(self.x - 1, self.y),
        ]
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// Sub-cell path point (fractional cell units, same frame as [`GridCoord`]).
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PathPoint {
    /// X coordinate in cell units
    pub x: f32,
    /// Y coordinate in cell units
    pub y: f32,
}

impl PathPoint {
    /// Create a new path point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &PathPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The cell containing this point, by truncation
    #[inline]
    pub fn cell(&self) -> GridCoord {
        GridCoord::new(self.x as i32, self.y as i32)
    }
}

impl From<GridCoord> for PathPoint {
    #[inline]
    fn from(c: GridCoord) -> Self {
        PathPoint::new(c.x as f32, c.y as f32)
    }
}
