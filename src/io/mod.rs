//! Debug persistence for cost grids.
//!
//! Writes the inputs of a planning problem in two files next to each
//! other: a plain-text `<stem>.txt` with the goal and start cells, and a
//! binary `<stem>.pgm` (P5) of the raw cost array. Handy for replaying a
//! failing plan offline.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::GridCoord;
use crate::grid::{costs, CostGrid};

/// Save a cost grid plus endpoints under `<stem>.txt` / `<stem>.pgm`.
pub fn save_debug_map(
    grid: &CostGrid,
    goal: GridCoord,
    start: GridCoord,
    stem: &Path,
) -> std::io::Result<()> {
    let mut txt = File::create(stem.with_extension("txt"))?;
    writeln!(txt, "Goal: {} {}", goal.x, goal.y)?;
    writeln!(txt, "Start: {} {}", start.x, start.y)?;

    let mut pgm = File::create(stem.with_extension("pgm"))?;
    write!(pgm, "P5\n{}\n{}\n{}\n", grid.width(), grid.height(), 0xff)?;
    pgm.write_all(grid.cells())?;
    Ok(())
}

/// Export the cost grid as grayscale pixels: lethal cells black, free
/// cells bright. Returns `(width, height, pixels)` row-major.
pub fn to_grayscale(grid: &CostGrid) -> (usize, usize, Vec<u8>) {
    let pixels = grid
        .cells()
        .iter()
        .map(|&c| if c >= costs::OBSTACLE { 0 } else { 255 - c })
        .collect();
    (grid.width(), grid.height(), pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_debug_map() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("navdump");
        let grid = CostGrid::new(12, 9);
        save_debug_map(&grid, GridCoord::new(8, 4), GridCoord::new(2, 2), &stem).unwrap();

        let txt = std::fs::read_to_string(stem.with_extension("txt")).unwrap();
        assert_eq!(txt, "Goal: 8 4\nStart: 2 2\n");

        let pgm = std::fs::read(stem.with_extension("pgm")).unwrap();
        let header = b"P5\n12\n9\n255\n";
        assert!(pgm.starts_with(header));
        assert_eq!(pgm.len(), header.len() + 12 * 9);
    }

    #[test]
    fn test_to_grayscale() {
        let mut grid = CostGrid::new(6, 6);
        grid.set_cost(GridCoord::new(2, 2), costs::OBSTACLE);
        let (w, h, pixels) = to_grayscale(&grid);
        assert_eq!((w, h), (6, 6));
        // lethal is black, including the sealed frame
        assert_eq!(pixels[2 * 6 + 2], 0);
        assert_eq!(pixels[0], 0);
        // neutral interior is bright
        assert_eq!(pixels[3 * 6 + 3], 255 - costs::NEUTRAL);
    }
}
