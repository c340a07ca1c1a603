//! Board representation and text rendering for region packing.
//!
//! A board is a flat row-major occupancy grid sized per region request.
//! The solver owns exactly one board per request and restores it on every
//! backtrack, so a failed subtree leaves the grid bit-for-bit unchanged.

use crate::shape::{Cell, PlacedShape};

/// Occupancy grid for one region request: `height` rows by `width` columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Board {
    /// Creates an empty board of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Converts (row, column) to a linear cell index.
    ///
    /// Index order is row-major: `idx = row * width + col`.
    #[inline(always)]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Converts a linear cell index to (row, column).
    #[inline(always)]
    pub fn cell_at(&self, index: usize) -> Cell {
        ((index / self.width) as i32, (index % self.width) as i32)
    }

    /// True if the cell at `index` is occupied.
    #[inline(always)]
    pub fn occupied(&self, index: usize) -> bool {
        self.cells[index]
    }

    /// Finds the first empty cell at or after `from` in row-major order.
    ///
    /// Returns `None` if no empty cell remains (the region is full). The
    /// solver always fills the lowest empty cell before recursing, so
    /// scanning from the previous target skips the settled prefix.
    #[inline]
    pub fn first_empty_from(&self, from: usize) -> Option<usize> {
        let from = from.min(self.cells.len());
        self.cells[from..]
            .iter()
            .position(|&occupied| !occupied)
            .map(|offset| from + offset)
    }

    /// Marks every cell in `covered` occupied.
    ///
    /// Callers check freeness first; placing onto an occupied cell is a
    /// solver bug, caught by the paired debug assertion.
    #[inline]
    pub fn place_cells(&mut self, covered: &[usize]) {
        for &index in covered {
            debug_assert!(!self.cells[index], "cell {index} placed twice");
            self.cells[index] = true;
        }
    }

    /// Clears every cell in `covered`; the exact mirror of `place_cells`.
    #[inline]
    pub fn clear_cells(&mut self, covered: &[usize]) {
        for &index in covered {
            debug_assert!(self.cells[index], "cell {index} cleared while empty");
            self.cells[index] = false;
        }
    }

    /// True if every cell in `covered` is currently free.
    #[inline]
    pub fn all_free(&self, covered: &[usize]) -> bool {
        covered.iter().all(|&index| !self.cells[index])
    }
}

/// Renders a normalized cell set as a `#`/`.` grid, one row per line.
///
/// Used for displaying catalogue shapes and their variants.
pub fn render_cells(cells: &[Cell]) -> String {
    let max_row = cells.iter().map(|&(row, _)| row).max().unwrap_or(-1);
    let max_col = cells.iter().map(|&(_, col)| col).max().unwrap_or(-1);

    let mut output = String::new();
    for row in 0..=max_row {
        for col in 0..=max_col {
            output.push(if cells.contains(&(row, col)) { '#' } else { '.' });
        }
        output.push('\n');
    }
    output
}

/// Formats a tiling as a human-readable grid.
///
/// Each cell shows the 1-based number of the piece covering it, in
/// placement order: digits, then letters for pieces 10 and up. Empty cells
/// show as '.', which a complete tiling never contains.
pub fn render_tiling(width: usize, height: usize, tiling: &[PlacedShape]) -> String {
    let mut grid = vec![0u8; width * height];

    for (number, placed) in tiling.iter().enumerate() {
        let piece_number = (number + 1) as u8;
        for &(row, col) in &placed.cells {
            grid[row as usize * width + col as usize] = piece_number;
        }
    }

    let mut output = String::new();
    for row in 0..height {
        for col in 0..width {
            let piece_number = grid[row * width + col];
            let display_char = if piece_number == 0 {
                '.'
            } else if piece_number < 10 {
                char::from(b'0' + piece_number)
            } else if piece_number < 36 {
                char::from(b'A' + piece_number - 10)
            } else {
                // beyond 'Z'; boards that large are unreadable anyway
                '?'
            };
            output.push(display_char);
        }
        output.push('\n');
    }

    output
}
