//! 2D rotation and reflection utilities.
//!
//! A square tile has 8 possible orientations in the plane (the dihedral
//! group of the square): 4 rotations, each with and without a reflection.
//! Applying all of them to a shape and normalizing the results yields every
//! orientation a piece can take on the board.

use crate::shape::{Cell, Variant};

/// All 8 transform functions for a square.
///
/// Organized as 4 rotations x {plain, reflected}:
/// - Transforms 0-3: rotations by 0, 90, 180, 270 degrees,
///   where one 90-degree step maps (row, col) to (col, -row)
/// - Transforms 4-7: the same rotations applied after reflecting
///   across the horizontal axis, (row, col) to (-row, col)
pub const TRANSFORMS: [fn(Cell) -> Cell; 8] = [
    // plain rotations
    |(row, col)| (row, col),   // 0 degrees
    |(row, col)| (col, -row),  // 90 degrees
    |(row, col)| (-row, -col), // 180 degrees
    |(row, col)| (-col, row),  // 270 degrees
    // reflected, then the same four rotations
    |(row, col)| (-row, col),
    |(row, col)| (col, row),
    |(row, col)| (row, -col),
    |(row, col)| (-col, -row),
];

/// Generates all distinct orientations of a cell set.
///
/// Applies all 8 transforms, normalizes each result so the minimum row and
/// column are zero, then removes duplicates. Symmetric shapes produce fewer
/// than 8 distinct orientations; a monomino produces exactly one.
pub fn distinct_variants(cells: &[Cell]) -> Vec<Variant> {
    let mut orientations: Vec<Vec<Cell>> = TRANSFORMS
        .iter()
        .map(|transform| {
            let transformed: Vec<Cell> = cells.iter().map(|&cell| transform(cell)).collect();
            normalize_to_origin(transformed)
        })
        .collect();

    // remove duplicate orientations (symmetric shapes produce duplicates)
    orientations.sort();
    orientations.dedup();
    orientations
        .into_iter()
        .map(Variant::from_sorted_cells)
        .collect()
}

/// Translates cells so the minimum row and column are both zero, then sorts
/// them by (row, column).
///
/// The combination of translation and sorting is the canonical form: two
/// orientations that differ only by translation or by cell listing order
/// become identical, so plain equality recognizes duplicates.
pub(crate) fn normalize_to_origin(mut cells: Vec<Cell>) -> Vec<Cell> {
    let min_row = cells.iter().map(|(row, _)| *row).min().unwrap();
    let min_col = cells.iter().map(|(_, col)| *col).min().unwrap();

    for (row, col) in &mut cells {
        *row -= min_row;
        *col -= min_col;
    }

    cells.sort_unstable();
    cells
}
