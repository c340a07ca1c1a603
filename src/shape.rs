//! Shape definitions and the shape catalogue.
//!
//! Each shape is defined as a set of unit cell positions in 2D space,
//! normalized to start at the origin. Its distinct orientations are
//! generated once, when the shape enters the catalogue, and are immutable
//! afterwards.

use rustc_hash::FxHashMap;

use crate::geometry::{distinct_variants, normalize_to_origin};

/// A 2D coordinate representing a unit cell position as (row, column).
pub type Cell = (i32, i32);

/// One distinct orientation of a shape.
///
/// Cells are normalized so the minimum row and column are zero, and sorted
/// by (row, column), so equal orientations compare equal structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    cells: Vec<Cell>,
    max_row: i32,
    max_col: i32,
}

impl Variant {
    /// Wraps a normalized, sorted cell list produced by
    /// `geometry::distinct_variants`.
    pub(crate) fn from_sorted_cells(cells: Vec<Cell>) -> Self {
        let max_row = cells.iter().map(|&(row, _)| row).max().unwrap_or(0);
        let max_col = cells.iter().map(|&(_, col)| col).max().unwrap_or(0);
        Self {
            cells,
            max_row,
            max_col,
        }
    }

    /// The normalized cells, sorted by (row, column).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells; identical for every variant of one shape.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Largest row offset among the cells.
    pub fn max_row(&self) -> i32 {
        self.max_row
    }

    /// Largest column offset among the cells.
    pub fn max_col(&self) -> i32 {
        self.max_col
    }

    /// The topmost-then-leftmost cell (the first in sorted order).
    ///
    /// When the board is filled in row-major order this is the only cell of
    /// the variant that can land on the first empty cell.
    pub fn anchor(&self) -> Cell {
        self.cells[0]
    }
}

/// A catalogued shape: its base cells plus every distinct orientation
/// reachable by rotation and reflection.
#[derive(Debug, Clone)]
pub struct Shape {
    id: usize,
    cells: Vec<Cell>,
    variants: Vec<Variant>,
}

impl Shape {
    /// Builds a shape from its filled cells, normalizing them to the origin
    /// and generating the variant list.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty. The parser rejects empty shape blocks
    /// before they reach the catalogue; programmatic callers must do the
    /// same.
    pub fn new(id: usize, cells: Vec<Cell>) -> Self {
        assert!(!cells.is_empty(), "shape {id} has no cells");
        let mut cells = normalize_to_origin(cells);
        cells.dedup();
        let variants = distinct_variants(&cells);
        Self {
            id,
            cells,
            variants,
        }
    }

    /// Identifier the shape is referenced by in region requests.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The base cells, normalized and sorted by (row, column).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All distinct orientations, in lexicographic cell-list order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Number of filled cells.
    pub fn area(&self) -> usize {
        self.cells.len()
    }
}

/// The immutable shape catalogue for a solving session.
///
/// Built once by the parser (or programmatically), then shared by reference
/// with every solve. Shapes and their variants never change afterwards.
#[derive(Debug, Clone, Default)]
pub struct ShapeCatalog {
    shapes: FxHashMap<usize, Shape>,
}

impl ShapeCatalog {
    /// Creates an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shape built from `cells`, generating its variants.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already catalogued or `cells` is empty; the parser
    /// turns both conditions into proper errors before inserting.
    pub fn insert(&mut self, id: usize, cells: Vec<Cell>) {
        let previous = self.shapes.insert(id, Shape::new(id, cells));
        assert!(previous.is_none(), "shape {id} defined twice");
    }

    /// Looks up a shape by id.
    pub fn get(&self, id: usize) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Number of catalogued shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True if no shapes have been catalogued.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes in ascending id order, for deterministic display and tests.
    pub fn shapes_by_id(&self) -> Vec<&Shape> {
        let mut shapes: Vec<&Shape> = self.shapes.values().collect();
        shapes.sort_by_key(|shape| shape.id());
        shapes
    }
}

/// A shape placed at specific cells of a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedShape {
    /// Catalogue id of the placed shape.
    pub shape: usize,
    /// Absolute board cells covered, sorted by (row, column).
    pub cells: Vec<Cell>,
}
