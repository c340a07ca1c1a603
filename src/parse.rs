//! Parser for the shape-catalogue and region-request input format.
//!
//! The format is line oriented:
//!
//! ```text
//! 0:
//! ##
//! .#
//!
//! 1:
//! #
//!
//! 3x2: 1 1
//! 4x1: 0 4
//! ```
//!
//! A line `N:` opens a shape block; the rows that follow use `#` for filled
//! cells and `.` for empty ones. A blank line (or the next header) closes
//! the block. A line `WxH: c0 c1 ...` requests a region: width times
//! height, then per-shape counts assigned positionally to shape ids 0, 1,
//! 2, and so on. Missing trailing counts default to zero.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::shape::{Cell, ShapeCatalog};
use crate::solver::RegionRequest;

/// Errors produced while reading the input text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A `N:` header whose id is not a non-negative integer.
    #[error("line {line}: expected a shape id in header '{text}'")]
    BadHeader { line: usize, text: String },
    /// A region line that is not `WxH:` followed by whitespace-separated
    /// counts.
    #[error("line {line}: expected 'WxH: counts...' in region request '{text}'")]
    BadRegion { line: usize, text: String },
    /// A shape row containing anything but `#` and `.`.
    #[error("line {line}, column {column}: unexpected character '{found}' in shape row")]
    BadShapeRow {
        line: usize,
        column: usize,
        found: char,
    },
    /// The same shape id was defined twice.
    #[error("line {line}: shape {id} defined twice")]
    DuplicateShape { line: usize, id: usize },
    /// A shape block closed without a single `#` cell.
    #[error("line {line}: shape {id} has no filled cells")]
    EmptyShape { line: usize, id: usize },
    /// A `#`/`.` row appeared before any shape header.
    #[error("line {line}: shape row outside any shape block")]
    RowOutsideShape { line: usize },
}

/// A shape block that has been opened but not yet flushed.
struct PendingShape {
    id: usize,
    header_line: usize,
    next_row: i32,
    cells: Vec<Cell>,
}

#[derive(Default)]
struct Parser {
    catalog: ShapeCatalog,
    requests: Vec<RegionRequest>,
    pending: Option<PendingShape>,
}

impl Parser {
    /// Opens a new shape block from a `N:` header.
    fn open_shape(&mut self, header: &str, text: &str, line: usize) -> Result<(), ParseError> {
        let id = header.trim().parse().map_err(|_| ParseError::BadHeader {
            line,
            text: text.to_string(),
        })?;
        self.pending = Some(PendingShape {
            id,
            header_line: line,
            next_row: 0,
            cells: Vec::new(),
        });
        Ok(())
    }

    /// Appends one `#`/`.` row to the open shape block.
    fn push_row(&mut self, row: &str, line: usize) -> Result<(), ParseError> {
        let Some(pending) = self.pending.as_mut() else {
            return Err(ParseError::RowOutsideShape { line });
        };

        for (offset, symbol) in row.chars().enumerate() {
            match symbol {
                '#' => pending.cells.push((pending.next_row, offset as i32)),
                '.' => {}
                found => {
                    return Err(ParseError::BadShapeRow {
                        line,
                        column: offset + 1,
                        found,
                    })
                }
            }
        }
        pending.next_row += 1;
        Ok(())
    }

    /// Closes the open shape block, if any, and catalogues it.
    fn flush_shape(&mut self) -> Result<(), ParseError> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };

        if pending.cells.is_empty() {
            return Err(ParseError::EmptyShape {
                line: pending.header_line,
                id: pending.id,
            });
        }
        if self.catalog.get(pending.id).is_some() {
            return Err(ParseError::DuplicateShape {
                line: pending.header_line,
                id: pending.id,
            });
        }

        self.catalog.insert(pending.id, pending.cells);
        if let Some(shape) = self.catalog.get(pending.id) {
            log::debug!(
                "shape {}: {} cells, {} variants",
                shape.id(),
                shape.area(),
                shape.variants().len(),
            );
        }
        Ok(())
    }

    /// Parses a `WxH: counts...` line into a region request.
    fn push_region(&mut self, text: &str, line: usize) -> Result<(), ParseError> {
        let (dims, counts) = text.split_once(':').ok_or_else(|| bad_region(line, text))?;
        let (width, height) = dims
            .trim()
            .split_once('x')
            .ok_or_else(|| bad_region(line, text))?;
        let width = width.trim().parse().map_err(|_| bad_region(line, text))?;
        let height = height.trim().parse().map_err(|_| bad_region(line, text))?;

        let mut demand = FxHashMap::default();
        for (id, field) in counts.split_whitespace().enumerate() {
            let count = field.parse().map_err(|_| bad_region(line, text))?;
            demand.insert(id, count);
        }

        self.requests.push(RegionRequest {
            width,
            height,
            demand,
        });
        Ok(())
    }
}

fn bad_region(line: usize, text: &str) -> ParseError {
    ParseError::BadRegion {
        line,
        text: text.to_string(),
    }
}

/// Parses the full input into the shape catalogue and the region requests.
pub fn parse_input(input: &str) -> Result<(ShapeCatalog, Vec<RegionRequest>), ParseError> {
    let mut parser = Parser::default();

    for (index, raw_line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();

        if line.is_empty() {
            parser.flush_shape()?;
            continue;
        }
        // both region lines and shape headers contain ':', but only region
        // dimensions carry an 'x', so test for regions first
        if line.contains('x') && line.contains(':') {
            parser.flush_shape()?;
            parser.push_region(line, line_no)?;
            continue;
        }
        if let Some(header) = line.strip_suffix(':') {
            parser.flush_shape()?;
            parser.open_shape(header, line, line_no)?;
            continue;
        }
        parser.push_row(line, line_no)?;
    }
    parser.flush_shape()?;

    log::debug!(
        "parsed {} shapes, {} region requests",
        parser.catalog.len(),
        parser.requests.len(),
    );
    Ok((parser.catalog, parser.requests))
}
