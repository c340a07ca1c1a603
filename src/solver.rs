//! Backtracking search engine for exact region packing.
//!
//! Key optimizations:
//! - Exact-area precheck: a request whose demanded area differs from the
//!   board area is rejected before any placement is tried
//! - First-empty-cell rule: every placement must cover the lowest empty
//!   cell in row-major order, collapsing branches that differ only in
//!   placement order
//! - Anchored-placement table: for each board cell and shape variant the
//!   covered cell indices are computed once up front, so the hot loop only
//!   tests occupancy
//! - Larger shapes first: pieces with fewer legal positions are tried
//!   early, failing hopeless branches sooner

use std::cmp::Reverse;
use std::fmt;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::grid::Board;
use crate::shape::{PlacedShape, Shape, ShapeCatalog};

/// A region request: the rectangle to fill and how many copies of each
/// shape must be placed in it.
#[derive(Debug, Clone, Default)]
pub struct RegionRequest {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Required count per shape id. Ids absent from the map default to
    /// zero; a zero count means "defined but not needed here".
    pub demand: FxHashMap<usize, usize>,
}

impl RegionRequest {
    /// Convenience constructor from (shape id, count) pairs.
    pub fn new(
        width: usize,
        height: usize,
        demand: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        Self {
            width,
            height,
            demand: demand.into_iter().collect(),
        }
    }
}

/// Caller contract violations, distinct from "no tiling exists".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    /// A shape with positive demand has no catalogue entry.
    #[error("shape {id} is demanded but not in the catalogue")]
    UnknownShape { id: usize },
}

/// Bounds on one search invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits {
    /// Maximum search nodes to expand; `None` searches exhaustively.
    pub max_nodes: Option<u64>,
}

/// Result of one packing search.
#[derive(Debug, Clone)]
pub struct PackOutcome {
    /// The placements of a found tiling, in placement order.
    pub tiling: Option<Vec<PlacedShape>>,
    /// Search nodes expanded; zero when the area precheck rejected the
    /// request without searching.
    pub nodes: u64,
    /// False when the node budget stopped the search before an answer.
    pub exhausted: bool,
}

impl PackOutcome {
    /// Collapses the outcome into a three-way verdict.
    pub fn verdict(&self) -> Verdict {
        if self.tiling.is_some() {
            Verdict::Packable
        } else if self.exhausted {
            Verdict::Unpackable
        } else {
            Verdict::Unknown
        }
    }
}

/// Three-way answer for budgeted searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// At least one exact tiling exists.
    Packable,
    /// The search space is exhausted; no tiling exists.
    Unpackable,
    /// The node budget tripped before the search reached an answer.
    Unknown,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Verdict::Packable => "packable",
            Verdict::Unpackable => "unpackable",
            Verdict::Unknown => "unknown",
        };
        f.write_str(text)
    }
}

/// Pre-computed placement data for one shape variant anchored at one cell.
#[derive(Debug, Clone)]
struct Placement {
    /// Flat board indices covered by the variant, ascending; the first
    /// entry is the anchor cell itself.
    covered: Vec<usize>,
}

/// Placement lookup for one demanded shape.
struct ShapeSlot {
    /// Catalogue id, for reporting placements.
    id: usize,
    /// Placements indexed by anchor cell: `placements[cell]` lists every
    /// variant placement whose first covered cell is `cell`.
    placements: Vec<Vec<Placement>>,
}

/// Builds the placement lookup for every demanded shape.
fn build_slots(board: &Board, demanded: &[(&Shape, usize)]) -> Vec<ShapeSlot> {
    demanded
        .iter()
        .map(|&(shape, _)| {
            let placements = (0..board.area())
                .map(|target| anchored_placements(board, shape, target))
                .collect();
            ShapeSlot {
                id: shape.id(),
                placements,
            }
        })
        .collect()
}

/// All placements of `shape` whose first covered cell is exactly `target`.
///
/// The board fills in row-major order, so only the variant's
/// topmost-then-leftmost cell can land on the first empty cell: any other
/// anchoring would leave an earlier cell of the variant uncovered below the
/// fill front. That fixes the translation per variant; the only remaining
/// check is that the whole variant stays on the board.
fn anchored_placements(board: &Board, shape: &Shape, target: usize) -> Vec<Placement> {
    let (target_row, target_col) = board.cell_at(target);
    let mut placements = Vec::new();

    for variant in shape.variants() {
        let (anchor_row, anchor_col) = variant.anchor();
        let row = target_row - anchor_row;
        let col = target_col - anchor_col;

        // the variant occupies rows row..=row+max_row, cols col..=col+max_col
        if row < 0
            || col < 0
            || row + variant.max_row() >= board.height() as i32
            || col + variant.max_col() >= board.width() as i32
        {
            continue;
        }

        let covered = variant
            .cells()
            .iter()
            .map(|&(cell_row, cell_col)| {
                board.index((row + cell_row) as usize, (col + cell_col) as usize)
            })
            .collect();
        placements.push(Placement { covered });
    }

    placements
}

/// Mutable state for one in-flight search.
///
/// The board is exclusively owned here; every backtrack clears exactly the
/// cells it placed, so a failed subtree leaves board and counts as they
/// were on entry.
struct Search<'a> {
    slots: &'a [ShapeSlot],
    board: Board,
    /// Remaining count per slot, parallel to `slots`.
    remaining: Vec<usize>,
    /// (slot, anchor cell, placement index) per placed piece, innermost
    /// last; holds the full tiling when the search succeeds.
    placed: Vec<(usize, usize, usize)>,
    nodes: u64,
    max_nodes: Option<u64>,
    out_of_budget: bool,
}

impl Search<'_> {
    /// Recursive step: fill the first empty cell at or after `from`.
    ///
    /// Returns true as soon as one complete tiling is found; the board then
    /// keeps the winning placements. On false the board and the remaining
    /// counts are exactly as on entry.
    fn place(&mut self, from: usize) -> bool {
        self.nodes += 1;
        if let Some(max) = self.max_nodes {
            if self.nodes > max {
                self.out_of_budget = true;
                return false;
            }
        }

        let Some(target) = self.board.first_empty_from(from) else {
            // board full; the area precheck guarantees every demanded
            // piece was consumed on the way here
            debug_assert!(self.remaining.iter().all(|&count| count == 0));
            return true;
        };

        let slots = self.slots;
        for (slot_index, slot) in slots.iter().enumerate() {
            if self.remaining[slot_index] == 0 {
                continue;
            }
            self.remaining[slot_index] -= 1;

            for (placement_index, placement) in slot.placements[target].iter().enumerate() {
                if !self.board.all_free(&placement.covered) {
                    continue;
                }

                self.board.place_cells(&placement.covered);
                self.placed.push((slot_index, target, placement_index));

                if self.place(target + 1) {
                    return true;
                }

                self.placed.pop();
                self.board.clear_cells(&placement.covered);

                if self.out_of_budget {
                    break;
                }
            }

            self.remaining[slot_index] += 1;
            if self.out_of_budget {
                break;
            }
        }

        false
    }
}

/// Decides whether `request` can be exactly tiled from `catalog`.
///
/// # Errors
///
/// Returns [`SolveError::UnknownShape`] when a shape with positive demand
/// is missing from the catalogue.
pub fn can_pack(request: &RegionRequest, catalog: &ShapeCatalog) -> Result<bool, SolveError> {
    solve(request, catalog).map(|outcome| outcome.tiling.is_some())
}

/// Runs the packing search without bounds.
pub fn solve(request: &RegionRequest, catalog: &ShapeCatalog) -> Result<PackOutcome, SolveError> {
    solve_with_limits(request, catalog, SearchLimits::default())
}

/// Runs the packing search, stopping early when `limits` trips.
pub fn solve_with_limits(
    request: &RegionRequest,
    catalog: &ShapeCatalog,
    limits: SearchLimits,
) -> Result<PackOutcome, SolveError> {
    // collect demanded shapes, validating ids; zero counts are ignored
    let mut demanded: Vec<(&Shape, usize)> = Vec::new();
    for (&id, &count) in &request.demand {
        if count == 0 {
            continue;
        }
        let shape = catalog.get(id).ok_or(SolveError::UnknownShape { id })?;
        demanded.push((shape, count));
    }

    // larger pieces first; ties broken by id so runs are deterministic
    demanded.sort_by_key(|&(shape, _)| (Reverse(shape.area()), shape.id()));

    let board = Board::new(request.width, request.height);

    // exact cover: a total area mismatch can never tile, skip the search
    let total_area: usize = demanded
        .iter()
        .map(|&(shape, count)| shape.area() * count)
        .sum();
    if total_area != board.area() {
        log::debug!(
            "region {}x{}: demanded area {} != board area {}, rejected without search",
            request.width,
            request.height,
            total_area,
            board.area(),
        );
        return Ok(PackOutcome {
            tiling: None,
            nodes: 0,
            exhausted: true,
        });
    }

    let slots = build_slots(&board, &demanded);
    let mut search = Search {
        slots: &slots,
        board,
        remaining: demanded.iter().map(|&(_, count)| count).collect(),
        placed: Vec::new(),
        nodes: 0,
        max_nodes: limits.max_nodes,
        out_of_budget: false,
    };

    let packed = search.place(0);

    let tiling = packed.then(|| {
        search
            .placed
            .iter()
            .map(|&(slot_index, cell, placement_index)| {
                let placement = &slots[slot_index].placements[cell][placement_index];
                PlacedShape {
                    shape: slots[slot_index].id,
                    cells: placement
                        .covered
                        .iter()
                        .map(|&index| search.board.cell_at(index))
                        .collect(),
                }
            })
            .collect()
    });

    let outcome = PackOutcome {
        tiling,
        nodes: search.nodes,
        exhausted: !search.out_of_budget,
    };
    log::debug!(
        "region {}x{}: {} after {} nodes",
        request.width,
        request.height,
        outcome.verdict(),
        outcome.nodes,
    );
    Ok(outcome)
}
