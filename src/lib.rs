//! Polyomino Region Packing Library
//!
//! Decides whether rectangular regions can be tiled exactly (every cell
//! covered once, no overlaps) by a catalogue of polyomino shapes in
//! demanded quantities. Shapes may be placed in any orientation reachable
//! by rotation and reflection.
//!
//! The input format and the solving pipeline are exposed separately:
//! [`parse::parse_input`] turns a puzzle file into a [`ShapeCatalog`] and a
//! list of [`RegionRequest`]s, and [`solver::solve`] answers one request at
//! a time.

pub mod geometry;
pub mod grid;
pub mod parse;
pub mod shape;
pub mod solver;

pub use shape::{Cell, PlacedShape, Shape, ShapeCatalog, Variant};
pub use solver::{
    can_pack, solve, solve_with_limits, PackOutcome, RegionRequest, SearchLimits, SolveError,
    Verdict,
};
