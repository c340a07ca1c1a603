//! Benchmarks for the region packing solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use polypack::geometry::distinct_variants;
use polypack::{solver, Cell, RegionRequest, ShapeCatalog};

const L_TETROMINO: &[Cell] = &[(0, 0), (1, 0), (2, 0), (2, 1)];
const T_TETROMINO: &[Cell] = &[(0, 0), (0, 1), (0, 2), (1, 1)];
const W_PENTOMINO: &[Cell] = &[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)];
const MONOMINO: &[Cell] = &[(0, 0)];

fn catalog() -> ShapeCatalog {
    let mut catalog = ShapeCatalog::new();
    catalog.insert(0, L_TETROMINO.to_vec());
    catalog.insert(1, T_TETROMINO.to_vec());
    catalog.insert(2, W_PENTOMINO.to_vec());
    catalog.insert(3, MONOMINO.to_vec());
    catalog
}

/// Benchmark a packable region that needs real search.
fn bench_solve_packable(c: &mut Criterion) {
    let catalog = catalog();
    let request = RegionRequest::new(4, 4, [(0, 4)]);

    c.bench_function("solve_packable_4x4", |b| {
        b.iter(|| solver::solve(black_box(&request), &catalog))
    });
}

/// Benchmark an exhaustive failure: the area matches but no tiling exists.
fn bench_solve_unpackable(c: &mut Criterion) {
    let catalog = catalog();
    let request = RegionRequest::new(4, 2, [(1, 2)]);

    c.bench_function("solve_unpackable_4x2", |b| {
        b.iter(|| solver::solve(black_box(&request), &catalog))
    });
}

/// Benchmark a mixed-shape region, the common case in puzzle files.
fn bench_solve_mixed(c: &mut Criterion) {
    let catalog = catalog();
    // one W pentomino, two L tetrominoes, spare monominoes
    let request = RegionRequest::new(5, 4, [(0, 2), (2, 1), (3, 7)]);

    c.bench_function("solve_mixed_5x4", |b| {
        b.iter(|| solver::solve(black_box(&request), &catalog))
    });
}

/// Benchmark the area precheck path, which answers without searching.
fn bench_area_reject(c: &mut Criterion) {
    let catalog = catalog();
    let request = RegionRequest::new(9, 9, [(2, 5)]);

    c.bench_function("reject_area_mismatch", |b| {
        b.iter(|| solver::solve(black_box(&request), &catalog))
    });
}

/// Benchmark computing all distinct orientations of a single shape.
fn bench_variants(c: &mut Criterion) {
    c.bench_function("distinct_variants", |b| {
        b.iter(|| distinct_variants(black_box(W_PENTOMINO)))
    });
}

criterion_group!(
    benches,
    bench_solve_packable,
    bench_solve_unpackable,
    bench_solve_mixed,
    bench_area_reject,
    bench_variants
);
criterion_main!(benches);
