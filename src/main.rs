//! Polyomino Region Packer
//!
//! Reads a catalogue of polyomino shapes and a list of rectangular region
//! requests from a text file, then decides for each region whether the
//! demanded shape counts tile it exactly. Shapes may be rotated and
//! reflected; a region is packable only when every cell is covered exactly
//! once and every demanded piece is used.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use polypack::{grid, parse, solver};
use polypack::{PackOutcome, RegionRequest, SearchLimits, ShapeCatalog, Verdict};

/// Decides which rectangular regions can be exactly packed with polyominoes.
#[derive(Parser)]
#[command(name = "polypack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve every region request in the input and count the packable ones.
    Solve {
        /// Puzzle file with shape definitions and region requests.
        input: PathBuf,
        /// Print a verdict line for every region.
        #[arg(short, long)]
        verbose: bool,
        /// Render one found tiling per packable region.
        #[arg(long)]
        render: bool,
        /// Search-node budget per region; regions exceeding it report
        /// "unknown" instead of searching to exhaustion.
        #[arg(long)]
        max_nodes: Option<u64>,
    },
    /// Print every catalogued shape with its distinct orientations.
    Shapes {
        /// Puzzle file with shape definitions.
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Solve {
            input,
            verbose,
            render,
            max_nodes,
        } => run_solve(&input, verbose, render, max_nodes),
        Command::Shapes { input } => run_shapes(&input),
    }
}

/// Reads and parses the puzzle file, reporting failures to stderr.
fn load(input: &Path) -> Option<(ShapeCatalog, Vec<RegionRequest>)> {
    let text = match fs::read_to_string(input) {
        Ok(text) => text,
        Err(error) => {
            eprintln!("failed to read {}: {error}", input.display());
            return None;
        }
    };

    match parse::parse_input(&text) {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            eprintln!("{}: {error}", input.display());
            None
        }
    }
}

/// Solves every region request and prints the summary.
fn run_solve(input: &Path, verbose: bool, render: bool, max_nodes: Option<u64>) -> ExitCode {
    let Some((catalog, requests)) = load(input) else {
        return ExitCode::FAILURE;
    };

    let limits = SearchLimits { max_nodes };
    let start = Instant::now();
    let mut packable = 0usize;
    let mut undecided = 0usize;

    for (number, request) in requests.iter().enumerate() {
        let outcome = match solver::solve_with_limits(request, &catalog, limits) {
            Ok(outcome) => outcome,
            Err(error) => {
                eprintln!("region {}: {error}", number + 1);
                return ExitCode::FAILURE;
            }
        };

        match outcome.verdict() {
            Verdict::Packable => packable += 1,
            Verdict::Unknown => undecided += 1,
            Verdict::Unpackable => {}
        }

        if verbose {
            println!("{}", verdict_line(number + 1, request, &outcome));
        }
        if render {
            if let Some(tiling) = &outcome.tiling {
                print!(
                    "{}",
                    grid::render_tiling(request.width, request.height, tiling)
                );
                println!();
            }
        }
    }

    println!("packable regions: {packable} / {}", requests.len());
    if undecided > 0 {
        println!("undecided regions (node budget hit): {undecided}");
    }
    println!("elapsed: {:?}", start.elapsed());
    ExitCode::SUCCESS
}

/// Prints every shape with its distinct orientations.
fn run_shapes(input: &Path) -> ExitCode {
    let Some((catalog, _)) = load(input) else {
        return ExitCode::FAILURE;
    };

    print!("{}", shape_sheet(&catalog));
    ExitCode::SUCCESS
}

/// One human-readable verdict line for the solve listing.
fn verdict_line(number: usize, request: &RegionRequest, outcome: &PackOutcome) -> String {
    format!(
        "region {number} ({}x{}): {} [{} nodes]",
        request.width,
        request.height,
        outcome.verdict(),
        outcome.nodes
    )
}

/// Formats every shape with its distinct orientations, in id order.
fn shape_sheet(catalog: &ShapeCatalog) -> String {
    let mut output = String::new();
    for shape in catalog.shapes_by_id() {
        output.push_str(&format!(
            "shape {} ({} cells, {} variants):\n",
            shape.id(),
            shape.area(),
            shape.variants().len()
        ));
        for (index, variant) in shape.variants().iter().enumerate() {
            output.push_str(&format!("variant {}:\n", index + 1));
            output.push_str(&grid::render_cells(variant.cells()));
        }
        output.push('\n');
    }
    output
}
