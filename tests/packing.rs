//! End-to-end tests: parse a puzzle file, solve its regions, check the
//! verdicts and the reported tilings.

use rustc_hash::FxHashMap;

use polypack::parse::parse_input;
use polypack::solver::{self, RegionRequest, SearchLimits, SolveError, Verdict};

/// Shape 0 is an L tetromino, 1 a square tetromino, 2 a domino, 3 a
/// monomino. The regions mix searched successes, searched failures and an
/// area mismatch.
const PUZZLE: &str = "\
0:
#.
#.
##

1:
##
##

2:
##

3:
#

4x2: 2
2x2: 0 1
4x2: 1 1
3x3: 0 0 4
3x3: 0 0 4 1
";

const EXPECTED: [bool; 5] = [true, true, false, false, true];

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_mixed_regions_end_to_end() {
    init_logging();
    let (catalog, requests) = parse_input(PUZZLE).unwrap();
    assert_eq!(catalog.len(), 4);
    assert_eq!(requests.len(), EXPECTED.len());

    for (index, (request, &expected)) in requests.iter().zip(EXPECTED.iter()).enumerate() {
        let outcome = solver::solve(request, &catalog).unwrap();
        log::debug!(
            "region {}: {} after {} nodes",
            index + 1,
            outcome.verdict(),
            outcome.nodes
        );
        assert_eq!(
            outcome.tiling.is_some(),
            expected,
            "wrong verdict for region {}",
            index + 1
        );
        assert!(outcome.exhausted, "unbounded search must run to an answer");
    }
}

#[test]
fn test_found_tilings_cover_exactly() {
    init_logging();
    let (catalog, requests) = parse_input(PUZZLE).unwrap();

    for request in &requests {
        let outcome = solver::solve(request, &catalog).unwrap();
        let Some(tiling) = &outcome.tiling else {
            continue;
        };

        let mut coverage = vec![0usize; request.width * request.height];
        let mut used: FxHashMap<usize, usize> = FxHashMap::default();
        for placed in tiling {
            *used.entry(placed.shape).or_insert(0) += 1;
            for &(row, col) in &placed.cells {
                coverage[row as usize * request.width + col as usize] += 1;
            }
        }

        assert!(
            coverage.iter().all(|&count| count == 1),
            "tiling of {}x{} does not cover exactly once",
            request.width,
            request.height
        );
        for (&id, &count) in &request.demand {
            if count > 0 {
                assert_eq!(
                    used.get(&id),
                    Some(&count),
                    "tiling uses the wrong number of shape {id}"
                );
            }
        }
    }
}

#[test]
fn test_area_mismatch_short_circuits() {
    let (catalog, requests) = parse_input(PUZZLE).unwrap();
    // four dominoes cannot cover nine cells
    let outcome = solver::solve(&requests[3], &catalog).unwrap();
    assert_eq!(outcome.verdict(), Verdict::Unpackable);
    assert_eq!(outcome.nodes, 0);
}

#[test]
fn test_count_for_uncatalogued_shape_is_an_error() {
    let (catalog, requests) = parse_input("0:\n#\n\n2x1: 1 2\n").unwrap();
    let error = solver::solve(&requests[0], &catalog).unwrap_err();
    assert_eq!(error, SolveError::UnknownShape { id: 1 });
}

#[test]
fn test_node_budget_end_to_end() {
    init_logging();
    let (catalog, _) = parse_input(PUZZLE).unwrap();

    // thirty monominoes need one node per cell plus the terminal node
    let request = RegionRequest::new(6, 5, [(3, 30)]);
    let limits = SearchLimits {
        max_nodes: Some(10),
    };
    let outcome = solver::solve_with_limits(&request, &catalog, limits).unwrap();

    assert_eq!(outcome.verdict(), Verdict::Unknown);
    assert!(!outcome.exhausted);

    let outcome = solver::solve(&request, &catalog).unwrap();
    assert_eq!(outcome.verdict(), Verdict::Packable);
    assert_eq!(outcome.nodes, 31);
}

#[test]
fn test_pentomino_pair_fills_two_by_five() {
    init_logging();
    // P pentomino: a 2x2 block with one extra cell
    let (catalog, requests) = parse_input("0:\n##\n##\n#.\n\n5x2: 2\n").unwrap();
    let outcome = solver::solve(&requests[0], &catalog).unwrap();

    assert_eq!(outcome.verdict(), Verdict::Packable);
    let tiling = outcome.tiling.unwrap();
    assert_eq!(tiling.len(), 2);
    assert!(tiling.iter().all(|placed| placed.shape == 0));
}
