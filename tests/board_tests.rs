//! Board, matcher and snapshot integration tests.

use rust_match3::board::{Board, BoardSnapshot, CellContent};
use rust_match3::core::{Cell, EngineError, GameRng, LevelConfig, ObstacleKind, ObstacleSpec, TileType};
use rust_match3::engine::MatchEngine;
use rust_match3::matcher::{all_matches, find_groups, match_at, match_if_swapped};

/// Diagonal stripes with a three-run at the left of the top row.
const RUN_ON_TOP: [&str; 8] = [
    "WWWSEGSE",
    "SEGWSEGW",
    "EGWSEGWS",
    "GWSEGWSE",
    "WSEGWSEG",
    "SEGWSEGW",
    "EGWSEGWS",
    "GWSEGWSE",
];

/// Diagonal stripes without any run.
const NO_RUNS: [&str; 8] = [
    "WSEGWSEG",
    "SEGWSEGW",
    "EGWSEGWS",
    "GWSEGWSE",
    "WSEGWSEG",
    "SEGWSEGW",
    "EGWSEGWS",
    "GWSEGWSE",
];

// =============================================================================
// Matcher
// =============================================================================

/// The three leading tiles match through their middle.
#[test]
fn test_match_at_top_row() {
    let board = Board::parse(&RUN_ON_TOP).unwrap();

    let run = match_at(&board, Cell::new(1, 0), None).unwrap();
    let expected: Vec<Cell> = (0..3).map(|x| Cell::new(x, 0)).collect();
    assert_eq!(run.into_iter().collect::<Vec<_>>(), expected);

    assert_eq!(all_matches(&board).len(), 3);
    assert_eq!(match_at(&board, Cell::new(3, 0), None), None);
}

#[test]
fn test_no_runs() {
    let board = Board::parse(&NO_RUNS).unwrap();
    assert!(all_matches(&board).is_empty());
    assert!(find_groups(&board).is_empty());
}

/// An L shape is a single group scored once.
#[test]
fn test_l_shape_is_one_group() {
    let board = Board::parse(&["WWWS", "WSES", "WEGE"]).unwrap();

    let groups = find_groups(&board);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].tile, TileType::Water);
    assert_eq!(groups[0].len(), 5);
    assert_eq!(match_at(&board, Cell::new(0, 0), None).map(|cells| cells.len()), Some(5));
}

/// Simulated pivots answer "what if this cell held that tile".
#[test]
fn test_simulated_pivot() {
    let board = Board::parse(&["WWSE", "GEGS"]).unwrap();
    assert!(match_at(&board, Cell::new(2, 0), Some(TileType::Water)).is_some());
    assert!(match_at(&board, Cell::new(2, 0), None).is_none());
    assert!(!match_if_swapped(&board, Cell::new(2, 0), Cell::new(3, 0)));
}

/// Runs stop at obstacles and gaps.
#[test]
fn test_runs_break_on_obstacles() {
    let board = Board::parse(&["WWIWW", "SS.SS"]).unwrap();
    assert!(all_matches(&board).is_empty());
}

// =============================================================================
// Board Mutations
// =============================================================================

/// Gravity keeps the slot array and coordinates in step.
#[test]
fn test_gravity_keeps_coordinates() {
    let mut board = Board::parse(&["WSE", "...", "G.S", "..."]).unwrap();
    let mut rng = GameRng::new(4);

    board.settle(&TileType::ALL, &mut rng, 50).unwrap();

    assert!(board.vacant_cells().is_empty());
    for piece in board.pieces() {
        assert_eq!(board.get(piece.cell()).map(|p| p.id()), Some(piece.id()));
    }
    assert!(board.verify().is_ok());
}

/// A piece under an obstacle cannot be reached from above, so the piece
/// beside it slides in diagonally.
#[test]
fn test_diagonal_fill_under_obstacle() {
    let mut board = Board::parse(&["WS", "IE", ".G"]).unwrap();
    let mut rng = GameRng::new(1);

    board.settle(&TileType::ALL, &mut rng, 50).unwrap();

    assert!(board.get(Cell::new(0, 2)).is_some());
    assert!(board.get(Cell::new(0, 1)).is_some_and(|p| p.is_obstacle()));
    assert!(board.vacant_cells().is_empty());
    assert!(board.verify().is_ok());
}

#[test]
fn test_swap_requires_adjacency() {
    let mut board = Board::parse(&["WSE"]).unwrap();
    assert_eq!(
        board.swap(Cell::new(0, 0), Cell::new(2, 0)),
        Err(EngineError::NotAdjacent(Cell::new(0, 0), Cell::new(2, 0)))
    );
}

// =============================================================================
// Snapshots
// =============================================================================

/// Snapshots report obstacle damage as a fraction.
#[test]
fn test_snapshot_of_engine() {
    let config = LevelConfig::new(6, 6)
        .with_obstacle(ObstacleSpec::new(ObstacleKind::Overgrowth, 4))
        .with_obstacle_count(2)
        .with_obstacle_spawn_chance(1.0);
    let engine = MatchEngine::new(config, 21).unwrap();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.cells.len(), 36);

    let obstacles: Vec<_> = snapshot.cells.iter().flatten().filter(|view| view.is_obstacle).collect();
    assert_eq!(obstacles.len(), 2);
    for view in obstacles {
        assert_eq!(view.content, CellContent::Obstacle(ObstacleKind::Overgrowth));
        assert!((view.durability - 1.0).abs() < f32::EPSILON);
    }

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: BoardSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snapshot);
}
