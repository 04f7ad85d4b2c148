//! Solvability integration tests: possible moves, shuffles, refresh.

use rust_match3::board::Board;
use rust_match3::core::{BoardEvent, Cell, EngineError, GameRng, LevelConfig, ObstacleKind, ObstacleSpec, TileType};
use rust_match3::engine::MatchEngine;
use rust_match3::matcher::{all_matches, match_if_swapped};
use rust_match3::solver::{find_possible_move, has_possible_move, shuffle_until_solvable};

/// No swap on this board lines up three.
const DEAD: [&str; 3] = ["WSE", "EWS", "SEW"];

// =============================================================================
// Possible Moves
// =============================================================================

/// The first move is found scanning row-major.
#[test]
fn test_first_move_row_major() {
    // Swapping (0,0) down completes the top row.
    let board = Board::parse(&["SWWE", "WEGS", "GSEG"]).unwrap();
    let (a, b) = find_possible_move(&board).unwrap();

    assert_eq!(a, Cell::new(0, 0));
    assert!(match_if_swapped(&board, a, b));
}

#[test]
fn test_dead_board_has_no_move() {
    let board = Board::parse(&DEAD).unwrap();
    assert!(!has_possible_move(&board));
}

/// Asking twice without mutating gives the same answer.
#[test]
fn test_possible_move_idempotent() {
    let board = Board::parse(&["SWWE", "WEGS", "GSEG"]).unwrap();
    assert_eq!(find_possible_move(&board), find_possible_move(&board));
    assert_eq!(has_possible_move(&board), has_possible_move(&board));
}

// =============================================================================
// Shuffling
// =============================================================================

/// Shuffling a dead board yields a playable one with the same pieces.
#[test]
fn test_shuffle_revives_dead_board() {
    let mut board = Board::parse(&DEAD).unwrap();
    let ids: Vec<_> = board.pieces().map(|p| p.id()).collect();
    let mut rng = GameRng::new(17);

    let attempts = shuffle_until_solvable(&mut board, &mut rng, 1000).unwrap();

    assert!(attempts >= 1);
    assert!(has_possible_move(&board));
    assert!(all_matches(&board).is_empty());
    for id in ids {
        assert!(board.piece(id).is_some());
    }
    assert!(board.verify().is_ok());
}

/// Boards too small for any run give up after the retry cap.
#[test]
fn test_unsolvable_board_fails() {
    let config = LevelConfig::new(2, 2).with_max_shuffle_attempts(10);
    assert_eq!(MatchEngine::new(config, 0).err(), Some(EngineError::UnsolvableBoard { attempts: 10 }));
}

/// A single tile type cannot produce a playable board either.
#[test]
fn test_single_type_is_unsolvable() {
    let config = LevelConfig::new(4, 4).with_types(vec![TileType::Grass]).with_max_shuffle_attempts(5);
    assert!(matches!(MatchEngine::new(config, 0), Err(EngineError::UnsolvableBoard { attempts: 5 })));
}

// =============================================================================
// Refresh And Hints
// =============================================================================

/// A manual refresh shuffles without spending a move.
#[test]
fn test_refresh_keeps_budget() {
    let config = LevelConfig::new(6, 6)
        .with_obstacle(ObstacleSpec::standard(ObstacleKind::Ice))
        .with_obstacle_count(3)
        .with_obstacle_spawn_chance(0.5);
    let mut engine = MatchEngine::new(config, 8).unwrap();
    let moves = engine.moves_remaining();
    let obstacles: Vec<Cell> = engine.board().pieces().filter(|p| p.is_obstacle()).map(|p| p.cell()).collect();

    let attempts = engine.refresh().unwrap();

    assert!(attempts >= 1);
    assert_eq!(engine.moves_remaining(), moves);
    assert!(engine.hint().is_some());
    for cell in obstacles {
        assert!(engine.board().get(cell).is_some_and(|p| p.is_obstacle()));
    }
    assert!(matches!(engine.history().last(), Some(BoardEvent::Shuffled { .. })));
}

/// The hint is a swap the engine will accept.
#[test]
fn test_hint_is_playable() {
    let engine = MatchEngine::new(LevelConfig::new(8, 8), 12).unwrap();
    let (a, b) = engine.hint().unwrap();
    assert!(a.is_adjacent(b));
    assert!(match_if_swapped(engine.board(), a, b));
}
