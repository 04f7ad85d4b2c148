//! Solvability: possible-move detection and shuffling.
//!
//! A board is playable when at least one swap of two orthogonally adjacent
//! movable pieces would form a match. When a settled board has none, its
//! movable pieces are permuted (obstacles stay put) until it does.

use crate::board::Board;
use crate::core::{Cell, EngineError, TileSource};
use crate::matcher::{all_matches, match_if_swapped};

/// First swap that would form a match, scanning row-major and trying each
/// cell's neighbours up, left, right, down.
#[must_use]
pub fn find_possible_move(board: &Board) -> Option<(Cell, Cell)> {
    board
        .movable_cells()
        .into_iter()
        .flat_map(|cell| cell.orthogonal(board.width(), board.height()).map(move |other| (cell, other)))
        .find(|&(a, b)| match_if_swapped(board, a, b))
}

#[must_use]
pub fn has_possible_move(board: &Board) -> bool {
    find_possible_move(board).is_some()
}

/// Permute the movable pieces with a Fisher–Yates shuffle.
pub fn shuffle<R: TileSource>(board: &mut Board, rng: &mut R) -> Result<(), EngineError> {
    let cells = board.movable_cells();
    let mut order: Vec<usize> = (0..cells.len()).collect();
    for i in (1..order.len()).rev() {
        let j = rng.pick_index(i + 1);
        order.swap(i, j);
    }
    board.permute(&cells, &order)
}

/// Shuffle until the board has a possible move and no standing match.
///
/// Returns the number of shuffles performed. Fails with `UnsolvableBoard`
/// once `max_attempts` shuffles have not produced a playable board.
pub fn shuffle_until_solvable<R: TileSource>(
    board: &mut Board,
    rng: &mut R,
    max_attempts: u32,
) -> Result<u32, EngineError> {
    for attempt in 1..=max_attempts {
        shuffle(board, rng)?;
        if is_playable(board) {
            return Ok(attempt);
        }
    }
    Err(EngineError::UnsolvableBoard { attempts: max_attempts })
}

/// Has a possible move and nothing already matched.
#[must_use]
pub fn is_playable(board: &Board) -> bool {
    all_matches(board).is_empty() && has_possible_move(board)
}
