//! Run detection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::board::Board;
use crate::core::{Cell, TileType};

/// Shortest run that counts as a match.
pub const MIN_MATCH: usize = 3;

/// A connected set of matched cells of one tile type, scored once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchGroup {
    pub tile: TileType,
    pub cells: BTreeSet<Cell>,
}

impl MatchGroup {
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Cells matched through `pivot`.
///
/// The pivot's type is `simulated` if given, otherwise the tile on the
/// board. Returns `None` when neither the horizontal nor the vertical run
/// through the pivot reaches [`MIN_MATCH`]. Qualifying runs are unioned, so
/// an L, T or cross counts once.
#[must_use]
pub fn match_at(board: &Board, pivot: Cell, simulated: Option<TileType>) -> Option<BTreeSet<Cell>> {
    if !board.contains(pivot) {
        return None;
    }
    let tile = simulated.or_else(|| board.tile_at(pivot))?;
    runs_through(board, pivot, tile, |cell| board.tile_at(cell))
}

/// Whether swapping the pieces at `a` and `b` would form a match at either
/// cell. The board is not modified.
#[must_use]
pub fn match_if_swapped(board: &Board, a: Cell, b: Cell) -> bool {
    if !a.is_adjacent(b) || !board.is_movable_at(a) || !board.is_movable_at(b) {
        return false;
    }
    let (Some(tile_a), Some(tile_b)) = (board.tile_at(a), board.tile_at(b)) else {
        return false;
    };
    if tile_a == tile_b {
        return false;
    }

    let swapped = |cell: Cell| {
        if cell == a {
            Some(tile_b)
        } else if cell == b {
            Some(tile_a)
        } else {
            board.tile_at(cell)
        }
    };

    runs_through(board, b, tile_a, swapped).is_some() || runs_through(board, a, tile_b, swapped).is_some()
}

/// Union of every match on the board.
#[must_use]
pub fn all_matches(board: &Board) -> BTreeSet<Cell> {
    let mut matched = BTreeSet::new();
    for cell in board.cells() {
        if let Some(cells) = match_at(board, cell, None) {
            matched.extend(cells);
        }
    }
    matched
}

/// Every match on the board, merged into groups of overlapping runs.
///
/// Groups are ordered by their first cell, row-major.
#[must_use]
pub fn find_groups(board: &Board) -> Vec<MatchGroup> {
    let mut groups: Vec<MatchGroup> = Vec::new();

    for cell in board.cells() {
        let (Some(tile), Some(cells)) = (board.tile_at(cell), match_at(board, cell, None)) else {
            continue;
        };

        let mut merged = MatchGroup { tile, cells };
        let mut i = 0;
        while i < groups.len() {
            if groups[i].tile == tile && !groups[i].cells.is_disjoint(&merged.cells) {
                let absorbed = groups.swap_remove(i);
                merged.cells.extend(absorbed.cells);
            } else {
                i += 1;
            }
        }
        groups.push(merged);
    }

    groups.sort_by_key(|group| group.cells.first().copied());
    groups
}

fn runs_through<F>(board: &Board, pivot: Cell, tile: TileType, lookup: F) -> Option<BTreeSet<Cell>>
where
    F: Fn(Cell) -> Option<TileType>,
{
    let mut matched = BTreeSet::new();
    for (dx, dy) in [(1, 0), (0, 1)] {
        let run = line(board, pivot, tile, &lookup, dx, dy);
        if run.len() >= MIN_MATCH {
            matched.extend(run);
        }
    }
    (!matched.is_empty()).then_some(matched)
}

/// Pivot plus the contiguous same-type cells on both sides along one axis.
fn line<F>(board: &Board, pivot: Cell, tile: TileType, lookup: &F, dx: isize, dy: isize) -> SmallVec<[Cell; 8]>
where
    F: Fn(Cell) -> Option<TileType>,
{
    let mut run: SmallVec<[Cell; 8]> = smallvec![pivot];
    for sign in [-1, 1] {
        let mut current = pivot;
        while let Some(next) = current.offset(sign * dx, sign * dy, board.width(), board.height()) {
            if lookup(next) != Some(tile) {
                break;
            }
            run.push(next);
            current = next;
        }
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(list: &[(usize, usize)]) -> BTreeSet<Cell> {
        list.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn test_horizontal_run() {
        let board = Board::parse(&["WWWS", "SEGE"]).unwrap();
        assert_eq!(match_at(&board, Cell::new(1, 0), None), Some(cells(&[(0, 0), (1, 0), (2, 0)])));
        assert_eq!(match_at(&board, Cell::new(3, 0), None), None);
    }

    #[test]
    fn test_vertical_run() {
        let board = Board::parse(&["S", "S", "S", "S", "W"]).unwrap();
        let run = match_at(&board, Cell::new(0, 0), None).unwrap();
        assert_eq!(run.len(), 4);
    }

    #[test]
    fn test_l_shape_unions() {
        let board = Board::parse(&["GGG", "GSE", "GEW"]).unwrap();
        let corner = match_at(&board, Cell::new(0, 0), None).unwrap();
        assert_eq!(corner, cells(&[(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)]));

        let arm = match_at(&board, Cell::new(2, 0), None).unwrap();
        assert_eq!(arm.len(), 3);
    }

    #[test]
    fn test_runs_stop_at_gaps_and_obstacles() {
        let board = Board::parse(&["WW.W", "EEIE"]).unwrap();
        assert!(all_matches(&board).is_empty());
    }

    #[test]
    fn test_simulated_type() {
        let board = Board::parse(&["WWSE"]).unwrap();
        assert_eq!(match_at(&board, Cell::new(2, 0), None), None);
        assert_eq!(
            match_at(&board, Cell::new(2, 0), Some(TileType::Water)),
            Some(cells(&[(0, 0), (1, 0), (2, 0)]))
        );
    }

    #[test]
    fn test_match_if_swapped() {
        // Swapping (2,0) and (2,1) lines up three Water.
        let board = Board::parse(&["WWS", "EGW"]).unwrap();
        assert!(match_if_swapped(&board, Cell::new(2, 0), Cell::new(2, 1)));
        assert!(match_if_swapped(&board, Cell::new(2, 1), Cell::new(2, 0)));
        assert!(!match_if_swapped(&board, Cell::new(0, 0), Cell::new(0, 1)));
    }

    #[test]
    fn test_match_if_swapped_ignores_partner_cell() {
        // Moving the left Water right leaves Sun behind; no run forms.
        let board = Board::parse(&["WSWE"]).unwrap();
        assert!(!match_if_swapped(&board, Cell::new(0, 0), Cell::new(1, 0)));
    }

    #[test]
    fn test_groups_merge_crossings() {
        let board = Board::parse(&["SGSE", "GGGW", "SGEW"]).unwrap();
        let groups = find_groups(&board);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].tile, TileType::Grass);
        assert_eq!(groups[0].len(), 5);
    }

    #[test]
    fn test_groups_keep_separate_runs_apart() {
        let board = Board::parse(&["WWWE", "EEES", "WSGW"]).unwrap();
        let groups = find_groups(&board);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].tile, TileType::Water);
        assert_eq!(groups[1].tile, TileType::Earth);
    }

    #[test]
    fn test_all_matches_order_independent_union() {
        let board = Board::parse(&["WWWS", "SGGG", "ESEW"]).unwrap();
        let matched = all_matches(&board);
        assert_eq!(matched, cells(&[(0, 0), (1, 0), (2, 0), (1, 1), (2, 1), (3, 1)]));
    }
}
