//! Gravity and refill.
//!
//! One [`Board::collapse_step`] moves every falling piece by at most one
//! row, then spawns fresh tiles into empty spawn-row cells. Obstacles never
//! move and block the column above them; a piece may slide diagonally into
//! a cell that nothing above could ever fill.

use crate::core::{Cell, EngineError, PieceMove, TileSource, TileType};

use super::Board;

/// Result of one or more gravity steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FallStep {
    pub moves: Vec<PieceMove>,
    pub spawned: Vec<(Cell, TileType)>,
}

impl FallStep {
    /// Nothing moved and nothing spawned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.spawned.is_empty()
    }

    fn absorb(&mut self, other: FallStep) {
        self.moves.extend(other.moves);
        self.spawned.extend(other.spawned);
    }
}

impl Board {
    /// Advance gravity by one row and refill the spawn row.
    pub fn collapse_step<R: TileSource>(
        &mut self,
        available: &[TileType],
        rng: &mut R,
    ) -> Result<FallStep, EngineError> {
        let mut step = FallStep::default();

        // Bottom-up so a piece that just fell is not visited again this step.
        for y in (0..self.height().saturating_sub(1)).rev() {
            for x in 0..self.width() {
                let from = Cell::new(x, y);
                let Some(piece) = self.get(from) else { continue };
                if !piece.is_movable() {
                    continue;
                }
                let id = piece.id();

                let below = Cell::new(x, y + 1);
                let target = if self.is_vacant(below) {
                    Some(below)
                } else {
                    self.diagonal_target(from)
                };

                if let Some(to) = target {
                    self.move_to(id, to)?;
                    step.moves.push(PieceMove { from, to });
                }
            }
        }

        if !available.is_empty() {
            for x in 0..self.width() {
                let cell = Cell::new(x, 0);
                if self.is_vacant(cell) {
                    let tile = available[rng.pick_index(available.len())];
                    self.spawn_tile(cell, tile)?;
                    step.spawned.push((cell, tile));
                }
            }
        }

        Ok(step)
    }

    /// Repeat [`Board::collapse_step`] until a step changes nothing.
    ///
    /// Fails with `CascadeOverflow` if the board is still moving after
    /// `max_steps` steps.
    pub fn settle<R: TileSource>(
        &mut self,
        available: &[TileType],
        rng: &mut R,
        max_steps: u32,
    ) -> Result<FallStep, EngineError> {
        let mut total = FallStep::default();
        for _ in 0..max_steps {
            let step = self.collapse_step(available, rng)?;
            if step.is_empty() {
                return Ok(total);
            }
            total.absorb(step);
        }
        Err(EngineError::CascadeOverflow { steps: max_steps })
    }

    /// Empty cell diagonally below `from` that no piece above it can reach.
    fn diagonal_target(&self, from: Cell) -> Option<Cell> {
        [-1isize, 1]
            .into_iter()
            .filter_map(|dx| from.offset(dx, 1, self.width(), self.height()))
            .find(|&cell| self.is_vacant(cell) && !self.is_fed_from_above(cell))
    }

    /// Whether something will fall straight into `cell` without help: a
    /// movable piece or the spawn row above it, with no obstacle in between.
    fn is_fed_from_above(&self, cell: Cell) -> bool {
        for y in (0..cell.y).rev() {
            if let Some(piece) = self.get(Cell::new(cell.x, y)) {
                return piece.is_movable();
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    const TYPES: [TileType; 4] = TileType::ALL;

    #[test]
    fn test_single_step_moves_one_row() {
        let mut board = Board::parse(&["W", ".", "."]).unwrap();
        let mut rng = GameRng::new(1);

        let step = board.collapse_step(&TYPES, &mut rng).unwrap();

        assert_eq!(step.moves, vec![PieceMove { from: Cell::new(0, 0), to: Cell::new(0, 1) }]);
        assert_eq!(step.spawned.len(), 1);
        assert_eq!(board.tile_at(Cell::new(0, 1)), Some(TileType::Water));
        assert!(board.get(Cell::new(0, 2)).is_none());
        assert!(board.verify().is_ok());
    }

    #[test]
    fn test_settle_fills_board() {
        let mut board = Board::parse(&["W..", "...", "S.E"]).unwrap();
        let mut rng = GameRng::new(2);

        let result = board.settle(&TYPES, &mut rng, 100).unwrap();

        assert!(board.vacant_cells().is_empty());
        assert_eq!(board.tile_at(Cell::new(0, 1)), Some(TileType::Water));
        assert_eq!(board.tile_at(Cell::new(0, 2)), Some(TileType::Sun));
        assert_eq!(result.spawned.len(), 6);
        assert!(board.verify().is_ok());
    }

    #[test]
    fn test_obstacles_do_not_fall() {
        let mut board = Board::parse(&["I", ".", "."]).unwrap();
        let mut rng = GameRng::new(3);

        let result = board.settle(&TYPES, &mut rng, 100).unwrap();

        assert!(result.is_empty());
        assert!(board.get(Cell::new(0, 0)).is_some_and(|p| p.is_obstacle()));
        assert_eq!(board.vacant_cells().len(), 2);
    }

    #[test]
    fn test_diagonal_fill_under_obstacle() {
        // The cell under the ice can only be reached diagonally.
        let mut board = Board::parse(&["WIS", "E.G", "SWE"]).unwrap();
        let mut rng = GameRng::new(4);

        board.settle(&TYPES, &mut rng, 100).unwrap();

        assert!(board.get(Cell::new(1, 1)).is_some());
        assert!(board.vacant_cells().is_empty());
        assert!(board.verify().is_ok());
    }

    #[test]
    fn test_no_diagonal_steal_from_open_column() {
        let mut board = Board::parse(&["WS", "E.", "GG"]).unwrap();
        let mut rng = GameRng::new(5);

        let step = board.collapse_step(&TYPES, &mut rng).unwrap();

        // Sun falls straight down; Water must not slide across.
        assert_eq!(step.moves, vec![PieceMove { from: Cell::new(1, 0), to: Cell::new(1, 1) }]);
    }

    #[test]
    fn test_settle_overflow() {
        let mut board = Board::parse(&["W", ".", ".", "."]).unwrap();
        let mut rng = GameRng::new(6);

        assert_eq!(
            board.settle(&TYPES, &mut rng, 1),
            Err(EngineError::CascadeOverflow { steps: 1 })
        );
    }
}
