//! Read-only board view for renderers.

use serde::{Deserialize, Serialize};

use crate::core::{Cell, ObstacleKind, PieceKind, TileType};

use super::Board;

/// What a renderer needs to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Tile(TileType),
    Obstacle(ObstacleKind),
}

/// One occupied cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    pub content: CellContent,
    pub is_obstacle: bool,
    /// Remaining durability in `[0, 1]`; always 1 for tiles.
    pub durability: f32,
}

/// Row-major grid of cell views.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Option<CellView>>,
}

impl BoardSnapshot {
    /// Capture the current board.
    #[must_use]
    pub fn capture(board: &Board) -> Self {
        let cells = board
            .cells()
            .map(|cell| {
                board.get(cell).map(|piece| match piece.kind() {
                    PieceKind::Normal(tile) => CellView {
                        content: CellContent::Tile(tile),
                        is_obstacle: false,
                        durability: 1.0,
                    },
                    PieceKind::Obstacle { kind, durability } => CellView {
                        content: CellContent::Obstacle(kind),
                        is_obstacle: true,
                        durability: durability.fraction(),
                    },
                })
            })
            .collect();

        Self { width: board.width(), height: board.height(), cells }
    }

    /// View at a cell; `None` when empty or out of bounds.
    #[must_use]
    pub fn at(&self, cell: Cell) -> Option<&CellView> {
        if cell.x >= self.width || cell.y >= self.height {
            return None;
        }
        self.cells[cell.y * self.width + cell.x].as_ref()
    }
}
