//! Board events.
//!
//! Every state change the engine makes is recorded as a `BoardEvent`.
//! Presentation layers replay them to animate; tests read them to check
//! what happened and in which order.

use serde::{Deserialize, Serialize};

use super::{Cell, ObstacleKind, TileType};
use crate::abilities::AbilityEffect;

/// A piece sliding from one cell to another during gravity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceMove {
    pub from: Cell,
    pub to: Cell,
}

/// Something that happened on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// Board filled at level start.
    Initialized { obstacles: usize, moves: u32 },

    /// A swap formed a match and consumed a move.
    SwapAccepted { a: Cell, b: Cell, moves_left: u32 },

    /// A swap was undone without side effects.
    SwapReverted { a: Cell, b: Cell },

    /// One gravity step moved pieces.
    PiecesFell { moves: Vec<PieceMove> },

    /// New pieces appeared in the spawn row.
    PiecesSpawned { cells: Vec<(Cell, TileType)> },

    /// A match group was found during a rescan.
    MatchFound { tile: TileType, cells: Vec<Cell>, score: u32 },

    /// Normal pieces were removed.
    PiecesCleared { cells: Vec<(Cell, TileType)> },

    /// An obstacle took damage.
    ObstacleDamaged { cell: Cell, kind: ObstacleKind, remaining: u32, destroyed: bool },

    /// An ability was applied before its cascade.
    AbilityApplied { effect: AbilityEffect },

    /// Movable pieces were permuted.
    Shuffled { attempts: u32 },

    /// The last move was spent. Emitted once per level.
    MovesDepleted,

    /// A cascade finished.
    Settled { score: u32, obstacles_remaining: usize },
}
