//! Obstacle damage.
//!
//! Obstacles leave the board only when accumulated damage reaches their
//! durability. Damage arrives two ways:
//! - Splash: one hit to every obstacle in the 8-neighbourhood of a cleared
//!   match group
//! - Abilities: direct hits from line clears and bombs
//!
//! A destroyed obstacle is removed like any cleared piece but never credits
//! resources or score.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{Cell, EngineError, ObstacleKind, PieceKind};

/// Damage dealt to one obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleHit {
    pub cell: Cell,
    pub kind: ObstacleKind,
    pub amount: u32,
    /// Hits still needed after this one.
    pub remaining: u32,
    pub destroyed: bool,
}

/// Hit the obstacle at `cell`, removing it if destroyed.
///
/// Returns `Ok(None)` when the cell holds no obstacle.
pub fn damage_at(board: &mut Board, cell: Cell, amount: u32) -> Result<Option<ObstacleHit>, EngineError> {
    if !board.contains(cell) {
        return Err(EngineError::InvalidCoordinate(cell));
    }
    let Some(PieceKind::Obstacle { kind, durability }) = board.kind_mut(cell) else {
        return Ok(None);
    };

    let destroyed = durability.damage(amount);
    let hit = ObstacleHit {
        cell,
        kind: *kind,
        amount,
        remaining: durability.remaining(),
        destroyed,
    };
    if destroyed {
        board.remove(cell)?;
    }
    Ok(Some(hit))
}

/// Obstacles in the 8-neighbourhood of any of `cleared`, row-major, each
/// listed once.
#[must_use]
pub fn splash_targets<'a>(board: &Board, cleared: impl IntoIterator<Item = &'a Cell>) -> BTreeSet<Cell> {
    cleared
        .into_iter()
        .flat_map(|cell| cell.surrounding(board.width(), board.height()))
        .filter(|&cell| board.get(cell).is_some_and(|p| p.is_obstacle()))
        .collect()
}
