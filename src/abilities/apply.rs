use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{Cell, EngineError, PieceKind, TileType};
use crate::obstacles::{damage_at, ObstacleHit};

use super::AbilityEffect;

/// What an ability did to the board before the follow-up cascade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityOutcome {
    pub effect: AbilityEffect,

    /// Normal pieces removed, row-major.
    pub cleared: Vec<(Cell, TileType)>,

    /// Obstacles hit, row-major. Destroyed ones are no longer on the board.
    pub damaged_obstacles: Vec<ObstacleHit>,
}

/// Clear the effect's area.
///
/// Normal pieces are removed. Obstacles take the effect's damage and stay
/// unless destroyed. The caller credits the cleared pieces and runs the
/// cascade.
pub fn apply_effect(board: &mut Board, effect: AbilityEffect) -> Result<AbilityOutcome, EngineError> {
    let damage = effect.obstacle_damage();
    let mut outcome = AbilityOutcome { effect, cleared: Vec::new(), damaged_obstacles: Vec::new() };

    for cell in effect.cells(board)? {
        match board.get(cell).map(|piece| piece.kind()) {
            Some(PieceKind::Normal(tile)) => {
                board.remove(cell)?;
                outcome.cleared.push((cell, tile));
            }
            Some(PieceKind::Obstacle { .. }) if damage > 0 => {
                if let Some(hit) = damage_at(board, cell, damage)? {
                    outcome.damaged_obstacles.push(hit);
                }
            }
            _ => {}
        }
    }
    Ok(outcome)
}
