//! Ability kinds, resolved effects and their purchase definitions.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{Cell, EngineError, TileType};
use crate::ledger::{ResourceBank, ResourceCost};

/// Which ability the player picked, before a target is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    RowClear,
    ColumnClear,
    AreaBomb,
    ClearAllOfType,
}

/// An ability bound to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityEffect {
    /// Every cell in row `y`.
    RowClear(usize),

    /// Every cell in column `x`.
    ColumnClear(usize),

    /// The 3×3 block centred on a cell, clipped to the board.
    AreaBomb(Cell),

    /// Every normal piece of one type.
    ClearAllOfType(TileType),
}

impl AbilityEffect {
    /// Bind `kind` to the clicked cell.
    ///
    /// `ClearAllOfType` takes its type from the tile at `target`, so the
    /// target must hold a normal piece.
    pub fn resolve(kind: AbilityKind, target: Cell, board: &Board) -> Result<Self, EngineError> {
        if !board.contains(target) {
            return Err(EngineError::InvalidCoordinate(target));
        }
        Ok(match kind {
            AbilityKind::RowClear => Self::RowClear(target.y),
            AbilityKind::ColumnClear => Self::ColumnClear(target.x),
            AbilityKind::AreaBomb => Self::AreaBomb(target),
            AbilityKind::ClearAllOfType => {
                let piece = board.get(target).ok_or(EngineError::CellEmpty(target))?;
                Self::ClearAllOfType(piece.tile().ok_or(EngineError::NotMovable(target))?)
            }
        })
    }

    #[must_use]
    pub fn kind(&self) -> AbilityKind {
        match self {
            Self::RowClear(_) => AbilityKind::RowClear,
            Self::ColumnClear(_) => AbilityKind::ColumnClear,
            Self::AreaBomb(_) => AbilityKind::AreaBomb,
            Self::ClearAllOfType(_) => AbilityKind::ClearAllOfType,
        }
    }

    /// Damage dealt to each obstacle in the area. Zero means obstacles are
    /// left alone.
    #[must_use]
    pub fn obstacle_damage(&self) -> u32 {
        match self {
            Self::RowClear(_) | Self::ColumnClear(_) => 1,
            Self::AreaBomb(_) => 2,
            Self::ClearAllOfType(_) => 0,
        }
    }

    /// Cells the effect covers, row-major.
    pub fn cells(&self, board: &Board) -> Result<Vec<Cell>, EngineError> {
        let (width, height) = (board.width(), board.height());
        match *self {
            Self::RowClear(y) => {
                if y >= height {
                    return Err(EngineError::InvalidCoordinate(Cell::new(0, y)));
                }
                Ok((0..width).map(|x| Cell::new(x, y)).collect())
            }
            Self::ColumnClear(x) => {
                if x >= width {
                    return Err(EngineError::InvalidCoordinate(Cell::new(x, 0)));
                }
                Ok((0..height).map(|y| Cell::new(x, y)).collect())
            }
            Self::AreaBomb(center) => {
                if !board.contains(center) {
                    return Err(EngineError::InvalidCoordinate(center));
                }
                let mut cells: Vec<Cell> = center.surrounding(width, height).collect();
                cells.push(center);
                cells.sort();
                Ok(cells)
            }
            Self::ClearAllOfType(tile) => Ok(board
                .pieces()
                .filter(|piece| piece.tile() == Some(tile))
                .map(|piece| piece.cell())
                .collect()),
        }
    }
}

/// A purchasable ability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDef {
    pub kind: AbilityKind,
    pub cost: ResourceCost,
    pub title: String,
}

impl AbilityDef {
    pub fn new(kind: AbilityKind, cost: ResourceCost, title: impl Into<String>) -> Self {
        Self { kind, cost, title: title.into() }
    }

    #[must_use]
    pub fn is_affordable(&self, bank: &ResourceBank) -> bool {
        bank.has(&self.cost)
    }
}
