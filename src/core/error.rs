//! Engine error type.
//!
//! Errors split into three groups:
//! - Programmer errors (`InvalidCoordinate`, `InvalidConfig`) that a correct
//!   caller never triggers.
//! - Recoverable precondition failures (`CellOccupied`, `CellEmpty`,
//!   `NotAdjacent`, `NotMovable`, `CascadeInProgress`): retry with a
//!   different target or later.
//! - Fatal invariant violations (`CascadeOverflow`, `UnsolvableBoard`,
//!   `InvariantViolation`) that indicate a configuration or engine bug.
//!
//! Swaps that form no match and swaps attempted with no moves left are not
//! errors; they are reported through `SwapOutcome`.

use std::error::Error;
use std::fmt;

use super::{Cell, PieceId};

/// Errors returned by board and engine operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Coordinate outside the board.
    InvalidCoordinate(Cell),
    /// Spawn or move targeted a cell that already holds a piece.
    CellOccupied(Cell),
    /// Operation needed a piece but the cell is empty.
    CellEmpty(Cell),
    /// No piece with this id is on the board.
    PieceNotFound(PieceId),
    /// Swap between cells that are not orthogonal neighbours.
    NotAdjacent(Cell, Cell),
    /// Swap or typed ability targeted an obstacle.
    NotMovable(Cell),
    /// Gravity and rescans did not settle within the step cap.
    CascadeOverflow {
        /// Steps executed before giving up.
        steps: u32,
    },
    /// Shuffling never produced a playable board.
    UnsolvableBoard {
        /// Shuffles attempted.
        attempts: u32,
    },
    /// A new request arrived before the previous cascade settled.
    CascadeInProgress,
    /// Level configuration rejected by validation.
    InvalidConfig(String),
    /// Internal bookkeeping diverged.
    InvariantViolation(String),
}

impl EngineError {
    /// Errors that signal an engine or configuration bug rather than a
    /// rejected request.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::CascadeOverflow { .. }
                | Self::UnsolvableBoard { .. }
                | Self::InvariantViolation(_)
                | Self::InvalidCoordinate(_)
                | Self::InvalidConfig(_)
        )
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate(cell) => write!(f, "coordinate {cell} is outside the board"),
            Self::CellOccupied(cell) => write!(f, "cell {cell} is already occupied"),
            Self::CellEmpty(cell) => write!(f, "cell {cell} is empty"),
            Self::PieceNotFound(id) => write!(f, "{id} is not on the board"),
            Self::NotAdjacent(a, b) => write!(f, "cells {a} and {b} are not adjacent"),
            Self::NotMovable(cell) => write!(f, "piece at {cell} cannot be moved"),
            Self::CascadeOverflow { steps } => {
                write!(f, "cascade did not settle after {steps} steps")
            }
            Self::UnsolvableBoard { attempts } => {
                write!(f, "no playable board after {attempts} shuffles")
            }
            Self::CascadeInProgress => write!(f, "a cascade is still resolving"),
            Self::InvalidConfig(reason) => write!(f, "invalid level config: {reason}"),
            Self::InvariantViolation(reason) => write!(f, "board invariant violated: {reason}"),
        }
    }
}

impl Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            EngineError::CellOccupied(Cell::new(1, 2)).to_string(),
            "cell (1, 2) is already occupied"
        );
        assert_eq!(
            EngineError::UnsolvableBoard { attempts: 1000 }.to_string(),
            "no playable board after 1000 shuffles"
        );
    }

    #[test]
    fn test_fatal_classification() {
        assert!(EngineError::CascadeOverflow { steps: 10 }.is_fatal());
        assert!(EngineError::UnsolvableBoard { attempts: 3 }.is_fatal());
        assert!(!EngineError::CellEmpty(Cell::new(0, 0)).is_fatal());
        assert!(!EngineError::CascadeInProgress.is_fatal());
        assert!(!EngineError::NotAdjacent(Cell::new(0, 0), Cell::new(2, 0)).is_fatal());
    }
}
