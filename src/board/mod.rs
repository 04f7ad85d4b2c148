//! The board: cell storage, piece lifecycle, gravity and refill.
//!
//! - `Board`: owns the grid and the primitive mutations (spawn, remove,
//!   move, swap). It never matches or scores on its own.
//! - Gravity: `collapse_step` / `settle` drop pieces into gaps and spawn new
//!   tiles in the top row.
//! - `BoardSnapshot`: read-only view for rendering.

mod grid;
mod gravity;
mod snapshot;

pub use grid::Board;
pub use gravity::FallStep;
pub use snapshot::{BoardSnapshot, CellContent, CellView};
