//! Core engine types: coordinates, pieces, configuration, errors, events, RNG.
//!
//! Everything here is plain data. Board mutation lives in `board`, rules in
//! `matcher`, `resolver` and friends.

pub mod cell;
pub mod piece;
pub mod config;
pub mod error;
pub mod event;
pub mod rng;

pub use cell::Cell;
pub use piece::{Durability, ObstacleKind, Piece, PieceId, PieceKind, TileType};
pub use config::{LevelConfig, ObstacleSpec, ScoreTable, EXTRA_PIECE_BONUS};
pub use error::EngineError;
pub use event::{BoardEvent, PieceMove};
pub use rng::{GameRng, RngStreams, TileSource};
