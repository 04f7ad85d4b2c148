//! # rust-match3
//!
//! A headless rules engine for tile-matching puzzles.
//!
//! ## Design Principles
//!
//! 1. **Reproducible**: All randomness flows through seeded, per-purpose
//!    streams. The same seed and the same requests give the same board.
//!
//! 2. **Steppable**: Cascades are a state machine advanced one transition
//!    at a time. The engine never sleeps or blocks; presentation layers
//!    decide the pacing.
//!
//! 3. **Injected Collaborators**: Resource ledgers, goal trackers and settle
//!    hooks are handed in per request, never looked up globally.
//!
//! ## Architecture
//!
//! - **Board**: Slot array, per-piece coordinates and an id index kept in
//!   lockstep. `Board::verify` checks all three agree.
//!
//! - **Events**: Every mutation is recorded as a `BoardEvent` in a
//!   persistent `im` vector, cheap to clone and replay.
//!
//! ## Modules
//!
//! - `core`: Cells, pieces, configuration, errors, events, RNG
//! - `board`: Cell storage, gravity and refill, snapshots
//! - `matcher`: Run detection and match groups
//! - `obstacles`: Durability damage and splash
//! - `abilities`: Line clears, bombs and type clears
//! - `scoring`: Move budget, match scores, star ratings
//! - `solver`: Possible-move detection and shuffling
//! - `resolver`: The cascade state machine
//! - `ledger`: Resource and goal collaborators
//! - `engine`: The `MatchEngine` facade

pub mod core;
pub mod board;
pub mod matcher;
pub mod obstacles;
pub mod abilities;
pub mod scoring;
pub mod solver;
pub mod resolver;
pub mod ledger;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Cell, TileType, ObstacleKind, Durability, PieceKind, Piece, PieceId,
    LevelConfig, ObstacleSpec, ScoreTable,
    EngineError, BoardEvent, PieceMove,
    GameRng, RngStreams, TileSource,
};

pub use crate::board::{Board, BoardSnapshot, CellContent, CellView, FallStep};

pub use crate::matcher::{all_matches, find_groups, match_at, MatchGroup};

pub use crate::abilities::{AbilityDef, AbilityEffect, AbilityKind, AbilityOutcome};

pub use crate::scoring::{score_for_match_size, star_rating, MoveBudget, ScoreState};

pub use crate::solver::{find_possible_move, has_possible_move};

pub use crate::resolver::{CascadePhase, CascadeReport, CascadeStep, ResolveContext, SettleReport};

pub use crate::ledger::{
    CollectGoal, CollectGoals, GoalTracker, ResourceBank, ResourceCost, ResourceLedger,
};

pub use crate::engine::{AbilityResolution, MatchEngine, RevertReason, SwapOutcome, SwapStart};
