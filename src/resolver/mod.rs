//! Cascade resolution.
//!
//! After a swap or an ability the board runs a cascade:
//!
//! ```text
//! Idle → Gravity → Rescan → Clearing → Gravity → … → Rescan → Settled → Idle
//! ```
//!
//! - **Gravity**: one row of falling plus spawn-row refill per step, until a
//!   step moves nothing
//! - **Rescan**: find match groups; none means the cascade is settling
//! - **Clearing**: score each group once, splash nearby obstacles, remove
//!   the matched pieces and credit the ledger
//! - **Settled**: reshuffle if no move remains (unless every obstacle is
//!   gone), report, return to idle
//!
//! [`Cascade::step`] advances one transition and returns what changed, so
//! a presentation layer can pace and animate it. Steps that change nothing
//! fall through to the next phase within the same call.

mod cascade;
mod context;

pub use cascade::{Cascade, Playfield};
pub use context::ResolveContext;

use serde::{Deserialize, Serialize};

use crate::board::FallStep;
use crate::core::{Cell, TileType};
use crate::matcher::MatchGroup;
use crate::obstacles::ObstacleHit;

/// Where a cascade currently stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadePhase {
    #[default]
    Idle,
    Gravity,
    Rescan,
    Clearing,
    Settled,
}

/// What one call to [`Cascade::step`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum CascadeStep {
    /// Pieces fell and spawned.
    Fell(FallStep),

    /// Match groups found, cleared on the next step.
    Matched(Vec<MatchGroup>),

    /// Matched pieces removed.
    Cleared {
        cleared: Vec<(Cell, TileType)>,
        hits: Vec<ObstacleHit>,
        score: u32,
    },

    /// The cascade finished.
    Settled(SettleReport),

    /// No cascade was running.
    Idle,
}

/// Board state at the end of a cascade.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettleReport {
    /// Total score after the cascade.
    pub score: u32,
    pub obstacles_remaining: usize,
    /// The level started with obstacles and none remain.
    pub obstacles_cleared: bool,
    /// Shuffles needed to restore a possible move.
    pub reshuffled: u32,
}

/// Totals for one whole cascade.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    pub score_delta: u32,
    /// Clearing passes.
    pub rounds: u32,
    pub pieces_cleared: usize,
    pub groups: Vec<MatchGroup>,
    pub obstacle_hits: Vec<ObstacleHit>,
    pub reshuffled: u32,
    pub steps: u32,
    pub settled: Option<SettleReport>,
}
