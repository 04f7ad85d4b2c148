//! Collaborators that receive clear notifications.
//!
//! The engine credits a `ResourceLedger` and notifies an optional
//! `GoalTracker` once per normal piece it clears. Obstacles never reach
//! either. Reference implementations:
//! - `ResourceBank`: per-type counters with affordability checks for abilities
//! - `CollectGoals`: "collect N of type T" goal list

mod bank;
mod goals;

pub use bank::{ResourceBank, ResourceCost};
pub use goals::{CollectGoal, CollectGoals};

use crate::core::TileType;

/// Receives resources from cleared tiles.
pub trait ResourceLedger {
    fn credit(&mut self, tile: TileType, amount: u32);
}

/// Receives collection progress from cleared tiles.
pub trait GoalTracker {
    fn on_collected(&mut self, tile: TileType, count: u32);
}
