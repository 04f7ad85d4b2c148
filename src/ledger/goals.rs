//! Collection goals.

use serde::{Deserialize, Serialize};

use crate::core::TileType;

use super::GoalTracker;

/// Collect `target` tiles of one type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectGoal {
    pub tile: TileType,
    pub target: u32,
    pub current: u32,
}

impl CollectGoal {
    #[must_use]
    pub const fn new(tile: TileType, target: u32) -> Self {
        Self { tile, target, current: 0 }
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.current >= self.target
    }
}

/// A level's goal list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectGoals {
    goals: Vec<CollectGoal>,
}

impl CollectGoals {
    #[must_use]
    pub fn new(goals: Vec<CollectGoal>) -> Self {
        Self { goals }
    }

    #[must_use]
    pub fn goals(&self) -> &[CollectGoal] {
        &self.goals
    }

    /// Every goal reached. Vacuously true for an empty list.
    #[must_use]
    pub fn all_complete(&self) -> bool {
        self.goals.iter().all(CollectGoal::is_complete)
    }
}

impl GoalTracker for CollectGoals {
    fn on_collected(&mut self, tile: TileType, count: u32) {
        if let Some(goal) = self.goals.iter_mut().find(|g| g.tile == tile) {
            goal.current = goal.current.saturating_add(count);
        }
    }
}
