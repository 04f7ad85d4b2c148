//! Move budget.

use serde::{Deserialize, Serialize};

/// Moves left in a level.
///
/// Fixed at level start as `base + obstacles × per_obstacle` and only ever
/// decreases, one per accepted swap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveBudget {
    moves_remaining: u32,
    obstacle_count_at_start: usize,
    depletion_reported: bool,
}

impl MoveBudget {
    /// Budget for a level starting with `obstacles` obstacles.
    #[must_use]
    pub fn for_level(base: u32, obstacles: usize, per_obstacle: u32) -> Self {
        let bonus = u32::try_from(obstacles).unwrap_or(u32::MAX).saturating_mul(per_obstacle);
        Self {
            moves_remaining: base.saturating_add(bonus),
            obstacle_count_at_start: obstacles,
            depletion_reported: false,
        }
    }

    #[must_use]
    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    #[must_use]
    pub fn obstacle_count_at_start(&self) -> usize {
        self.obstacle_count_at_start
    }

    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.moves_remaining == 0
    }

    /// Spend one move. Returns `false` without changing anything if the
    /// budget was already empty.
    pub fn use_move(&mut self) -> bool {
        if self.moves_remaining == 0 {
            return false;
        }
        self.moves_remaining -= 1;
        true
    }

    /// `true` exactly once: the first time this is called with the budget
    /// empty.
    pub fn take_depletion(&mut self) -> bool {
        if self.moves_remaining == 0 && !self.depletion_reported {
            self.depletion_reported = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_level() {
        let budget = MoveBudget::for_level(20, 4, 2);
        assert_eq!(budget.moves_remaining(), 28);
        assert_eq!(budget.obstacle_count_at_start(), 4);
    }

    #[test]
    fn test_use_move_until_empty() {
        let mut budget = MoveBudget::for_level(2, 0, 1);
        assert!(budget.use_move());
        assert!(!budget.take_depletion());
        assert!(budget.use_move());
        assert!(budget.is_depleted());
        assert!(!budget.use_move());
        assert_eq!(budget.moves_remaining(), 0);
    }

    #[test]
    fn test_depletion_reported_once() {
        let mut budget = MoveBudget::for_level(1, 0, 1);
        budget.use_move();
        assert!(budget.take_depletion());
        assert!(!budget.take_depletion());
        assert!(!budget.use_move());
        assert!(!budget.take_depletion());
    }
}
