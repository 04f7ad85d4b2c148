//! Collaborators handed to the resolver for one request.

use crate::core::{Cell, TileType};
use crate::ledger::{GoalTracker, ResourceLedger};

use super::SettleReport;

/// Context for resolving a cascade.
///
/// Callers build one per request and pass it to the engine. The engine
/// never holds on to it.
///
/// ```
/// use rust_match3::ledger::{CollectGoal, CollectGoals, ResourceBank};
/// use rust_match3::core::TileType;
/// use rust_match3::resolver::ResolveContext;
///
/// let mut bank = ResourceBank::new();
/// let mut goals = CollectGoals::new(vec![CollectGoal::new(TileType::Sun, 10)]);
/// let mut settled = 0;
///
/// let ctx = ResolveContext::new(&mut bank)
///     .with_goals(&mut goals)
///     .on_settled(|_| settled += 1);
/// drop(ctx);
/// ```
pub struct ResolveContext<'a> {
    /// Credited one unit per normal piece cleared.
    pub ledger: &'a mut dyn ResourceLedger,
    /// Notified one piece at a time, alongside the ledger.
    pub goals: Option<&'a mut dyn GoalTracker>,
    /// Called after every completed cascade.
    pub on_settled: Box<dyn FnMut(&SettleReport) + 'a>,
}

impl<'a> ResolveContext<'a> {
    /// Create a context crediting `ledger`, with no goals and no settle hook.
    pub fn new(ledger: &'a mut dyn ResourceLedger) -> Self {
        Self {
            ledger,
            goals: None,
            on_settled: Box::new(|_| {}),
        }
    }

    /// Add a goal tracker.
    #[must_use]
    pub fn with_goals(mut self, goals: &'a mut dyn GoalTracker) -> Self {
        self.goals = Some(goals);
        self
    }

    /// Add a settle hook.
    #[must_use]
    pub fn on_settled(mut self, hook: impl FnMut(&SettleReport) + 'a) -> Self {
        self.on_settled = Box::new(hook);
        self
    }

    /// Credit every cleared normal piece.
    pub(crate) fn credit(&mut self, cleared: &[(Cell, TileType)]) {
        for &(_, tile) in cleared {
            self.ledger.credit(tile, 1);
            if let Some(goals) = self.goals.as_deref_mut() {
                goals.on_collected(tile, 1);
            }
        }
    }

    pub(crate) fn settled(&mut self, report: &SettleReport) {
        (self.on_settled)(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{CollectGoal, CollectGoals, ResourceBank};

    #[test]
    fn test_credit_reaches_ledger_and_goals() {
        let mut bank = ResourceBank::new();
        let mut goals = CollectGoals::new(vec![CollectGoal::new(TileType::Water, 2)]);
        {
            let mut ctx = ResolveContext::new(&mut bank).with_goals(&mut goals);
            ctx.credit(&[
                (Cell::new(0, 0), TileType::Water),
                (Cell::new(1, 0), TileType::Water),
                (Cell::new(2, 0), TileType::Earth),
            ]);
        }
        assert_eq!(bank.balance(TileType::Water), 2);
        assert_eq!(bank.balance(TileType::Earth), 1);
        assert!(goals.all_complete());
    }

    #[test]
    fn test_settle_hook() {
        let mut bank = ResourceBank::new();
        let mut seen = Vec::new();
        {
            let mut ctx = ResolveContext::new(&mut bank).on_settled(|report| seen.push(report.score));
            ctx.settled(&SettleReport { score: 150, ..SettleReport::default() });
        }
        assert_eq!(seen, vec![150]);
    }
}
