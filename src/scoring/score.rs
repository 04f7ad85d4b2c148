//! Match scoring and star ratings.

use serde::{Deserialize, Serialize};

use crate::core::{ScoreTable, EXTRA_PIECE_BONUS};
use crate::matcher::MIN_MATCH;

/// Points for a single match group of `size` pieces.
///
/// Three, four and five come from the table; every piece beyond five adds
/// [`EXTRA_PIECE_BONUS`] on top of the five-piece score. Anything shorter
/// than a match scores nothing.
#[must_use]
pub fn score_for_match_size(table: &ScoreTable, size: usize) -> u32 {
    match size {
        n if n < MIN_MATCH => 0,
        3 => table.match3,
        4 => table.match4,
        5 => table.match5,
        n => {
            let extra = u32::try_from(n - 5).unwrap_or(u32::MAX);
            table.match5.saturating_add(extra.saturating_mul(EXTRA_PIECE_BONUS))
        }
    }
}

/// Stars earned by `score`: the number of thresholds it reaches.
#[must_use]
pub fn star_rating(thresholds: &[u32; 3], score: u32) -> u8 {
    thresholds.iter().take_while(|&&t| score >= t).count() as u8
}

/// Running score for a level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    current: u32,
    thresholds: [u32; 3],
}

impl ScoreState {
    #[must_use]
    pub fn new(thresholds: [u32; 3]) -> Self {
        Self { current: 0, thresholds }
    }

    #[must_use]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub fn thresholds(&self) -> [u32; 3] {
        self.thresholds
    }

    /// Add points. Score never decreases.
    pub fn award(&mut self, points: u32) {
        self.current = self.current.saturating_add(points);
    }

    /// Stars for the current score, recomputed on every call.
    #[must_use]
    pub fn stars(&self) -> u8 {
        star_rating(&self.thresholds, self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        let table = ScoreTable { match3: 60, match4: 120, match5: 200 };
        assert_eq!(score_for_match_size(&table, 2), 0);
        assert_eq!(score_for_match_size(&table, 3), 60);
        assert_eq!(score_for_match_size(&table, 4), 120);
        assert_eq!(score_for_match_size(&table, 5), 200);
        assert_eq!(score_for_match_size(&table, 6), 220);
        assert_eq!(score_for_match_size(&table, 9), 280);
    }

    #[test]
    fn test_star_boundaries() {
        let t = [600, 950, 1400];
        assert_eq!(star_rating(&t, 0), 0);
        assert_eq!(star_rating(&t, 599), 0);
        assert_eq!(star_rating(&t, 600), 1);
        assert_eq!(star_rating(&t, 949), 1);
        assert_eq!(star_rating(&t, 950), 2);
        assert_eq!(star_rating(&t, 1400), 3);
        assert_eq!(star_rating(&t, u32::MAX), 3);
    }

    #[test]
    fn test_score_state() {
        let mut score = ScoreState::new([100, 200, 300]);
        assert_eq!(score.stars(), 0);

        score.award(150);
        assert_eq!(score.current(), 150);
        assert_eq!(score.stars(), 1);

        score.award(200);
        assert_eq!(score.stars(), 3);

        score.award(u32::MAX);
        assert_eq!(score.current(), u32::MAX);
    }
}
