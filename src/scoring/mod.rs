//! Move budget and scoring.
//!
//! - `MoveBudget`: moves granted at level start, spent one per accepted swap
//! - `score_for_match_size`: points per match group
//! - `ScoreState` / `star_rating`: running score and the stars it earns

mod budget;
mod score;

pub use budget::MoveBudget;
pub use score::{score_for_match_size, star_rating, ScoreState};
