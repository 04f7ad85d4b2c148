//! The match-3 engine.
//!
//! `MatchEngine` wires the board, matcher, resolver, budget and score
//! together and is the only type most callers need:
//!
//! - `new` / `with_streams` / `from_board`: start a level
//! - `apply_swap` / `apply_ability` / `apply_effect`: run a request to
//!   completion
//! - `begin_swap` / `begin_effect` + `step`: the same requests, paced one
//!   transition at a time
//! - `refresh` / `hint`: manual reshuffle and move suggestions
//!
//! ## Example
//!
//! ```
//! use rust_match3::core::LevelConfig;
//! use rust_match3::engine::{MatchEngine, SwapOutcome};
//! use rust_match3::ledger::ResourceBank;
//! use rust_match3::resolver::ResolveContext;
//!
//! let mut engine = MatchEngine::new(LevelConfig::new(8, 8), 42).unwrap();
//! let mut bank = ResourceBank::new();
//! let mut ctx = ResolveContext::new(&mut bank);
//!
//! let (a, b) = engine.hint().unwrap();
//! let outcome = engine.apply_swap(a, b, &mut ctx).unwrap();
//!
//! assert!(matches!(outcome, SwapOutcome::Accepted { moves_left: 23, .. }));
//! assert!(engine.score() >= 50);
//! ```

mod match_engine;
mod setup;

pub use match_engine::{AbilityResolution, MatchEngine, RevertReason, SwapOutcome, SwapStart};
