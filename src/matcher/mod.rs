//! Match detection.
//!
//! Pure functions from board state to matched cells; nothing here mutates
//! the board.
//!
//! - `match_at`: runs through one pivot, optionally with a hypothetical type
//! - `match_if_swapped`: try-before-swap check used by move validation and
//!   the solver
//! - `all_matches` / `find_groups`: whole-board scans, row-major
//!
//! ```
//! use rust_match3::board::Board;
//! use rust_match3::core::Cell;
//! use rust_match3::matcher::match_at;
//!
//! let board = Board::parse(&["WWWS", "SEGE"]).unwrap();
//! let run = match_at(&board, Cell::new(1, 0), None).unwrap();
//! assert_eq!(run.len(), 3);
//! ```

mod scan;

pub use scan::{all_matches, find_groups, match_at, match_if_swapped, MatchGroup, MIN_MATCH};
