//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use rust_match3::core::{GameRng, LevelConfig, RngStreams, TileSource};
use rust_match3::engine::MatchEngine;
use rust_match3::board::Board;

/// Tile source that replays scripted indices, then falls back to a seeded
/// generator.
#[derive(Clone, Debug)]
pub struct Script {
    picks: VecDeque<usize>,
    fallback: GameRng,
}

impl Script {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self { picks: picks.into_iter().collect(), fallback: GameRng::new(0) }
    }

    pub fn random(seed: u64) -> Self {
        Self { picks: VecDeque::new(), fallback: GameRng::new(seed) }
    }
}

impl TileSource for Script {
    fn pick_index(&mut self, len: usize) -> usize {
        match self.picks.pop_front() {
            Some(index) => index % len,
            None => self.fallback.pick_index(len),
        }
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.fallback.chance(probability)
    }
}

/// Engine over a fixture board whose refill stream spawns `refill` first.
pub fn scripted_engine(rows: &[&str], config: LevelConfig, refill: &[usize]) -> MatchEngine<Script> {
    scripted_board_engine(Board::parse(rows).unwrap(), config, refill)
}

/// Like [`scripted_engine`], for boards built by hand.
pub fn scripted_board_engine(board: Board, config: LevelConfig, refill: &[usize]) -> MatchEngine<Script> {
    let streams = RngStreams {
        fill: Script::random(1),
        refill: Script::new(refill.iter().copied()),
        shuffle: Script::random(2),
    };
    MatchEngine::from_board(config, board, streams).unwrap()
}

/// Engine over a fixture board with seeded streams.
pub fn fixture_engine(rows: &[&str], config: LevelConfig, seed: u64) -> MatchEngine {
    let board = Board::parse(rows).unwrap();
    MatchEngine::from_board(config, board, RngStreams::from_seed(seed)).unwrap()
}

/// Config sized to a fixture.
pub fn config_for(rows: &[&str]) -> LevelConfig {
    LevelConfig::new(rows[0].len(), rows.len())
}
