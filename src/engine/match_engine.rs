//! The engine facade.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::abilities::{self, AbilityEffect, AbilityKind, AbilityOutcome};
use crate::board::{Board, BoardSnapshot};
use crate::core::{BoardEvent, Cell, EngineError, GameRng, LevelConfig, RngStreams, TileSource};
use crate::matcher::match_at;
use crate::resolver::{Cascade, CascadePhase, CascadeReport, CascadeStep, Playfield, ResolveContext};
use crate::scoring::{MoveBudget, ScoreState};
use crate::solver::{find_possible_move, is_playable, shuffle_until_solvable};

use super::setup::generate_board;

/// Why a swap was undone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevertReason {
    NotAdjacent,
    /// One of the cells is empty or holds an obstacle.
    NotMovable,
    NoMatch,
}

/// Result of [`MatchEngine::apply_swap`].
#[derive(Clone, Debug, PartialEq)]
pub enum SwapOutcome {
    /// Nothing changed and no move was spent.
    Reverted(RevertReason),

    /// The swap matched, a move was spent and the cascade ran to the end.
    Accepted {
        moves_left: u32,
        score_delta: u32,
        /// This swap spent the last move.
        moves_depleted: bool,
        cascade: CascadeReport,
    },

    /// No moves left. The board was not touched.
    InsufficientBudget,
}

/// Result of [`MatchEngine::begin_swap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapStart {
    Reverted(RevertReason),
    /// The swap matched and a cascade is waiting for [`MatchEngine::step`].
    Started { moves_left: u32, moves_depleted: bool },
    InsufficientBudget,
}

/// An ability and the cascade that followed it.
#[derive(Clone, Debug, PartialEq)]
pub struct AbilityResolution {
    pub outcome: AbilityOutcome,
    pub cascade: CascadeReport,
}

/// A running level.
///
/// Owns the board, move budget, score and event history. Collaborators
/// (resource ledger, goals, settle hook) are passed per call in a
/// [`ResolveContext`].
///
/// ```
/// use rust_match3::core::LevelConfig;
/// use rust_match3::engine::MatchEngine;
///
/// let engine = MatchEngine::new(LevelConfig::new(8, 8), 42).unwrap();
/// assert_eq!(engine.moves_remaining(), 24);
/// assert!(engine.hint().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct MatchEngine<R = GameRng> {
    config: LevelConfig,
    board: Board,
    streams: RngStreams<R>,
    budget: MoveBudget,
    score: ScoreState,
    cascade: Cascade,
    events: Vector<BoardEvent>,
}

impl MatchEngine<GameRng> {
    /// Start a level with random streams derived from `seed`.
    pub fn new(config: LevelConfig, seed: u64) -> Result<Self, EngineError> {
        Self::with_streams(config, RngStreams::from_seed(seed))
    }
}

impl<R: TileSource> MatchEngine<R> {
    /// Start a level with the given random streams.
    ///
    /// Places obstacles, fills the board and shuffles it if it starts
    /// without a possible move.
    pub fn with_streams(config: LevelConfig, mut streams: RngStreams<R>) -> Result<Self, EngineError> {
        config.validate()?;
        let mut board = generate_board(&config, &mut streams.fill)?;

        let mut shuffled = 0;
        if !is_playable(&board) {
            shuffled = shuffle_until_solvable(&mut board, &mut streams.shuffle, config.max_shuffle_attempts)?;
        }

        let mut engine = Self::assemble(config, board, streams);
        if shuffled > 0 {
            engine.events.push_back(BoardEvent::Shuffled { attempts: shuffled });
        }
        Ok(engine)
    }

    /// Adopt a prepared board. The board is used as is, without reshuffling.
    pub fn from_board(config: LevelConfig, board: Board, streams: RngStreams<R>) -> Result<Self, EngineError> {
        config.validate()?;
        if board.width() != config.width || board.height() != config.height {
            return Err(EngineError::InvalidConfig(format!(
                "board is {}x{} but the level is {}x{}",
                board.width(),
                board.height(),
                config.width,
                config.height
            )));
        }
        board.verify()?;
        Ok(Self::assemble(config, board, streams))
    }

    fn assemble(config: LevelConfig, board: Board, streams: RngStreams<R>) -> Self {
        let budget = MoveBudget::for_level(config.base_moves, board.obstacle_count(), config.moves_per_obstacle);
        let score = ScoreState::new(config.star_thresholds);
        let mut events = Vector::new();
        events.push_back(BoardEvent::Initialized {
            obstacles: budget.obstacle_count_at_start(),
            moves: budget.moves_remaining(),
        });

        Self {
            config,
            board,
            streams,
            budget,
            score,
            cascade: Cascade::new(),
            events,
        }
    }

    // === Requests ===

    /// Swap two cells and resolve the whole cascade.
    pub fn apply_swap(&mut self, a: Cell, b: Cell, ctx: &mut ResolveContext<'_>) -> Result<SwapOutcome, EngineError> {
        Ok(match self.begin_swap(a, b)? {
            SwapStart::Reverted(reason) => SwapOutcome::Reverted(reason),
            SwapStart::InsufficientBudget => SwapOutcome::InsufficientBudget,
            SwapStart::Started { moves_left, moves_depleted } => {
                let cascade = self.run(ctx)?;
                SwapOutcome::Accepted { moves_left, score_delta: cascade.score_delta, moves_depleted, cascade }
            }
        })
    }

    /// Validate and perform a swap, leaving its cascade for [`step`](Self::step).
    ///
    /// A swap that forms no match is undone and costs nothing.
    pub fn begin_swap(&mut self, a: Cell, b: Cell) -> Result<SwapStart, EngineError> {
        self.ensure_idle()?;
        for cell in [a, b] {
            if !self.board.contains(cell) {
                return Err(EngineError::InvalidCoordinate(cell));
            }
        }
        if self.budget.is_depleted() {
            return Ok(SwapStart::InsufficientBudget);
        }
        if !a.is_adjacent(b) {
            return Ok(self.revert(a, b, RevertReason::NotAdjacent));
        }
        if !self.board.is_movable_at(a) || !self.board.is_movable_at(b) {
            return Ok(self.revert(a, b, RevertReason::NotMovable));
        }

        self.board.swap(a, b)?;
        if match_at(&self.board, a, None).is_none() && match_at(&self.board, b, None).is_none() {
            self.board.swap(a, b)?;
            return Ok(self.revert(a, b, RevertReason::NoMatch));
        }

        self.budget.use_move();
        let moves_left = self.budget.moves_remaining();
        self.events.push_back(BoardEvent::SwapAccepted { a, b, moves_left });
        let moves_depleted = self.budget.take_depletion();
        if moves_depleted {
            self.events.push_back(BoardEvent::MovesDepleted);
        }

        self.cascade.start();
        Ok(SwapStart::Started { moves_left, moves_depleted })
    }

    fn revert(&mut self, a: Cell, b: Cell, reason: RevertReason) -> SwapStart {
        self.events.push_back(BoardEvent::SwapReverted { a, b });
        SwapStart::Reverted(reason)
    }

    /// Bind an ability to the clicked cell, apply it and resolve the
    /// cascade. Cost is the caller's concern.
    pub fn apply_ability(
        &mut self,
        kind: AbilityKind,
        target: Cell,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<AbilityResolution, EngineError> {
        self.ensure_idle()?;
        let effect = AbilityEffect::resolve(kind, target, &self.board)?;
        self.apply_effect(effect, ctx)
    }

    /// Apply an already targeted ability and resolve the cascade.
    pub fn apply_effect(
        &mut self,
        effect: AbilityEffect,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<AbilityResolution, EngineError> {
        let outcome = self.begin_effect(effect, ctx)?;
        let cascade = self.run(ctx)?;
        Ok(AbilityResolution { outcome, cascade })
    }

    /// Apply an ability, leaving its cascade for [`step`](Self::step).
    pub fn begin_effect(
        &mut self,
        effect: AbilityEffect,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<AbilityOutcome, EngineError> {
        self.ensure_idle()?;
        let outcome = abilities::apply_effect(&mut self.board, effect)?;

        self.events.push_back(BoardEvent::AbilityApplied { effect });
        for hit in &outcome.damaged_obstacles {
            self.events.push_back(BoardEvent::ObstacleDamaged {
                cell: hit.cell,
                kind: hit.kind,
                remaining: hit.remaining,
                destroyed: hit.destroyed,
            });
        }
        if !outcome.cleared.is_empty() {
            self.events.push_back(BoardEvent::PiecesCleared { cells: outcome.cleared.clone() });
        }
        ctx.credit(&outcome.cleared);

        self.cascade.start();
        Ok(outcome)
    }

    /// Advance the running cascade by one transition.
    pub fn step(&mut self, ctx: &mut ResolveContext<'_>) -> Result<CascadeStep, EngineError> {
        let (mut field, cascade) = self.split();
        cascade.step(&mut field, ctx)
    }

    fn run(&mut self, ctx: &mut ResolveContext<'_>) -> Result<CascadeReport, EngineError> {
        let (mut field, cascade) = self.split();
        cascade.run(&mut field, ctx)
    }

    /// Lend the cascade everything it mutates.
    fn split(&mut self) -> (Playfield<'_, R>, &mut Cascade) {
        let Self { config, board, streams, budget, score, cascade, events } = self;
        let field = Playfield {
            board,
            config: &*config,
            score,
            refill: &mut streams.refill,
            shuffle: &mut streams.shuffle,
            events,
            obstacles_at_start: budget.obstacle_count_at_start(),
        };
        (field, cascade)
    }

    /// Reshuffle the movable pieces on demand. Costs no move.
    ///
    /// Returns the number of shuffles needed to reach a playable board.
    pub fn refresh(&mut self) -> Result<u32, EngineError> {
        self.ensure_idle()?;
        let attempts =
            shuffle_until_solvable(&mut self.board, &mut self.streams.shuffle, self.config.max_shuffle_attempts)?;
        self.events.push_back(BoardEvent::Shuffled { attempts });
        Ok(attempts)
    }

    /// A swap that would form a match, if any.
    #[must_use]
    pub fn hint(&self) -> Option<(Cell, Cell)> {
        if self.cascade.is_busy() {
            return None;
        }
        find_possible_move(&self.board)
    }

    fn ensure_idle(&self) -> Result<(), EngineError> {
        if self.cascade.is_busy() {
            Err(EngineError::CascadeInProgress)
        } else {
            Ok(())
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(&self.board)
    }

    #[must_use]
    pub fn budget(&self) -> &MoveBudget {
        &self.budget
    }

    #[must_use]
    pub fn moves_remaining(&self) -> u32 {
        self.budget.moves_remaining()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score.current()
    }

    #[must_use]
    pub fn stars(&self) -> u8 {
        self.score.stars()
    }

    #[must_use]
    pub fn obstacle_count(&self) -> usize {
        self.board.obstacle_count()
    }

    /// The level started with obstacles and all of them are gone.
    #[must_use]
    pub fn obstacles_cleared(&self) -> bool {
        self.budget.obstacle_count_at_start() > 0 && self.board.obstacle_count() == 0
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.cascade.is_busy()
    }

    #[must_use]
    pub fn phase(&self) -> CascadePhase {
        self.cascade.phase()
    }

    /// Every event since the level started or since the last drain.
    #[must_use]
    pub fn history(&self) -> &Vector<BoardEvent> {
        &self.events
    }

    /// Take the recorded events, leaving the history empty.
    pub fn drain_events(&mut self) -> Vector<BoardEvent> {
        std::mem::take(&mut self.events)
    }
}
