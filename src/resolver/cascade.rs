//! The cascade state machine.

use im::Vector;

use crate::board::Board;
use crate::core::{BoardEvent, EngineError, LevelConfig, TileSource};
use crate::matcher::{find_groups, MatchGroup};
use crate::obstacles::{damage_at, splash_targets};
use crate::scoring::{score_for_match_size, ScoreState};
use crate::solver::{has_possible_move, shuffle_until_solvable};

use super::{CascadePhase, CascadeReport, CascadeStep, ResolveContext, SettleReport};

/// Everything a cascade mutates, borrowed from its owner for one step.
pub struct Playfield<'a, R> {
    pub board: &'a mut Board,
    pub config: &'a LevelConfig,
    pub score: &'a mut ScoreState,
    pub refill: &'a mut R,
    pub shuffle: &'a mut R,
    pub events: &'a mut Vector<BoardEvent>,
    /// Obstacles on the board when the level began.
    pub obstacles_at_start: usize,
}

/// A resumable cascade.
#[derive(Clone, Debug, Default)]
pub struct Cascade {
    phase: CascadePhase,
    pending: Vec<MatchGroup>,
    report: CascadeReport,
}

impl Cascade {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh cascade at the gravity phase.
    pub fn start(&mut self) {
        self.phase = CascadePhase::Gravity;
        self.pending.clear();
        self.report = CascadeReport::default();
    }

    #[must_use]
    pub fn phase(&self) -> CascadePhase {
        self.phase
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase != CascadePhase::Idle
    }

    /// Totals so far. Complete once a step returns `Settled`.
    #[must_use]
    pub fn report(&self) -> &CascadeReport {
        &self.report
    }

    /// Advance one transition.
    ///
    /// Fails with `CascadeOverflow` once the cascade has taken
    /// `max_cascade_steps` steps without settling. Any error abandons the
    /// cascade and leaves it idle.
    pub fn step<R: TileSource>(
        &mut self,
        field: &mut Playfield<'_, R>,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<CascadeStep, EngineError> {
        if !self.is_busy() {
            return Ok(CascadeStep::Idle);
        }
        let limit = field.config.max_cascade_steps;
        if self.report.steps >= limit {
            self.phase = CascadePhase::Idle;
            return Err(EngineError::CascadeOverflow { steps: limit });
        }
        self.report.steps += 1;

        let result = self.advance(field, ctx);
        if result.is_err() {
            self.phase = CascadePhase::Idle;
        }
        result
    }

    /// Step until settled and return the totals.
    pub fn run<R: TileSource>(
        &mut self,
        field: &mut Playfield<'_, R>,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<CascadeReport, EngineError> {
        while self.is_busy() {
            self.step(field, ctx)?;
        }
        Ok(self.report.clone())
    }

    fn advance<R: TileSource>(
        &mut self,
        field: &mut Playfield<'_, R>,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<CascadeStep, EngineError> {
        loop {
            match self.phase {
                CascadePhase::Idle => return Ok(CascadeStep::Idle),

                CascadePhase::Gravity => {
                    let fall = field.board.collapse_step(&field.config.available_types, field.refill)?;
                    if fall.is_empty() {
                        self.phase = CascadePhase::Rescan;
                        continue;
                    }
                    if !fall.moves.is_empty() {
                        field.events.push_back(BoardEvent::PiecesFell { moves: fall.moves.clone() });
                    }
                    if !fall.spawned.is_empty() {
                        field.events.push_back(BoardEvent::PiecesSpawned { cells: fall.spawned.clone() });
                    }
                    return Ok(CascadeStep::Fell(fall));
                }

                CascadePhase::Rescan => {
                    let groups = find_groups(field.board);
                    if groups.is_empty() {
                        self.phase = CascadePhase::Settled;
                        continue;
                    }
                    for group in &groups {
                        field.events.push_back(BoardEvent::MatchFound {
                            tile: group.tile,
                            cells: group.cells.iter().copied().collect(),
                            score: score_for_match_size(&field.config.score_table, group.len()),
                        });
                    }
                    self.pending = groups.clone();
                    self.phase = CascadePhase::Clearing;
                    return Ok(CascadeStep::Matched(groups));
                }

                CascadePhase::Clearing => return self.clear(field, ctx),

                CascadePhase::Settled => return self.settle(field, ctx).map(CascadeStep::Settled),
            }
        }
    }

    fn clear<R: TileSource>(
        &mut self,
        field: &mut Playfield<'_, R>,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<CascadeStep, EngineError> {
        let groups = std::mem::take(&mut self.pending);
        let mut cleared = Vec::new();
        let mut hits = Vec::new();
        let mut score = 0u32;

        for group in &groups {
            let points = score_for_match_size(&field.config.score_table, group.len());
            field.score.award(points);
            score = score.saturating_add(points);

            for target in splash_targets(field.board, &group.cells) {
                if let Some(hit) = damage_at(field.board, target, 1)? {
                    field.events.push_back(BoardEvent::ObstacleDamaged {
                        cell: hit.cell,
                        kind: hit.kind,
                        remaining: hit.remaining,
                        destroyed: hit.destroyed,
                    });
                    hits.push(hit);
                }
            }
        }

        for group in &groups {
            for &cell in &group.cells {
                if let Some(tile) = field.board.remove(cell)?.as_ref().and_then(|piece| piece.tile()) {
                    cleared.push((cell, tile));
                }
            }
        }
        cleared.sort_by_key(|&(cell, _)| cell);
        ctx.credit(&cleared);
        field.events.push_back(BoardEvent::PiecesCleared { cells: cleared.clone() });

        self.report.score_delta = self.report.score_delta.saturating_add(score);
        self.report.rounds += 1;
        self.report.pieces_cleared += cleared.len();
        self.report.groups.extend(groups);
        self.report.obstacle_hits.extend(hits.iter().copied());
        self.phase = CascadePhase::Gravity;

        Ok(CascadeStep::Cleared { cleared, hits, score })
    }

    fn settle<R: TileSource>(
        &mut self,
        field: &mut Playfield<'_, R>,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<SettleReport, EngineError> {
        let remaining = field.board.obstacle_count();
        let obstacles_cleared = field.obstacles_at_start > 0 && remaining == 0;

        let mut reshuffled = 0;
        if !obstacles_cleared && !has_possible_move(field.board) {
            reshuffled = shuffle_until_solvable(field.board, field.shuffle, field.config.max_shuffle_attempts)?;
            field.events.push_back(BoardEvent::Shuffled { attempts: reshuffled });
        }

        let report = SettleReport {
            score: field.score.current(),
            obstacles_remaining: remaining,
            obstacles_cleared,
            reshuffled,
        };
        field.events.push_back(BoardEvent::Settled { score: report.score, obstacles_remaining: remaining });
        ctx.settled(&report);

        self.report.reshuffled = reshuffled;
        self.report.settled = Some(report.clone());
        self.phase = CascadePhase::Idle;
        Ok(report)
    }
}
