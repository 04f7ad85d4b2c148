//! Level configuration.
//!
//! The engine consumes one `LevelConfig` per level and never generates
//! level parameters itself. Configs are built with `with_*` methods:
//!
//! ```
//! use rust_match3::core::{LevelConfig, ObstacleKind, ObstacleSpec};
//!
//! let config = LevelConfig::new(8, 8)
//!     .with_obstacle(ObstacleSpec::standard(ObstacleKind::Ice))
//!     .with_obstacle_count(6)
//!     .with_obstacle_spawn_chance(0.2)
//!     .with_moves(20, 1);
//!
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::{EngineError, ObstacleKind, TileType};

/// Points awarded per extra piece beyond five in a single match.
pub const EXTRA_PIECE_BONUS: u32 = 20;

/// Score for matches of three, four and five pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub match3: u32,
    pub match4: u32,
    pub match5: u32,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self { match3: 50, match4: 100, match5: 150 }
    }
}

/// An obstacle kind a level may place, with its durability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub kind: ObstacleKind,
    pub hits_to_clear: u32,
}

impl ObstacleSpec {
    #[must_use]
    pub const fn new(kind: ObstacleKind, hits_to_clear: u32) -> Self {
        Self { kind, hits_to_clear }
    }

    /// The kind's default durability.
    #[must_use]
    pub const fn standard(kind: ObstacleKind) -> Self {
        Self::new(kind, kind.default_hits())
    }
}

/// Complete configuration for one level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Columns.
    pub width: usize,

    /// Rows. Row 0 is the spawn row.
    pub height: usize,

    /// Tile types that may spawn.
    pub available_types: Vec<TileType>,

    /// Obstacle kinds that may be placed at level start.
    pub obstacles: Vec<ObstacleSpec>,

    /// Maximum obstacles placed at level start.
    pub obstacle_count: usize,

    /// Per-cell probability of placing an obstacle while under `obstacle_count`.
    pub obstacle_spawn_chance: f64,

    /// Moves granted before obstacle bonuses.
    pub base_moves: u32,

    /// Extra moves per obstacle present at level start.
    pub moves_per_obstacle: u32,

    pub score_table: ScoreTable,

    /// Scores for one, two and three stars. Strictly increasing.
    pub star_thresholds: [u32; 3],

    /// Shuffle attempts before declaring the board unsolvable.
    pub max_shuffle_attempts: u32,

    /// Gravity/rescan/clear steps one cascade may take.
    pub max_cascade_steps: u32,
}

impl LevelConfig {
    /// Obstacle-free level of the given size with default scoring.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            available_types: TileType::ALL.to_vec(),
            obstacles: Vec::new(),
            obstacle_count: 0,
            obstacle_spawn_chance: 0.0,
            base_moves: 24,
            moves_per_obstacle: 1,
            score_table: ScoreTable::default(),
            star_thresholds: [600, 950, 1400],
            max_shuffle_attempts: 1000,
            max_cascade_steps: 10_000,
        }
    }

    /// Restrict the spawnable tile types.
    #[must_use]
    pub fn with_types(mut self, types: impl Into<Vec<TileType>>) -> Self {
        self.available_types = types.into();
        self
    }

    /// Allow an obstacle kind.
    #[must_use]
    pub fn with_obstacle(mut self, spec: ObstacleSpec) -> Self {
        self.obstacles.push(spec);
        self
    }

    #[must_use]
    pub fn with_obstacle_count(mut self, count: usize) -> Self {
        self.obstacle_count = count;
        self
    }

    #[must_use]
    pub fn with_obstacle_spawn_chance(mut self, chance: f64) -> Self {
        self.obstacle_spawn_chance = chance;
        self
    }

    /// Set the base move budget and the bonus per starting obstacle.
    #[must_use]
    pub fn with_moves(mut self, base: u32, per_obstacle: u32) -> Self {
        self.base_moves = base;
        self.moves_per_obstacle = per_obstacle;
        self
    }

    #[must_use]
    pub fn with_score_table(mut self, table: ScoreTable) -> Self {
        self.score_table = table;
        self
    }

    #[must_use]
    pub fn with_star_thresholds(mut self, thresholds: [u32; 3]) -> Self {
        self.star_thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn with_max_shuffle_attempts(mut self, attempts: u32) -> Self {
        self.max_shuffle_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_max_cascade_steps(mut self, steps: u32) -> Self {
        self.max_cascade_steps = steps;
        self
    }

    /// Look up the durability spec for an obstacle kind.
    #[must_use]
    pub fn obstacle_spec(&self, kind: ObstacleKind) -> Option<&ObstacleSpec> {
        self.obstacles.iter().find(|spec| spec.kind == kind)
    }

    /// Check the config for values the engine cannot work with.
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |reason: &str| Err(EngineError::InvalidConfig(reason.to_string()));

        if self.width == 0 || self.height == 0 {
            return invalid("board dimensions must be non-zero");
        }
        if self.available_types.is_empty() {
            return invalid("at least one tile type is required");
        }
        for (i, tile) in self.available_types.iter().enumerate() {
            if self.available_types[..i].contains(tile) {
                return invalid("tile types must be distinct");
            }
        }
        if self.obstacle_count > 0 && self.obstacles.is_empty() {
            return invalid("obstacle count set without any obstacle kinds");
        }
        if !(0.0..=1.0).contains(&self.obstacle_spawn_chance) {
            return invalid("obstacle spawn chance must lie in [0, 1]");
        }
        if self.obstacles.iter().any(|spec| spec.hits_to_clear == 0) {
            return invalid("obstacles need at least one hit to clear");
        }
        let [one, two, three] = self.star_thresholds;
        if !(one < two && two < three) {
            return invalid("star thresholds must be strictly increasing");
        }
        if self.max_shuffle_attempts == 0 || self.max_cascade_steps == 0 {
            return invalid("retry and step caps must be non-zero");
        }
        Ok(())
    }
}
