//! Pieces: collectible tiles and immovable obstacles.
//!
//! A piece is a tagged variant rather than a class hierarchy. Normal tiles
//! match and fall; obstacles do neither and are only removed once their
//! accumulated damage reaches their durability.

use serde::{Deserialize, Serialize};

use super::Cell;

/// Collectible tile kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileType {
    Water,
    Sun,
    Earth,
    Grass,
}

impl TileType {
    /// Every tile type, in ledger order.
    pub const ALL: [TileType; 4] = [TileType::Water, TileType::Sun, TileType::Earth, TileType::Grass];

    /// Stable index, used for per-type counters.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// One-letter code used by board fixtures.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            TileType::Water => 'W',
            TileType::Sun => 'S',
            TileType::Earth => 'E',
            TileType::Grass => 'G',
        }
    }

    #[must_use]
    pub fn from_symbol(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.symbol() == c)
    }
}

/// Obstacle kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Weeds overgrowing a cell. Four hits by default.
    Overgrowth,
    /// A frozen cell. Six hits by default.
    Ice,
}

impl ObstacleKind {
    #[must_use]
    pub const fn default_hits(self) -> u32 {
        match self {
            ObstacleKind::Overgrowth => 4,
            ObstacleKind::Ice => 6,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            ObstacleKind::Overgrowth => 'O',
            ObstacleKind::Ice => 'I',
        }
    }

    #[must_use]
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'O' => Some(ObstacleKind::Overgrowth),
            'I' => Some(ObstacleKind::Ice),
            _ => None,
        }
    }
}

/// Damage bookkeeping for an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durability {
    hits_to_clear: u32,
    hits_so_far: u32,
}

impl Durability {
    /// Fresh obstacle needing `hits_to_clear` hits.
    #[must_use]
    pub const fn new(hits_to_clear: u32) -> Self {
        Self { hits_to_clear, hits_so_far: 0 }
    }

    /// Obstacle that has already taken some damage.
    #[must_use]
    pub const fn with_hits(hits_to_clear: u32, hits_so_far: u32) -> Self {
        Self { hits_to_clear, hits_so_far }
    }

    /// Add damage. Returns `true` once the obstacle is destroyed.
    pub fn damage(&mut self, amount: u32) -> bool {
        self.hits_so_far = self.hits_so_far.saturating_add(amount);
        self.is_destroyed()
    }

    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.hits_so_far >= self.hits_to_clear
    }

    #[must_use]
    pub const fn hits_to_clear(&self) -> u32 {
        self.hits_to_clear
    }

    #[must_use]
    pub const fn hits_so_far(&self) -> u32 {
        self.hits_so_far
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.hits_to_clear.saturating_sub(self.hits_so_far)
    }

    /// Remaining durability in `[0, 1]`, for rendering damage stages.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.hits_to_clear == 0 {
            return 0.0;
        }
        self.remaining() as f32 / self.hits_to_clear as f32
    }
}

/// What occupies a cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PieceKind {
    Normal(TileType),
    Obstacle { kind: ObstacleKind, durability: Durability },
}

impl PieceKind {
    /// Undamaged obstacle of the given kind and durability.
    #[must_use]
    pub const fn obstacle(kind: ObstacleKind, hits_to_clear: u32) -> Self {
        PieceKind::Obstacle { kind, durability: Durability::new(hits_to_clear) }
    }

    #[must_use]
    pub const fn is_obstacle(&self) -> bool {
        matches!(self, PieceKind::Obstacle { .. })
    }
}

/// Stable identity of a piece across moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// A piece on the board.
///
/// `cell` mirrors the slot the board stores the piece in. Only the board
/// mutates it, and only together with the slot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub(crate) id: PieceId,
    pub(crate) cell: Cell,
    pub(crate) kind: PieceKind,
}

impl Piece {
    #[must_use]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Tile type for normal pieces, `None` for obstacles.
    #[must_use]
    pub fn tile(&self) -> Option<TileType> {
        match self.kind {
            PieceKind::Normal(tile) => Some(tile),
            PieceKind::Obstacle { .. } => None,
        }
    }

    #[must_use]
    pub fn is_obstacle(&self) -> bool {
        self.kind.is_obstacle()
    }

    /// Obstacles are embedded in their cell; everything else can move.
    #[must_use]
    pub fn is_movable(&self) -> bool {
        !self.kind.is_obstacle()
    }
}
