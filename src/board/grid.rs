//! Cell storage and primitive piece mutations.
//!
//! The board keeps each piece's position in three places: the slot array,
//! the piece's own `cell`, and an id index. Every mutation updates all
//! three together; [`Board::verify`] checks they agree.

use rustc_hash::FxHashMap;

use crate::core::{Cell, EngineError, ObstacleKind, Piece, PieceId, PieceKind, TileType};

/// Rectangular grid of optional pieces, stored row-major.
#[derive(Clone, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    slots: Vec<Option<Piece>>,
    index: FxHashMap<PieceId, Cell>,
    next_id: u32,
}

impl Board {
    /// Create an empty board. Both dimensions must be non-zero.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidConfig(format!("board dimensions must be non-zero, got {width}x{height}")));
        }

        Ok(Self {
            width,
            height,
            slots: vec![None; width * height],
            index: FxHashMap::default(),
            next_id: 0,
        })
    }

    /// Build a board from ASCII rows, top row first.
    ///
    /// `W S E G` are tiles, `I` is ice, `O` is overgrowth (both at default
    /// durability) and `.` is an empty cell.
    ///
    /// ```
    /// use rust_match3::board::Board;
    /// use rust_match3::core::{Cell, TileType};
    ///
    /// let board = Board::parse(&["WSE", "G.I"]).unwrap();
    /// assert_eq!(board.tile_at(Cell::new(1, 0)), Some(TileType::Sun));
    /// assert!(board.get(Cell::new(1, 1)).is_none());
    /// assert_eq!(board.obstacle_count(), 1);
    /// ```
    pub fn parse(rows: &[&str]) -> Result<Self, EngineError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut board = Board::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(EngineError::InvalidConfig(format!("fixture row {y} has the wrong width")));
            }
            for (x, symbol) in row.chars().enumerate() {
                let cell = Cell::new(x, y);
                if symbol == '.' {
                    continue;
                }
                let kind = if let Some(tile) = TileType::from_symbol(symbol) {
                    PieceKind::Normal(tile)
                } else if let Some(kind) = ObstacleKind::from_symbol(symbol) {
                    PieceKind::obstacle(kind, kind.default_hits())
                } else {
                    return Err(EngineError::InvalidConfig(format!("unknown fixture symbol '{symbol}'")));
                };
                board.spawn(cell, kind)?;
            }
        }
        Ok(board)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = self.width;
        (0..self.width * self.height).map(move |i| Cell::new(i % width, i / width))
    }

    fn slot(&self, cell: Cell) -> Result<usize, EngineError> {
        if self.contains(cell) {
            Ok(cell.y * self.width + cell.x)
        } else {
            Err(EngineError::InvalidCoordinate(cell))
        }
    }

    /// Piece at a cell. `None` for empty or out-of-bounds cells.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<&Piece> {
        self.slot(cell).ok().and_then(|i| self.slots[i].as_ref())
    }

    /// Look up a piece by id.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.index.get(&id).and_then(|&cell| self.get(cell))
    }

    /// Tile type of a normal piece at `cell`.
    #[must_use]
    pub fn tile_at(&self, cell: Cell) -> Option<TileType> {
        self.get(cell).and_then(Piece::tile)
    }

    /// In bounds and holding nothing.
    #[must_use]
    pub fn is_vacant(&self, cell: Cell) -> bool {
        self.contains(cell) && self.get(cell).is_none()
    }

    #[must_use]
    pub fn is_movable_at(&self, cell: Cell) -> bool {
        self.get(cell).is_some_and(Piece::is_movable)
    }

    /// All pieces, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.slots.iter().flatten()
    }

    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn obstacle_count(&self) -> usize {
        self.pieces().filter(|p| p.is_obstacle()).count()
    }

    /// Cells holding movable pieces, row-major.
    #[must_use]
    pub fn movable_cells(&self) -> Vec<Cell> {
        self.pieces().filter(|p| p.is_movable()).map(Piece::cell).collect()
    }

    /// Empty cells, row-major.
    #[must_use]
    pub fn vacant_cells(&self) -> Vec<Cell> {
        self.cells().filter(|&cell| self.get(cell).is_none()).collect()
    }

    /// Create a piece in an empty cell.
    pub fn spawn(&mut self, cell: Cell, kind: PieceKind) -> Result<PieceId, EngineError> {
        let slot = self.slot(cell)?;
        if self.slots[slot].is_some() {
            return Err(EngineError::CellOccupied(cell));
        }

        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.slots[slot] = Some(Piece { id, cell, kind });
        self.index.insert(id, cell);
        Ok(id)
    }

    /// Create a normal tile in an empty cell.
    pub fn spawn_tile(&mut self, cell: Cell, tile: TileType) -> Result<PieceId, EngineError> {
        self.spawn(cell, PieceKind::Normal(tile))
    }

    /// Empty a cell, returning what was there. Removing from an empty cell
    /// is a no-op returning `None`.
    pub fn remove(&mut self, cell: Cell) -> Result<Option<Piece>, EngineError> {
        let slot = self.slot(cell)?;
        let removed = self.slots[slot].take();
        if let Some(piece) = &removed {
            self.index.remove(&piece.id);
        }
        Ok(removed)
    }

    /// Move a piece to an empty cell, updating its slot and coordinate
    /// together.
    pub fn move_to(&mut self, id: PieceId, dest: Cell) -> Result<(), EngineError> {
        let to = self.slot(dest)?;
        let from_cell = *self.index.get(&id).ok_or(EngineError::PieceNotFound(id))?;
        if from_cell == dest {
            return Ok(());
        }
        if self.slots[to].is_some() {
            return Err(EngineError::CellOccupied(dest));
        }

        let from = self.slot(from_cell)?;
        let mut piece = self.slots[from].take().ok_or(EngineError::PieceNotFound(id))?;
        piece.cell = dest;
        self.slots[to] = Some(piece);
        self.index.insert(id, dest);
        Ok(())
    }

    /// Exchange two adjacent movable pieces.
    pub fn swap(&mut self, a: Cell, b: Cell) -> Result<(), EngineError> {
        let sa = self.slot(a)?;
        let sb = self.slot(b)?;
        if !a.is_adjacent(b) {
            return Err(EngineError::NotAdjacent(a, b));
        }
        for cell in [a, b] {
            match self.get(cell) {
                None => return Err(EngineError::CellEmpty(cell)),
                Some(piece) if !piece.is_movable() => return Err(EngineError::NotMovable(cell)),
                Some(_) => {}
            }
        }

        self.slots.swap(sa, sb);
        for (slot, cell) in [(sa, a), (sb, b)] {
            if let Some(piece) = self.slots[slot].as_mut() {
                piece.cell = cell;
                self.index.insert(piece.id, cell);
            }
        }
        Ok(())
    }

    /// Whether two pieces sit in orthogonally adjacent cells.
    #[must_use]
    pub fn are_adjacent(&self, a: PieceId, b: PieceId) -> bool {
        match (self.index.get(&a), self.index.get(&b)) {
            (Some(ca), Some(cb)) => ca.is_adjacent(*cb),
            _ => false,
        }
    }

    /// Mutable access to a piece's kind, for obstacle damage. Position stays
    /// under the board's control.
    pub(crate) fn kind_mut(&mut self, cell: Cell) -> Option<&mut PieceKind> {
        let slot = self.slot(cell).ok()?;
        self.slots[slot].as_mut().map(|piece| &mut piece.kind)
    }

    /// Redistribute the pieces in `cells`: the piece at `cells[i]` moves to
    /// `cells[order[i]]`. `order` must be a permutation of `0..cells.len()`.
    pub(crate) fn permute(&mut self, cells: &[Cell], order: &[usize]) -> Result<(), EngineError> {
        if cells.len() != order.len() {
            return Err(EngineError::InvariantViolation("permutation length mismatch".to_string()));
        }
        let mut targeted = vec![false; cells.len()];
        for &target in order {
            match targeted.get_mut(target) {
                Some(seen) if !*seen => *seen = true,
                _ => return Err(EngineError::InvariantViolation(format!("order is not a permutation at {target}"))),
            }
        }
        let mut slots = Vec::with_capacity(cells.len());
        for &cell in cells {
            let slot = self.slot(cell)?;
            if self.slots[slot].is_none() {
                return Err(EngineError::CellEmpty(cell));
            }
            if slots.contains(&slot) {
                return Err(EngineError::InvariantViolation(format!("{cell} listed twice")));
            }
            slots.push(slot);
        }

        let mut taken = Vec::with_capacity(cells.len());
        for &slot in &slots {
            taken.push(self.slots[slot].take());
        }
        for (piece, &target) in taken.into_iter().zip(order) {
            let Some(mut piece) = piece else { continue };
            let dest = cells[target];
            piece.cell = dest;
            self.index.insert(piece.id, dest);
            self.slots[slots[target]] = Some(piece);
        }
        Ok(())
    }

    /// Check that every piece's coordinate matches its slot and the id index.
    pub fn verify(&self) -> Result<(), EngineError> {
        let mut seen = 0;
        for cell in self.cells() {
            let Some(piece) = self.get(cell) else { continue };
            seen += 1;
            if piece.cell != cell {
                return Err(EngineError::InvariantViolation(format!(
                    "{} in slot {cell} believes it is at {}",
                    piece.id, piece.cell
                )));
            }
            if self.index.get(&piece.id) != Some(&cell) {
                return Err(EngineError::InvariantViolation(format!("{} missing from index at {cell}", piece.id)));
            }
        }
        if seen != self.index.len() {
            return Err(EngineError::InvariantViolation(format!(
                "index holds {} pieces but the grid holds {seen}",
                self.index.len()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let symbol = match self.get(Cell::new(x, y)).map(Piece::kind) {
                    None => '.',
                    Some(PieceKind::Normal(tile)) => tile.symbol(),
                    Some(PieceKind::Obstacle { kind, .. }) => kind.symbol(),
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
