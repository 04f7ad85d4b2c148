//! Board coordinates.
//!
//! `x` grows to the right, `y` grows downward. Row `y = 0` is the spawn row:
//! new pieces appear there and gravity pulls toward `y = height - 1`.
//!
//! Cells order row-major (`y` first, then `x`), so a `BTreeSet<Cell>`
//! iterates in the same order the matcher scans.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A position on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Offset this cell, returning `None` if the result leaves a
    /// `width × height` board.
    #[must_use]
    pub fn offset(self, dx: isize, dy: isize, width: usize, height: usize) -> Option<Cell> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < width && y < height).then_some(Cell { x, y })
    }

    /// Orthogonal neighbours (up, left, right, down) inside the board.
    pub fn orthogonal(self, width: usize, height: usize) -> impl Iterator<Item = Cell> {
        [(0, -1), (-1, 0), (1, 0), (0, 1)]
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy, width, height))
    }

    /// The 8-neighbourhood inside the board, row-major.
    pub fn surrounding(self, width: usize, height: usize) -> impl Iterator<Item = Cell> {
        (-1..=1isize)
            .flat_map(|dy| (-1..=1isize).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(move |(dx, dy)| self.offset(dx, dy, width, height))
    }

    /// Manhattan distance 1 in the same row or column.
    #[must_use]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
