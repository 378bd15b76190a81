//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for entities reported by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique identifier for players
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// Game tick counter
pub type Tick = u64;

/// Integer map cell
///
/// The map origin `(0, 0)` is the own base corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance
    pub fn distance(&self, other: &Self) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours
    pub fn neighbors(&self) -> [Cell; 4] {
        [
            self.offset(0, 1),
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(-1, 0),
        ]
    }

    /// True if this cell touches the `size`-wide square footprint at
    /// `origin` on one of its four sides (corners excluded)
    pub fn is_adjacent_to(&self, origin: Cell, size: i32) -> bool {
        let (x, y) = (self.x, self.y);
        if x == origin.x - 1 || x == origin.x + size {
            (origin.y..origin.y + size).contains(&y)
        } else if (origin.x..origin.x + size).contains(&x) {
            y == origin.y - 1 || y == origin.y + size
        } else {
            false
        }
    }

    /// Cells of the `size`-wide square footprint at this origin
    pub fn footprint(&self, size: i32) -> impl Iterator<Item = Cell> {
        let origin = *self;
        (0..size).flat_map(move |dx| (0..size).map(move |dy| origin.offset(dx, dy)))
    }

    /// Ring of cells orthogonally touching the `size`-wide footprint
    ///
    /// Order: for each offset along the side, bottom, left, top, right.
    pub fn adjacent_ring(&self, size: i32) -> Vec<Cell> {
        let mut ring = Vec::with_capacity(4 * size.max(0) as usize);
        for d in 0..size {
            ring.push(self.offset(d, -1));
            ring.push(self.offset(-1, d));
            ring.push(self.offset(d, size));
            ring.push(self.offset(size, d));
        }
        ring
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
