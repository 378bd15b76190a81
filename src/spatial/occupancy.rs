//! Occupancy grid rebuilt from entity footprints every tick

use crate::core::error::{Result, StrategyError};
use crate::core::types::{Cell, EntityId};
use crate::model::entity::EntityKind;
use crate::spatial::grid::Grid;

/// Per-cell occupancy level, ordered from free to blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub enum Occupancy {
    #[default]
    Empty,
    /// A unit that may move away
    Movable,
    /// A structure or resource
    Immovable,
}

/// The entity covering a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub id: EntityId,
    pub kind: EntityKind,
    pub movable: bool,
}

impl Occupant {
    pub fn level(&self) -> Occupancy {
        if self.movable {
            Occupancy::Movable
        } else {
            Occupancy::Immovable
        }
    }
}

#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    cells: Grid<Option<Occupant>>,
}

impl OccupancyGrid {
    pub fn new(map_size: i32) -> Self {
        Self {
            cells: Grid::new(map_size),
        }
    }

    pub fn map_size(&self) -> i32 {
        self.cells.size
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.cells.in_bounds(cell)
    }

    pub fn footprint_in_bounds(&self, origin: Cell, size: i32) -> bool {
        self.cells.footprint_in_bounds(origin, size)
    }

    /// Mark every cell of a footprint as covered by `occupant`
    ///
    /// Footprints leaving the map are rejected without marking anything.
    pub fn place(&mut self, occupant: Occupant, origin: Cell, size: i32) -> Result<()> {
        if size < 1 || !self.cells.footprint_in_bounds(origin, size) {
            return Err(StrategyError::OutOfBounds {
                id: occupant.id,
                position: origin,
            });
        }
        for cell in origin.footprint(size) {
            self.cells.set(cell, Some(occupant));
        }
        Ok(())
    }

    pub fn occupant(&self, cell: Cell) -> Option<&Occupant> {
        self.cells.get(cell).and_then(|o| o.as_ref())
    }

    /// Level of a single cell; off-map cells read as empty
    pub fn level(&self, cell: Cell) -> Occupancy {
        self.occupant(cell)
            .map(Occupant::level)
            .unwrap_or(Occupancy::Empty)
    }

    /// Highest level over a `size`-wide footprint
    pub fn footprint_level(&self, origin: Cell, size: i32) -> Occupancy {
        let mut worst = Occupancy::Empty;
        for cell in origin.footprint(size) {
            worst = worst.max(self.level(cell));
            if worst == Occupancy::Immovable {
                break;
            }
        }
        worst
    }

    pub fn is_resource(&self, cell: Cell) -> bool {
        self.occupant(cell)
            .map(|o| o.kind == EntityKind::Resource)
            .unwrap_or(false)
    }
}
