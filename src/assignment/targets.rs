//! Interaction cells around targets
//!
//! Builders gather and build from the ring of cells touching a footprint.
//! Cells claimed by many neighbouring targets sit in crowded gaps and are
//! left out.

use crate::core::types::Cell;
use crate::spatial::grid::Grid;
use crate::spatial::occupancy::{Occupancy, OccupancyGrid};

/// Cells next to the given footprints that a unit can stand on
///
/// `footprints` yields `(origin, size)` pairs. A cell counts once per
/// footprint whose ring contains it, and only while it is on the map and at
/// most Movable. Cells with `0 < claims < claim_limit` are returned in x-major
/// order.
pub fn target_positions(
    footprints: impl IntoIterator<Item = (Cell, i32)>,
    grid: &OccupancyGrid,
    claim_limit: u32,
) -> Vec<Cell> {
    let mut claims: Grid<u32> = Grid::new(grid.map_size());

    for (origin, size) in footprints {
        for cell in origin.adjacent_ring(size) {
            if !grid.in_bounds(cell) || grid.level(cell) > Occupancy::Movable {
                continue;
            }
            if let Some(count) = claims.get_mut(cell) {
                *count += 1;
            }
        }
    }

    claims
        .cells()
        .filter(|&cell| {
            let count = claims.get(cell).copied().unwrap_or(0);
            count > 0 && count < claim_limit
        })
        .collect()
}
