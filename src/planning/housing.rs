//! House placement
//!
//! Houses go along the two map edges touching the origin, spaced a house
//! apart, or out in the open with a clear ring around them so units keep a
//! path between structures. The crew of builders closest to the origin
//! anchors the search: the chosen cell minimizes their summed walk.

use crate::core::config::StrategyConfig;
use crate::core::types::Cell;
use crate::model::entity::{Entity, EntityKind};
use crate::model::properties::PropertyTable;
use crate::planning::project::ProjectList;
use crate::spatial::occupancy::{Occupancy, OccupancyGrid};
use crate::world::index::WorldIndex;

/// The `crew_size` builders closest to the origin
///
/// Builders at equal distance keep snapshot order. Returns `None` when there
/// are fewer builders than the crew needs.
pub fn select_house_crew(builders: &[Entity], crew_size: usize) -> Option<Vec<Cell>> {
    if crew_size == 0 || builders.len() < crew_size {
        return None;
    }

    let mut by_distance: Vec<&Entity> = builders.iter().collect();
    by_distance.sort_by_key(|b| b.position.distance(&Cell::ORIGIN));

    Some(by_distance.into_iter().take(crew_size).map(|b| b.position).collect())
}

pub fn is_valid_house_position(grid: &OccupancyGrid, house_size: i32, cell: Cell) -> bool {
    if !grid.footprint_in_bounds(cell, house_size) {
        return false;
    }

    if cell.x == 0 {
        cell.y % house_size == 0 && grid.footprint_level(cell, house_size) == Occupancy::Empty
    } else if cell.y == 0 {
        (cell.x - 1) % house_size == 0
            && grid.footprint_level(cell, house_size) == Occupancy::Empty
    } else if cell.x > house_size && cell.y > house_size {
        // One cell of clearance on every side; units may stand there
        grid.footprint_level(cell.offset(-1, -1), house_size + 2) <= Occupancy::Movable
    } else {
        false
    }
}

/// Scan diagonals `x + y = l` for `l < scan_radius` and return the valid
/// cell with the smallest summed distance to the crew
pub fn find_house_position(
    grid: &OccupancyGrid,
    crew: &[Cell],
    house_size: i32,
    scan_radius: i32,
) -> Option<Cell> {
    let mut best: Option<(u32, Cell)> = None;

    for l in 0..scan_radius {
        for x in 0..=l {
            let cell = Cell::new(x, l - x);
            if !is_valid_house_position(grid, house_size, cell) {
                continue;
            }

            let walk: u32 = crew.iter().map(|c| c.distance(&cell)).sum();
            if best.map_or(true, |(shortest, _)| walk < shortest) {
                best = Some((walk, cell));
            }
        }
    }

    best.map(|(_, cell)| cell)
}

/// Decide whether to open a new house project this tick
///
/// Requires all population capacity in use, enough resources to pay for
/// every open project plus this one, and a free project slot. Returns the
/// footprint origin of the new project; the caller opens it.
pub fn plan_house_project(
    projects: &ProjectList,
    index: &WorldIndex,
    resources: i32,
    properties: &PropertyTable,
    config: &StrategyConfig,
) -> Option<Cell> {
    if !index.population.is_saturated() || projects.len() >= config.max_house_projects {
        return None;
    }

    let house = match properties.get(EntityKind::House) {
        Ok(house) => house,
        Err(e) => {
            tracing::warn!("Cannot plan houses: {}", e);
            return None;
        }
    };

    let needed = house.initial_cost as i64 * (projects.len() as i64 + 1);
    if (resources as i64) < needed {
        tracing::debug!("Housing blocked on funds: {} < {}", resources, needed);
        return None;
    }

    let crew = select_house_crew(index.mine_of(EntityKind::BuilderUnit), config.house_crew_size)?;
    let position = find_house_position(
        &index.grid,
        &crew,
        house.size,
        config.house_scan_radius(index.map_size),
    )?;

    if projects.exists_at(position) {
        return None;
    }

    tracing::debug!("Planning house at {}", position);
    Some(position)
}
