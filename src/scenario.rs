//! Seeded synthetic snapshots
//!
//! Four players start in the four corners: the deciding player (id 1) in the
//! origin corner with a builder base, a house and a handful of builders;
//! three opponents in the other corners with a base and a few fighters.
//! Resource clusters are scattered over the middle of the map. Nothing
//! overlaps and every footprint is on the map; pieces that do not fit on a
//! small map are left out.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::types::{Cell, EntityId, PlayerId};
use crate::model::entity::{Entity, EntityKind};
use crate::model::properties::PropertyTable;
use crate::model::view::{Player, PlayerView};
use crate::spatial::occupancy::{Occupancy, OccupancyGrid, Occupant};

pub const MY_ID: PlayerId = PlayerId(1);

struct ScenarioBuilder {
    properties: PropertyTable,
    grid: OccupancyGrid,
    entities: Vec<Entity>,
    next_id: u32,
}

impl ScenarioBuilder {
    fn new(map_size: i32) -> Self {
        Self {
            properties: PropertyTable::standard(),
            grid: OccupancyGrid::new(map_size),
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Add an entity at full health if its footprint is on the map and free
    fn place(&mut self, player: Option<PlayerId>, kind: EntityKind, position: Cell) -> bool {
        let Ok(props) = self.properties.get(kind) else {
            return false;
        };
        let (size, max_health, movable) = (props.size, props.max_health, props.can_move);

        if !self.grid.footprint_in_bounds(position, size)
            || self.grid.footprint_level(position, size) != Occupancy::Empty
        {
            return false;
        }

        let id = EntityId(self.next_id);
        let occupant = Occupant { id, kind, movable };
        if self.grid.place(occupant, position, size).is_err() {
            return false;
        }
        self.next_id += 1;
        self.entities
            .push(Entity::new(id, player, kind, position, max_health));
        true
    }

    /// Place up to `count` entities at random free cells of a square area
    fn scatter(
        &mut self,
        rng: &mut ChaCha8Rng,
        player: Option<PlayerId>,
        kind: EntityKind,
        area: (Cell, i32),
        count: usize,
    ) {
        let (corner, side) = area;
        if side <= 0 {
            return;
        }
        let mut placed = 0;
        // At most eight tries per entity
        for _ in 0..count * 8 {
            if placed == count {
                break;
            }
            let cell = corner.offset(rng.gen_range(0..side), rng.gen_range(0..side));
            if self.place(player, kind, cell) {
                placed += 1;
            }
        }
    }
}

/// Generate a snapshot for the deciding player at tick 0
pub fn generate(seed: u64, map_size: i32) -> PlayerView {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n = map_size.max(1);
    let mut builder = ScenarioBuilder::new(n);
    let quarter = n / 4;

    // Own corner
    builder.place(Some(MY_ID), EntityKind::House, Cell::new(0, 0));
    builder.place(Some(MY_ID), EntityKind::BuilderBase, Cell::new(5, 5));
    let own_units = rng.gen_range(3..=8);
    builder.scatter(
        &mut rng,
        Some(MY_ID),
        EntityKind::BuilderUnit,
        (Cell::ORIGIN, quarter.max(3)),
        own_units,
    );

    // Opponents in the remaining corners
    let far = n - 10;
    let corners = [
        (PlayerId(2), Cell::new(far, far)),
        (PlayerId(3), Cell::new(far, 5)),
        (PlayerId(4), Cell::new(5, far)),
    ];
    for (player, corner) in corners {
        builder.place(Some(player), EntityKind::MeleeBase, corner);
        let fighters = rng.gen_range(1..=4);
        let area = (corner.offset(-quarter / 2, -quarter / 2), quarter.max(1));
        builder.scatter(&mut rng, Some(player), EntityKind::MeleeUnit, area, fighters);
    }

    // Resource clusters in the middle half
    let clusters = (n / 8).max(1) as usize;
    for _ in 0..clusters {
        let center = Cell::new(
            rng.gen_range(quarter..(n - quarter).max(quarter + 1)),
            rng.gen_range(quarter..(n - quarter).max(quarter + 1)),
        );
        let amount = rng.gen_range(3..=10);
        builder.scatter(
            &mut rng,
            None,
            EntityKind::Resource,
            (center.offset(-2, -2), 5),
            amount,
        );
    }

    let players = (1..=4)
        .map(|id| Player {
            id: PlayerId(id),
            score: 0,
            resource: rng.gen_range(0..=300),
        })
        .collect();

    tracing::debug!(
        "Generated scenario seed={} map={} with {} entities",
        seed,
        n,
        builder.entities.len()
    );

    PlayerView {
        my_id: MY_ID,
        map_size: n,
        current_tick: 0,
        players,
        entities: builder.entities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_snapshot() {
        assert_eq!(generate(42, 40), generate(42, 40));
    }

    #[test]
    fn test_footprints_on_map_and_disjoint() {
        let view = generate(7, 40);
        let table = PropertyTable::standard();
        let mut grid = OccupancyGrid::new(view.map_size);

        for entity in &view.entities {
            let size = table.size_of(entity.kind);
            assert_eq!(grid.footprint_level(entity.position, size), Occupancy::Empty);
            let occupant = Occupant {
                id: entity.id,
                kind: entity.kind,
                movable: false,
            };
            grid.place(occupant, entity.position, size).unwrap();
        }
    }

    #[test]
    fn test_own_economy_present() {
        let view = generate(3, 60);
        let mine: Vec<&Entity> = view.entities.iter().filter(|e| e.is_mine(MY_ID)).collect();

        assert!(mine.iter().any(|e| e.kind == EntityKind::BuilderBase));
        assert!(mine.iter().filter(|e| e.kind == EntityKind::BuilderUnit).count() >= 3);
        assert!(view.entities.iter().any(|e| e.kind == EntityKind::Resource));
        assert!(view.entities.iter().any(|e| e.player_id == Some(PlayerId(2))));
    }

    #[test]
    fn test_tiny_map_still_valid() {
        let view = generate(1, 8);
        assert_eq!(view.map_size, 8);
        assert!(view.my_resources().is_ok());
    }
}
