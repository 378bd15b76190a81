//! Per-tick world index built from the raw snapshot
//!
//! Places every footprint on the occupancy grid, partitions entities by
//! owner and kind, and sums the population ledger. Entities with no
//! properties or with a footprint off the map are skipped and logged; they
//! take part in nothing downstream.

use std::collections::BTreeMap;

use crate::core::types::{EntityId, PlayerId};
use crate::model::entity::{Entity, EntityKind, Owner};
use crate::model::properties::PropertyTable;
use crate::model::view::PlayerView;
use crate::spatial::occupancy::{OccupancyGrid, Occupant};
use crate::world::population::PopulationLedger;

#[derive(Debug, Clone)]
pub struct WorldIndex {
    pub map_size: i32,
    /// Owned entities by kind, snapshot order within a kind
    pub mine: BTreeMap<EntityKind, Vec<Entity>>,
    /// Entities of other players by kind
    pub enemies: BTreeMap<EntityKind, Vec<Entity>>,
    pub resources: Vec<Entity>,
    pub grid: OccupancyGrid,
    pub population: PopulationLedger,
    /// Entities left out of the index because their input was malformed
    pub skipped: Vec<EntityId>,
}

impl WorldIndex {
    /// Index a snapshot from the point of view of the player it was sent to
    pub fn build(view: &PlayerView, properties: &PropertyTable) -> Self {
        Self::build_for(view, view.my_id, properties)
    }

    /// Index a snapshot with ownership decided by `me`
    pub fn build_for(view: &PlayerView, me: PlayerId, properties: &PropertyTable) -> Self {
        let mut index = Self {
            map_size: view.map_size,
            mine: BTreeMap::new(),
            enemies: BTreeMap::new(),
            resources: Vec::new(),
            grid: OccupancyGrid::new(view.map_size),
            population: PopulationLedger::default(),
            skipped: Vec::new(),
        };

        for entity in &view.entities {
            let props = match properties.get(entity.kind) {
                Ok(props) => props,
                Err(e) => {
                    tracing::warn!("Skipping entity {}: {}", entity.id, e);
                    index.skipped.push(entity.id);
                    continue;
                }
            };

            let occupant = Occupant {
                id: entity.id,
                kind: entity.kind,
                movable: props.can_move,
            };
            if let Err(e) = index.grid.place(occupant, entity.position, props.size) {
                tracing::warn!("Skipping entity {}: {}", entity.id, e);
                index.skipped.push(entity.id);
                continue;
            }

            match entity.owner(me) {
                Owner::Mine => {
                    index.population.record(props, entity.health);
                    index.mine.entry(entity.kind).or_default().push(entity.clone());
                }
                Owner::Enemy(_) => {
                    index.enemies.entry(entity.kind).or_default().push(entity.clone());
                }
                Owner::Neutral if entity.kind == EntityKind::Resource => {
                    index.resources.push(entity.clone());
                }
                Owner::Neutral => {
                    tracing::trace!("Ignoring unowned {:?} {}", entity.kind, entity.id);
                }
            }
        }

        tracing::debug!(
            "Indexed {} own, {} enemy, {} resource entities ({} skipped), population {}/{}",
            index.mine.values().map(Vec::len).sum::<usize>(),
            index.enemies.values().map(Vec::len).sum::<usize>(),
            index.resources.len(),
            index.skipped.len(),
            index.population.used,
            index.population.available
        );

        index
    }

    /// Owned entities of one kind
    pub fn mine_of(&self, kind: EntityKind) -> &[Entity] {
        self.mine.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count_mine(&self, kind: EntityKind) -> usize {
        self.mine_of(kind).len()
    }

    /// All owned entities, grouped by kind in kind order
    pub fn all_mine(&self) -> impl Iterator<Item = &Entity> {
        self.mine.values().flatten()
    }

    /// All enemy entities, grouped by kind in kind order
    pub fn all_enemies(&self) -> impl Iterator<Item = &Entity> {
        self.enemies.values().flatten()
    }

    /// Owned mobile fighters (everything that can move and attack except builders)
    pub fn combat_units<'a>(&'a self, properties: &'a PropertyTable) -> impl Iterator<Item = &'a Entity> {
        self.mine
            .iter()
            .filter(move |(kind, _)| properties.is_combat_unit(**kind))
            .flat_map(|(_, entities)| entities.iter())
    }

    pub fn find_mine(&self, id: EntityId) -> Option<&Entity> {
        self.all_mine().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Cell;
    use crate::model::view::Player;
    use crate::spatial::occupancy::Occupancy;

    fn entity(id: u32, player: Option<u32>, kind: EntityKind, x: i32, y: i32, health: i32) -> Entity {
        Entity::new(EntityId(id), player.map(PlayerId), kind, Cell::new(x, y), health)
    }

    fn view(entities: Vec<Entity>) -> PlayerView {
        PlayerView {
            my_id: PlayerId(1),
            map_size: 20,
            current_tick: 0,
            players: vec![Player {
                id: PlayerId(1),
                score: 0,
                resource: 100,
            }],
            entities,
        }
    }

    #[test]
    fn test_partition_by_owner_and_kind() {
        let snapshot = view(vec![
            entity(1, Some(1), EntityKind::BuilderUnit, 1, 1, 10),
            entity(2, Some(1), EntityKind::House, 3, 3, 50),
            entity(3, Some(2), EntityKind::MeleeUnit, 15, 15, 50),
            entity(4, None, EntityKind::Resource, 10, 10, 30),
        ]);
        let index = WorldIndex::build(&snapshot, &PropertyTable::standard());

        assert_eq!(index.count_mine(EntityKind::BuilderUnit), 1);
        assert_eq!(index.count_mine(EntityKind::House), 1);
        assert_eq!(index.all_enemies().count(), 1);
        assert_eq!(index.resources.len(), 1);
        assert_eq!(index.population.available, 5);
        assert_eq!(index.population.used, 1);
    }

    #[test]
    fn test_multi_cell_entities_fill_grid() {
        let snapshot = view(vec![entity(2, Some(1), EntityKind::BuilderBase, 0, 0, 300)]);
        let index = WorldIndex::build(&snapshot, &PropertyTable::standard());

        for cell in Cell::new(0, 0).footprint(5) {
            assert_eq!(index.grid.occupant(cell).map(|o| o.id), Some(EntityId(2)));
        }
        assert_eq!(index.grid.level(Cell::new(5, 0)), Occupancy::Empty);
    }

    #[test]
    fn test_off_map_entities_are_skipped() {
        let snapshot = view(vec![
            entity(1, Some(1), EntityKind::House, 18, 18, 50),
            entity(2, Some(1), EntityKind::BuilderUnit, 2, 2, 10),
        ]);
        let index = WorldIndex::build(&snapshot, &PropertyTable::standard());

        assert_eq!(index.skipped, vec![EntityId(1)]);
        assert_eq!(index.count_mine(EntityKind::House), 0);
        assert_eq!(index.population.available, 0);
        assert!(index.find_mine(EntityId(2)).is_some());
    }

    #[test]
    fn test_missing_properties_are_skipped() {
        let mut kinds = ahash::AHashMap::new();
        let standard = PropertyTable::standard();
        kinds.insert(
            EntityKind::BuilderUnit,
            standard.get(EntityKind::BuilderUnit).unwrap().clone(),
        );
        let table = PropertyTable::new(kinds);

        let snapshot = view(vec![
            entity(1, Some(1), EntityKind::Turret, 5, 5, 100),
            entity(2, Some(1), EntityKind::BuilderUnit, 2, 2, 10),
        ]);
        let index = WorldIndex::build(&snapshot, &table);

        assert_eq!(index.skipped, vec![EntityId(1)]);
        assert_eq!(index.all_mine().count(), 1);
    }

    #[test]
    fn test_combat_units_exclude_builders_and_turrets() {
        let snapshot = view(vec![
            entity(1, Some(1), EntityKind::BuilderUnit, 1, 1, 10),
            entity(2, Some(1), EntityKind::RangedUnit, 2, 1, 10),
            entity(3, Some(1), EntityKind::MeleeUnit, 3, 1, 50),
            entity(4, Some(1), EntityKind::Turret, 5, 5, 100),
        ]);
        let table = PropertyTable::standard();
        let index = WorldIndex::build(&snapshot, &table);

        let ids: Vec<EntityId> = index.combat_units(&table).map(|e| e.id).collect();
        // Kind order: melee before ranged
        assert_eq!(ids, vec![EntityId(3), EntityId(2)]);
    }
}
