//! Target cells and the greedy assignment of units to them

pub mod builders;
pub mod combat;
pub mod targets;

use ahash::AHashMap;

use crate::core::config::StrategyConfig;
use crate::core::types::{Cell, EntityId};
use crate::model::entity::EntityKind;
use crate::model::properties::PropertyTable;
use crate::planning::project::ProjectList;
use crate::world::index::WorldIndex;

pub use builders::{assign_builders, PositionGroup};
pub use combat::{assign_combat_units, select_enemy_targets};
pub use targets::target_positions;

/// Where every unit is sent this tick
#[derive(Debug, Clone, Default)]
pub struct Assignments {
    pub builders: AHashMap<EntityId, Cell>,
    pub combat: AHashMap<EntityId, Cell>,
    /// Selected enemy positions, closest to the origin first
    pub enemy_targets: Vec<Cell>,
}

impl Assignments {
    pub fn compute(
        index: &WorldIndex,
        projects: &ProjectList,
        properties: &PropertyTable,
        config: &StrategyConfig,
    ) -> Self {
        let project_cells = target_positions(
            projects
                .iter()
                .map(|p| (p.position(), properties.size_of(p.kind()))),
            &index.grid,
            config.slot_claim_limit,
        );
        let resource_size = properties.size_of(EntityKind::Resource);
        let resource_cells = target_positions(
            index.resources.iter().map(|r| (r.position, resource_size)),
            &index.grid,
            config.slot_claim_limit,
        );

        let crew_cap = config.house_crew_size.saturating_mul(projects.len());
        let groups = [
            PositionGroup::new(project_cells, Some(crew_cap)),
            PositionGroup::new(resource_cells, None),
        ];
        let builders = assign_builders(index.mine_of(EntityKind::BuilderUnit), &groups);

        let targets = select_enemy_targets(index.all_enemies(), config.enemy_target_count);
        let combat = assign_combat_units(index.combat_units(properties), &targets);

        tracing::debug!(
            "Assigned {} builders, {} combat units against {} targets",
            builders.len(),
            combat.len(),
            targets.len()
        );

        Self {
            builders,
            combat,
            enemy_targets: targets.iter().map(|e| e.position).collect(),
        }
    }

    pub fn builder_target(&self, id: EntityId) -> Option<Cell> {
        self.builders.get(&id).copied()
    }

    pub fn combat_target(&self, id: EntityId) -> Option<Cell> {
        self.combat.get(&id).copied()
    }
}
