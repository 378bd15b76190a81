//! Action synthesis
//!
//! Dispatches every owned entity to its role and collects at most one
//! action per entity. Houses and resources never act.

pub mod bases;
pub mod units;

use crate::assignment::Assignments;
use crate::core::config::StrategyConfig;
use crate::model::action::{ActionSet, EntityAction};
use crate::model::entity::{Entity, EntityKind};
use crate::model::properties::PropertyTable;
use crate::planning::project::ProjectList;
use crate::world::index::WorldIndex;
use crate::world::population::HeadcountTargets;

pub use bases::{base_action, spawn_cell};
pub use units::{builder_action, combat_action, turret_action};

/// Build the action set for every owned entity in the index
pub fn synthesize(
    index: &WorldIndex,
    projects: &ProjectList,
    assignments: &Assignments,
    headcounts: &HeadcountTargets,
    properties: &PropertyTable,
    config: &StrategyConfig,
) -> ActionSet {
    let mut actions = ActionSet::new();

    for entity in index.all_mine() {
        let Some(action) =
            entity_action(entity, index, projects, assignments, headcounts, properties, config)
        else {
            continue;
        };
        if !actions.insert(entity.id, action) {
            tracing::warn!("Duplicate entity {} in snapshot, keeping first action", entity.id);
        }
    }

    tracing::debug!("Synthesized {} actions", actions.len());
    actions
}

fn entity_action(
    entity: &Entity,
    index: &WorldIndex,
    projects: &ProjectList,
    assignments: &Assignments,
    headcounts: &HeadcountTargets,
    properties: &PropertyTable,
    config: &StrategyConfig,
) -> Option<EntityAction> {
    match entity.kind {
        EntityKind::BuilderUnit => Some(builder_action(
            entity,
            assignments.builder_target(entity.id),
            projects,
            properties,
            index.map_size,
        )),
        EntityKind::MeleeUnit | EntityKind::RangedUnit => {
            let sight_range = properties.get(entity.kind).ok()?.sight_range;
            Some(combat_action(
                assignments.combat_target(entity.id),
                sight_range,
                config.rally_point,
            ))
        }
        EntityKind::Turret => Some(turret_action()),
        EntityKind::BuilderBase | EntityKind::MeleeBase | EntityKind::RangedBase => {
            match base_action(entity, index, headcounts, properties) {
                Ok(action) => action,
                Err(e) => {
                    tracing::warn!("No action for base {}: {}", entity.id, e);
                    None
                }
            }
        }
        EntityKind::House | EntityKind::Resource => None,
    }
}
