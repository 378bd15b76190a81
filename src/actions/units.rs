//! Unit roles: builders, fighters and turrets

use crate::core::types::Cell;
use crate::model::action::{AttackAction, EntityAction, RepairAction};
use crate::model::entity::{Entity, EntityKind};
use crate::model::properties::PropertyTable;
use crate::planning::project::{Project, ProjectList};

/// Builder role
///
/// Walks to its assigned cell without engaging anything on the way. Once
/// there it builds or repairs the first project it touches and chops any
/// resource in reach. Builders with nowhere to go head for the far corner.
pub fn builder_action(
    builder: &Entity,
    target: Option<Cell>,
    projects: &ProjectList,
    properties: &PropertyTable,
    map_size: i32,
) -> EntityAction {
    let Some(target) = target else {
        let far_corner = Cell::new(map_size - 1, map_size - 1);
        return EntityAction::move_to(far_corner, true, false);
    };

    if builder.position != target {
        return EntityAction::move_to(target, true, true);
    }

    let touched = projects
        .iter()
        .find(|p| builder.position.is_adjacent_to(p.position(), properties.size_of(p.kind())));

    let action = match touched {
        Some(project) => {
            let mut action = EntityAction::build(project.kind(), project.position());
            if let Project::Real(entity) = project {
                action.repair_action = Some(RepairAction { target: entity.id });
            }
            action
        }
        None => EntityAction::default(),
    };

    action.with_attack(AttackAction::auto(0, vec![EntityKind::Resource]))
}

/// Melee and ranged role: chase the assigned enemy, else gather at the rally point
pub fn combat_action(target: Option<Cell>, sight_range: i32, rally_point: Cell) -> EntityAction {
    match target {
        Some(target) => EntityAction::move_to(target, true, true)
            .with_attack(AttackAction::auto(sight_range, Vec::new())),
        None => EntityAction::move_to(rally_point, true, false),
    }
}

/// Turrets fire at anything in range
pub fn turret_action() -> EntityAction {
    EntityAction::default().with_attack(AttackAction::auto(0, Vec::new()))
}
