//! Production base role

use crate::core::error::Result;
use crate::core::types::Cell;
use crate::model::action::EntityAction;
use crate::model::entity::Entity;
use crate::model::properties::PropertyTable;
use crate::world::index::WorldIndex;
use crate::world::population::HeadcountTargets;

/// Cell where a base of side `size` at `origin` spawns its units
pub fn spawn_cell(origin: Cell, size: i32) -> Cell {
    origin.offset(size, size - 1)
}

/// Train one more unit while the produced kind is under its headcount target
///
/// A base whose kind is at or over target gets an empty action, which stops
/// any production left over from earlier ticks. Returns `Ok(None)` for
/// entities that produce nothing.
pub fn base_action(
    base: &Entity,
    index: &WorldIndex,
    headcounts: &HeadcountTargets,
    properties: &PropertyTable,
) -> Result<Option<EntityAction>> {
    let Some(unit) = base.kind.produces() else {
        return Ok(None);
    };
    let Some(target) = headcounts.target_for(unit) else {
        return Ok(None);
    };

    if index.count_mine(unit) as i64 >= target {
        return Ok(Some(EntityAction::default()));
    }

    let size = properties.get(base.kind)?.size;
    Ok(Some(EntityAction::build(unit, spawn_cell(base.position, size))))
}
