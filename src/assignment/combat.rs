//! Enemy target selection and combat unit assignment

use ahash::AHashMap;

use crate::core::types::{Cell, EntityId};
use crate::model::entity::Entity;

/// Up to `count` enemies, closest to the origin first
///
/// Enemies at equal distance keep their input order.
pub fn select_enemy_targets<'a>(
    enemies: impl IntoIterator<Item = &'a Entity>,
    count: usize,
) -> Vec<&'a Entity> {
    let mut remaining: Vec<&Entity> = enemies.into_iter().collect();
    let mut targets = Vec::with_capacity(count.min(remaining.len()));

    while targets.len() < count {
        let closest = remaining
            .iter()
            .enumerate()
            .min_by_key(|(i, e)| (e.position.distance(&Cell::ORIGIN), *i))
            .map(|(i, _)| i);
        match closest {
            Some(i) => targets.push(remaining.remove(i)),
            None => break,
        }
    }

    targets
}

/// Send every combat unit to its nearest target
///
/// Earlier targets win ties. Nothing is assigned when there are no targets.
pub fn assign_combat_units<'a>(
    units: impl IntoIterator<Item = &'a Entity>,
    targets: &[&Entity],
) -> AHashMap<EntityId, Cell> {
    let mut assigned = AHashMap::new();
    if targets.is_empty() {
        return assigned;
    }

    for unit in units {
        let mut nearest: Option<(u32, Cell)> = None;
        for target in targets {
            let distance = unit.position.distance(&target.position);
            if nearest.map_or(true, |(best, _)| distance < best) {
                nearest = Some((distance, target.position));
            }
        }
        if let Some((_, position)) = nearest {
            tracing::trace!("Unit {} attacking {}", unit.id, position);
            assigned.insert(unit.id, position);
        }
    }

    assigned
}
