//! Greedy builder to cell matching

use ahash::{AHashMap, AHashSet};

use crate::core::types::{Cell, EntityId};
use crate::model::entity::Entity;

/// Candidate cells sharing one capacity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionGroup {
    pub positions: Vec<Cell>,
    /// Most builders this group may take; `None` is unbounded
    pub capacity: Option<usize>,
}

impl PositionGroup {
    pub fn new(positions: Vec<Cell>, capacity: Option<usize>) -> Self {
        Self {
            positions,
            capacity,
        }
    }
}

/// Match builders to cells, group by group
///
/// Within a group every pair of a still-free builder and a still-free cell is
/// an edge; edges are taken shortest first, ties in builder then cell order.
/// A builder or cell committed in an earlier group is never reused.
pub fn assign_builders(builders: &[Entity], groups: &[PositionGroup]) -> AHashMap<EntityId, Cell> {
    let mut assigned: AHashMap<EntityId, Cell> = AHashMap::new();
    let mut taken: AHashSet<Cell> = AHashSet::new();

    for group in groups {
        let mut edges: Vec<(u32, usize, usize)> = Vec::new();
        for (b, builder) in builders.iter().enumerate() {
            if assigned.contains_key(&builder.id) {
                continue;
            }
            for (p, position) in group.positions.iter().enumerate() {
                if taken.contains(position) {
                    continue;
                }
                edges.push((builder.position.distance(position), b, p));
            }
        }
        edges.sort_unstable();

        let mut committed = 0;
        for (distance, b, p) in edges {
            if group.capacity.is_some_and(|cap| committed >= cap) {
                break;
            }
            let builder = &builders[b];
            let position = group.positions[p];
            if assigned.contains_key(&builder.id) || taken.contains(&position) {
                continue;
            }

            tracing::trace!("Builder {} -> {} ({} steps)", builder.id, position, distance);
            assigned.insert(builder.id, position);
            taken.insert(position);
            committed += 1;
        }
    }

    assigned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PlayerId;
    use crate::model::entity::EntityKind;

    fn builder(id: u32, x: i32, y: i32) -> Entity {
        Entity::new(
            EntityId(id),
            Some(PlayerId(1)),
            EntityKind::BuilderUnit,
            Cell::new(x, y),
            10,
        )
    }

    #[test]
    fn test_closest_pairs_first() {
        let builders = vec![builder(1, 0, 0), builder(2, 10, 10)];
        let group = PositionGroup::new(vec![Cell::new(9, 9), Cell::new(1, 1)], None);

        let assigned = assign_builders(&builders, &[group]);
        assert_eq!(assigned[&EntityId(1)], Cell::new(1, 1));
        assert_eq!(assigned[&EntityId(2)], Cell::new(9, 9));
    }

    #[test]
    fn test_greedy_not_optimal() {
        // Builder 1 takes the shared nearest cell even though that strands builder 2
        let builders = vec![builder(1, 5, 0), builder(2, 4, 0)];
        let group = PositionGroup::new(vec![Cell::new(5, 1), Cell::new(0, 0)], None);

        let assigned = assign_builders(&builders, &[group]);
        assert_eq!(assigned[&EntityId(1)], Cell::new(5, 1));
        assert_eq!(assigned[&EntityId(2)], Cell::new(0, 0));
    }

    #[test]
    fn test_ties_prefer_earlier_builder() {
        let builders = vec![builder(1, 4, 5), builder(2, 6, 5)];
        let group = PositionGroup::new(vec![Cell::new(5, 5)], None);

        let assigned = assign_builders(&builders, &[group]);
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[&EntityId(1)], Cell::new(5, 5));
    }

    #[test]
    fn test_capacity_limits_group() {
        let builders: Vec<Entity> = (0..5).map(|i| builder(i, i as i32, 0)).collect();
        let cells = (0..5).map(|i| Cell::new(i, 1)).collect();
        let assigned = assign_builders(&builders, &[PositionGroup::new(cells, Some(2))]);
        assert_eq!(assigned.len(), 2);
    }

    #[test]
    fn test_later_group_gets_leftovers() {
        let builders: Vec<Entity> = (0..4).map(|i| builder(i, i as i32, 0)).collect();
        let project = PositionGroup::new(vec![Cell::new(0, 1), Cell::new(1, 1), Cell::new(2, 1)], Some(1));
        let resource = PositionGroup::new(vec![Cell::new(0, 1), Cell::new(3, 1), Cell::new(2, 1)], None);

        let assigned = assign_builders(&builders, &[project, resource]);
        assert_eq!(assigned.len(), 3);
        assert_eq!(assigned[&EntityId(0)], Cell::new(0, 1));
        // (0, 1) already committed; the rest go to resource cells
        let cells: AHashSet<Cell> = assigned.values().copied().collect();
        assert_eq!(cells.len(), 3);
        assert!(cells.contains(&Cell::new(3, 1)));
        assert!(cells.contains(&Cell::new(2, 1)));
    }

    #[test]
    fn test_more_builders_than_cells() {
        let builders: Vec<Entity> = (0..5).map(|i| builder(i, 0, i as i32)).collect();
        let group = PositionGroup::new(vec![Cell::new(1, 0), Cell::new(1, 1), Cell::new(1, 2)], None);

        let assigned = assign_builders(&builders, &[group]);
        assert_eq!(assigned.len(), 3);
        assert!(!assigned.contains_key(&EntityId(3)));
        assert!(!assigned.contains_key(&EntityId(4)));
    }
}
