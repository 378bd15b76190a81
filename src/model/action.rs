//! Per-entity action descriptors returned to the game

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::{Cell, EntityId};
use crate::model::entity::EntityKind;

/// Move toward a destination cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAction {
    pub target: Cell,
    /// Stop at the closest reachable cell if the target is taken
    pub find_closest_position: bool,
    /// Attack whatever blocks the path instead of routing around it
    pub break_through: bool,
}

/// Build an entity of `kind` with its origin at `position`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildAction {
    pub kind: EntityKind,
    pub position: Cell,
}

/// Automatic target acquisition
///
/// A `pathfind_range` of 0 means the entity does not move to engage.
/// An empty `valid_targets` list allows every kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAttack {
    pub pathfind_range: i32,
    pub valid_targets: Vec<EntityKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackAction {
    pub target: Option<EntityId>,
    pub auto_attack: Option<AutoAttack>,
}

impl AttackAction {
    pub fn auto(pathfind_range: i32, valid_targets: Vec<EntityKind>) -> Self {
        Self {
            target: None,
            auto_attack: Some(AutoAttack {
                pathfind_range,
                valid_targets,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairAction {
    pub target: EntityId,
}

/// Action for one entity; any subset of the components may be present
///
/// An action with no components clears whatever the entity was doing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_action: Option<MoveAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_action: Option<BuildAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_action: Option<AttackAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repair_action: Option<RepairAction>,
}

impl EntityAction {
    pub fn move_to(target: Cell, find_closest_position: bool, break_through: bool) -> Self {
        Self {
            move_action: Some(MoveAction {
                target,
                find_closest_position,
                break_through,
            }),
            ..Self::default()
        }
    }

    pub fn build(kind: EntityKind, position: Cell) -> Self {
        Self {
            build_action: Some(BuildAction { kind, position }),
            ..Self::default()
        }
    }

    pub fn with_attack(mut self, attack: AttackAction) -> Self {
        self.attack_action = Some(attack);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.move_action.is_none()
            && self.build_action.is_none()
            && self.attack_action.is_none()
            && self.repair_action.is_none()
    }
}

/// Actions for one tick, keyed by owned entity id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet {
    pub actions: BTreeMap<EntityId, EntityAction>,
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the action for an entity
    ///
    /// Returns false and keeps the first action if the entity already has one.
    pub fn insert(&mut self, id: EntityId, action: EntityAction) -> bool {
        match self.actions.entry(id) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(action);
                true
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityAction> {
        self.actions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &EntityAction)> {
        self.actions.iter()
    }
}
