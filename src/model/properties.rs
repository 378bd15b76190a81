//! Static per-kind property table
//!
//! Supplied once per session by the game. The table is read-only for the
//! whole session; every stage looks kinds up through `PropertyTable::get`.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{Result, StrategyError};
use crate::model::entity::EntityKind;

/// Attack capability of a kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackProperties {
    pub attack_range: i32,
    pub damage: i32,
    #[serde(default)]
    pub collect_resource: bool,
}

/// Production capability of a kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildProperties {
    pub options: Vec<EntityKind>,
}

/// Repair capability of a kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairProperties {
    pub valid_targets: Vec<EntityKind>,
    pub power: i32,
}

/// Properties shared by every entity of one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityProperties {
    pub size: i32,
    pub population_provide: i32,
    pub population_use: i32,
    pub max_health: i32,
    pub initial_cost: i32,
    pub sight_range: i32,
    pub can_move: bool,
    #[serde(default)]
    pub attack: Option<AttackProperties>,
    #[serde(default)]
    pub build: Option<BuildProperties>,
    #[serde(default)]
    pub repair: Option<RepairProperties>,
}

impl EntityProperties {
    fn structure(size: i32, max_health: i32, initial_cost: i32, population_provide: i32) -> Self {
        Self {
            size,
            population_provide,
            population_use: 0,
            max_health,
            initial_cost,
            sight_range: 5,
            can_move: false,
            attack: None,
            build: None,
            repair: None,
        }
    }

    fn unit(max_health: i32, initial_cost: i32, attack_range: i32, damage: i32) -> Self {
        Self {
            size: 1,
            population_provide: 0,
            population_use: 1,
            max_health,
            initial_cost,
            sight_range: 10,
            can_move: true,
            attack: Some(AttackProperties {
                attack_range,
                damage,
                collect_resource: false,
            }),
            build: None,
            repair: None,
        }
    }

    fn base(produces: EntityKind) -> Self {
        Self {
            build: Some(BuildProperties {
                options: vec![produces],
            }),
            ..Self::structure(5, 300, 500, 5)
        }
    }
}

/// Read-only lookup from kind to properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyTable {
    kinds: AHashMap<EntityKind, EntityProperties>,
}

impl PropertyTable {
    pub fn new(kinds: AHashMap<EntityKind, EntityProperties>) -> Self {
        Self { kinds }
    }

    /// The game's stock property values
    pub fn standard() -> Self {
        let mut kinds = AHashMap::new();

        kinds.insert(EntityKind::House, EntityProperties::structure(3, 50, 50, 5));
        kinds.insert(EntityKind::BuilderBase, EntityProperties::base(EntityKind::BuilderUnit));
        kinds.insert(EntityKind::MeleeBase, EntityProperties::base(EntityKind::MeleeUnit));
        kinds.insert(EntityKind::RangedBase, EntityProperties::base(EntityKind::RangedUnit));

        let mut builder = EntityProperties::unit(10, 10, 1, 5);
        if let Some(attack) = builder.attack.as_mut() {
            attack.collect_resource = true;
        }
        builder.repair = Some(RepairProperties {
            valid_targets: vec![
                EntityKind::House,
                EntityKind::BuilderBase,
                EntityKind::MeleeBase,
                EntityKind::RangedBase,
                EntityKind::Turret,
            ],
            power: 1,
        });
        kinds.insert(EntityKind::BuilderUnit, builder);
        kinds.insert(EntityKind::MeleeUnit, EntityProperties::unit(50, 20, 1, 5));
        kinds.insert(EntityKind::RangedUnit, EntityProperties::unit(10, 30, 5, 5));

        kinds.insert(
            EntityKind::Resource,
            EntityProperties {
                sight_range: 0,
                ..EntityProperties::structure(1, 30, 0, 0)
            },
        );

        let mut turret = EntityProperties::structure(2, 100, 50, 0);
        turret.sight_range = 10;
        turret.attack = Some(AttackProperties {
            attack_range: 5,
            damage: 5,
            collect_resource: false,
        });
        kinds.insert(EntityKind::Turret, turret);

        Self { kinds }
    }

    /// Load a table from a JSON file keyed by kind name
    pub fn load_from_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_json(&content)
    }

    pub fn parse_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn get(&self, kind: EntityKind) -> Result<&EntityProperties> {
        self.kinds
            .get(&kind)
            .ok_or(StrategyError::MissingProperties(kind))
    }

    pub fn contains(&self, kind: EntityKind) -> bool {
        self.kinds.contains_key(&kind)
    }

    /// Footprint side length, or 1 if the kind is unknown
    pub fn size_of(&self, kind: EntityKind) -> i32 {
        self.kinds.get(&kind).map(|p| p.size).unwrap_or(1)
    }

    /// Whether the builder unit may repair this kind
    pub fn is_repairable(&self, kind: EntityKind) -> bool {
        self.kinds
            .get(&EntityKind::BuilderUnit)
            .and_then(|p| p.repair.as_ref())
            .map(|r| r.valid_targets.contains(&kind))
            .unwrap_or(false)
    }

    /// Mobile kinds with an attack, other than the builder unit
    pub fn is_combat_unit(&self, kind: EntityKind) -> bool {
        kind != EntityKind::BuilderUnit
            && self
                .kinds
                .get(&kind)
                .map(|p| p.can_move && p.attack.is_some())
                .unwrap_or(false)
    }

    /// Steps needed to cross a resource cell by chopping through it:
    /// `ceil(resource health / builder damage) + 1`
    pub fn resource_step_cost(&self, fallback: u32) -> u32 {
        let health = self.kinds.get(&EntityKind::Resource).map(|p| p.max_health);
        let damage = self
            .kinds
            .get(&EntityKind::BuilderUnit)
            .and_then(|p| p.attack.as_ref())
            .map(|a| a.damage);

        match (health, damage) {
            (Some(health), Some(damage)) if health > 0 && damage > 0 => {
                (health as u32).div_ceil(damage as u32).saturating_add(1)
            }
            _ => fallback,
        }
    }
}

impl Default for PropertyTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_covers_every_kind() {
        let table = PropertyTable::standard();
        for kind in EntityKind::ALL {
            assert!(table.contains(kind), "missing {:?}", kind);
        }
    }

    #[test]
    fn test_resource_step_cost_from_table() {
        let table = PropertyTable::standard();
        assert_eq!(table.resource_step_cost(99), 7);
    }

    #[test]
    fn test_resource_step_cost_with_extreme_health() {
        let mut table = PropertyTable::standard();
        if let Some(props) = table.kinds.get_mut(&EntityKind::Resource) {
            props.max_health = i32::MAX;
        }
        if let Some(attack) = table
            .kinds
            .get_mut(&EntityKind::BuilderUnit)
            .and_then(|p| p.attack.as_mut())
        {
            attack.damage = 1;
        }
        assert_eq!(table.resource_step_cost(7), i32::MAX as u32 + 1);
    }

    #[test]
    fn test_resource_step_cost_falls_back() {
        let mut kinds = AHashMap::new();
        kinds.insert(EntityKind::House, EntityProperties::structure(3, 50, 50, 5));
        let table = PropertyTable::new(kinds);
        assert_eq!(table.resource_step_cost(7), 7);
    }

    #[test]
    fn test_repairable_and_combat_kinds() {
        let table = PropertyTable::standard();
        assert!(table.is_repairable(EntityKind::House));
        assert!(table.is_repairable(EntityKind::Turret));
        assert!(!table.is_repairable(EntityKind::Resource));

        assert!(table.is_combat_unit(EntityKind::MeleeUnit));
        assert!(table.is_combat_unit(EntityKind::RangedUnit));
        assert!(!table.is_combat_unit(EntityKind::BuilderUnit));
        assert!(!table.is_combat_unit(EntityKind::Turret));
    }

    #[test]
    fn test_missing_kind_is_an_error() {
        let table = PropertyTable::new(AHashMap::new());
        assert!(matches!(
            table.get(EntityKind::House),
            Err(StrategyError::MissingProperties(EntityKind::House))
        ));
    }

    #[test]
    fn test_json_round_trip_through_kind_names() {
        let table = PropertyTable::standard();
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("\"BUILDER_BASE\""));
        let parsed = PropertyTable::parse_json(&json).unwrap();
        assert_eq!(parsed, table);
    }
}
