//! Population accounting and unit headcount targets

use serde::Serialize;

use crate::core::config::StrategyConfig;
use crate::model::entity::EntityKind;
use crate::model::properties::EntityProperties;

/// Population capacity provided and consumed by owned entities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PopulationLedger {
    pub available: i32,
    pub used: i32,
}

impl PopulationLedger {
    /// Account for one owned entity
    ///
    /// Only entities at full health provide capacity; every entity uses it.
    pub fn record(&mut self, properties: &EntityProperties, health: i32) {
        if health >= properties.max_health {
            self.available = self.available.saturating_add(properties.population_provide);
        }
        self.used = self.used.saturating_add(properties.population_use);
    }

    /// All capacity is in use, so production is blocked on housing
    pub fn is_saturated(&self) -> bool {
        self.used == self.available
    }
}

/// How many units of each trained kind the bases aim for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeadcountTargets {
    pub builders: i64,
    pub ranged: i64,
    pub melee: i64,
}

impl HeadcountTargets {
    pub fn from_ledger(ledger: &PopulationLedger, config: &StrategyConfig) -> Self {
        let available = ledger.available as i64;

        let builders = (ceil_share(available, config.builder_share))
            .max(config.builder_floor)
            .min(config.builder_ceiling);
        let rest = available - builders;

        Self {
            builders,
            ranged: ceil_share(rest, config.ranged_share).max(0),
            melee: ceil_share(rest, config.melee_share).max(0),
        }
    }

    pub fn target_for(&self, kind: EntityKind) -> Option<i64> {
        match kind {
            EntityKind::BuilderUnit => Some(self.builders),
            EntityKind::RangedUnit => Some(self.ranged),
            EntityKind::MeleeUnit => Some(self.melee),
            _ => None,
        }
    }
}

fn ceil_share(amount: i64, share: f64) -> i64 {
    (amount as f64 * share).ceil() as i64
}
