//! Strategy configuration with documented constants
//!
//! All tuning numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{Result, StrategyError};
use crate::core::types::Cell;

/// Upper bound on `house_crew_size` and `max_house_projects`
pub const MAX_HOUSE_PARAMETER: usize = 64;

/// Configuration for the decision pipeline
///
/// Loaded once per session. Every field has a default, so a TOML file only
/// needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    // === HOUSING ===
    /// Number of builders nearest the origin that anchor house placement
    ///
    /// Also the per-project cap on builders sent to project cells, so two
    /// open projects draw at most `2 * house_crew_size` builders.
    pub house_crew_size: usize,

    /// Maximum number of concurrently open house projects
    pub max_house_projects: usize,

    /// House placement scans diagonals up to
    /// `map_size * house_scan_numerator / house_scan_denominator`
    pub house_scan_numerator: i32,
    pub house_scan_denominator: i32,

    // === TARGETING ===
    /// Maximum number of claims a cell may carry and still be a target cell
    ///
    /// Cells claimed by this many targets or more are discarded. At 3, an
    /// interaction cell serves at most two neighbouring targets.
    pub slot_claim_limit: u32,

    /// Number of enemies picked as combat targets each tick
    pub enemy_target_count: usize,

    /// Fallback destination for combat units without a target
    pub rally_point: Cell,

    // === PRODUCTION ===
    /// Lower bound on the builder headcount target
    pub builder_floor: i64,

    /// Upper bound on the builder headcount target
    pub builder_ceiling: i64,

    /// Fraction of available population reserved for builders
    pub builder_share: f64,

    /// Fraction of the non-builder population given to ranged units
    pub ranged_share: f64,

    /// Fraction of the non-builder population given to melee units
    pub melee_share: f64,

    // === DISTANCE FIELD ===
    /// Cost of entering a resource cell when the property table cannot
    /// provide one (resource health / builder damage + 1 step)
    pub fallback_resource_step_cost: u32,

    // === PARALLELIZATION ===
    /// Run the distance field and the project planner concurrently
    pub parallel_stages: bool,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            house_crew_size: 3,
            max_house_projects: 2,
            house_scan_numerator: 2,
            house_scan_denominator: 3,

            slot_claim_limit: 3,
            enemy_target_count: 5,
            rally_point: Cell::new(25, 25),

            builder_floor: 5,
            builder_ceiling: 60,
            builder_share: 0.4,
            ranged_share: 0.5,
            melee_share: 0.5,

            // resource health 30, builder damage 5: 30 / 5 + 1
            fallback_resource_step_cost: 7,

            parallel_stages: true,
        }
    }
}

impl StrategyConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a config from a TOML string and validate it
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: StrategyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.house_scan_denominator <= 0 || self.house_scan_numerator < 0 {
            return Err(StrategyError::Config(format!(
                "house scan fraction {}/{} must be non-negative with a positive denominator",
                self.house_scan_numerator, self.house_scan_denominator
            )));
        }

        // Diagonals of a square map run up to twice its size
        if self.house_scan_numerator as i64 > 2 * self.house_scan_denominator as i64 {
            return Err(StrategyError::Config(format!(
                "house scan fraction {}/{} exceeds 2",
                self.house_scan_numerator, self.house_scan_denominator
            )));
        }

        if self.house_crew_size == 0 {
            return Err(StrategyError::Config(
                "house_crew_size must be at least 1".into(),
            ));
        }

        for (name, value) in [
            ("house_crew_size", self.house_crew_size),
            ("max_house_projects", self.max_house_projects),
        ] {
            if value > MAX_HOUSE_PARAMETER {
                return Err(StrategyError::Config(format!(
                    "{} ({}) must be at most {}",
                    name, value, MAX_HOUSE_PARAMETER
                )));
            }
        }

        if self.builder_floor > self.builder_ceiling {
            return Err(StrategyError::Config(format!(
                "builder_floor ({}) should be <= builder_ceiling ({})",
                self.builder_floor, self.builder_ceiling
            )));
        }

        for (name, share) in [
            ("builder_share", self.builder_share),
            ("ranged_share", self.ranged_share),
            ("melee_share", self.melee_share),
        ] {
            if !(0.0..=1.0).contains(&share) {
                return Err(StrategyError::Config(format!(
                    "{} ({}) must be within 0..=1",
                    name, share
                )));
            }
        }

        if self.slot_claim_limit < 2 {
            return Err(StrategyError::Config(
                "slot_claim_limit below 2 rejects every cell".into(),
            ));
        }

        if self.fallback_resource_step_cost == 0 {
            return Err(StrategyError::Config(
                "fallback_resource_step_cost must be positive".into(),
            ));
        }

        Ok(())
    }

    /// Diagonal count scanned by house placement on a map of this size
    pub fn house_scan_radius(&self, map_size: i32) -> i32 {
        if self.house_scan_denominator <= 0 {
            return 0;
        }
        let radius = map_size as i64 * self.house_scan_numerator as i64
            / self.house_scan_denominator as i64;
        radius.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}
