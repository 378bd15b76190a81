//! One tick of the decision pipeline
//!
//! Pipeline per tick:
//! 1. Index the snapshot (occupancy, ownership, population)
//! 2. Reconcile open projects against the index
//! 3. Distance field and house planning, concurrently when enabled
//! 4. Target cells and unit assignment
//! 5. Action synthesis
//!
//! Everything built here belongs to the tick and is dropped at its end; only
//! the project list is carried over by the session.

use serde::Serialize;

use crate::actions::synthesize;
use crate::assignment::Assignments;
use crate::core::config::StrategyConfig;
use crate::core::types::{Cell, EntityId, PlayerId, Tick};
use crate::model::action::ActionSet;
use crate::model::entity::EntityKind;
use crate::model::properties::PropertyTable;
use crate::model::view::PlayerView;
use crate::planning::housing::plan_house_project;
use crate::planning::project::{Project, ProjectList};
use crate::spatial::distance_field::DistanceField;
use crate::world::index::WorldIndex;
use crate::world::population::{HeadcountTargets, PopulationLedger};

/// Read-only state shared by every stage of one tick
pub struct TickContext<'a> {
    pub current_tick: Tick,
    pub properties: &'a PropertyTable,
    pub config: &'a StrategyConfig,
    pub index: WorldIndex,
    /// Resources banked by the deciding player, 0 if it is missing from the
    /// player list
    pub resources: i32,
}

impl<'a> TickContext<'a> {
    pub fn new(
        view: &PlayerView,
        me: PlayerId,
        properties: &'a PropertyTable,
        config: &'a StrategyConfig,
    ) -> Self {
        let resources = view.resources_of(me).unwrap_or_else(|e| {
            tracing::warn!("{}; assuming no resources", e);
            0
        });

        Self {
            current_tick: view.current_tick,
            properties,
            config,
            index: WorldIndex::build_for(view, me, properties),
            resources,
        }
    }

    pub fn distance_field(&self) -> DistanceField {
        let step = self
            .properties
            .resource_step_cost(self.config.fallback_resource_step_cost);
        DistanceField::compute(&self.index.grid, step)
    }

    pub fn plan_house(&self, projects: &ProjectList) -> Option<Cell> {
        plan_house_project(projects, &self.index, self.resources, self.properties, self.config)
    }

    /// Distance field and house planning; they share nothing mutable
    pub fn spatial_stages(&self, projects: &ProjectList) -> (DistanceField, Option<Cell>) {
        if self.config.parallel_stages {
            rayon::join(|| self.distance_field(), || self.plan_house(projects))
        } else {
            (self.distance_field(), self.plan_house(projects))
        }
    }
}

/// Summary of what a tick decided
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub tick: Tick,
    pub resources: i32,
    pub population: PopulationLedger,
    pub headcounts: HeadcountTargets,
    pub open_projects: usize,
    pub new_project: Option<Cell>,
    pub builders_assigned: usize,
    pub combat_assigned: usize,
    pub enemy_targets: Vec<Cell>,
    pub skipped: Vec<EntityId>,
    pub reachable_cells: usize,
    #[serde(skip)]
    pub distance_field: DistanceField,
}

/// Actions for the tick plus its report
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub actions: ActionSet,
    pub report: TickReport,
}

/// Run the pipeline for one snapshot as player `me`, updating `projects`
/// in place
pub fn run_tick(
    view: &PlayerView,
    me: PlayerId,
    properties: &PropertyTable,
    config: &StrategyConfig,
    projects: &mut ProjectList,
) -> TickOutcome {
    let ctx = TickContext::new(view, me, properties, config);
    projects.reconcile(&ctx.index, properties);

    let (distance_field, planned) = ctx.spatial_stages(projects);
    let new_project = planned.filter(|&position| {
        projects.open(Project::Planned {
            kind: EntityKind::House,
            position,
        })
    });

    let assignments = Assignments::compute(&ctx.index, projects, properties, config);
    let headcounts = HeadcountTargets::from_ledger(&ctx.index.population, config);
    let actions = synthesize(
        &ctx.index,
        projects,
        &assignments,
        &headcounts,
        properties,
        config,
    );

    let report = TickReport {
        tick: ctx.current_tick,
        resources: ctx.resources,
        population: ctx.index.population,
        headcounts,
        open_projects: projects.len(),
        new_project,
        builders_assigned: assignments.builders.len(),
        combat_assigned: assignments.combat.len(),
        enemy_targets: assignments.enemy_targets.clone(),
        skipped: ctx.index.skipped.clone(),
        reachable_cells: distance_field.settle_order().len(),
        distance_field,
    };

    tracing::debug!(
        "Tick {}: {} actions, {} open projects",
        report.tick,
        actions.len(),
        report.open_projects
    );

    TickOutcome { actions, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::Entity;
    use crate::model::view::Player;

    fn view(players: Vec<Player>, entities: Vec<Entity>) -> PlayerView {
        PlayerView {
            my_id: PlayerId(1),
            map_size: 30,
            current_tick: 7,
            players,
            entities,
        }
    }

    #[test]
    fn test_missing_player_means_no_resources() {
        let table = PropertyTable::standard();
        let config = StrategyConfig::default();
        let ctx = TickContext::new(&view(vec![], vec![]), PlayerId(1), &table, &config);
        assert_eq!(ctx.resources, 0);
        assert_eq!(ctx.current_tick, 7);
    }

    #[test]
    fn test_parallel_and_sequential_stages_agree() {
        let table = PropertyTable::standard();
        let entities = vec![Entity::new(
            EntityId(1),
            None,
            EntityKind::Resource,
            Cell::new(10, 10),
            30,
        )];
        let snapshot = view(
            vec![Player {
                id: PlayerId(1),
                score: 0,
                resource: 0,
            }],
            entities,
        );

        let parallel = StrategyConfig::default();
        let sequential = StrategyConfig {
            parallel_stages: false,
            ..StrategyConfig::default()
        };
        let a = TickContext::new(&snapshot, PlayerId(1), &table, &parallel)
            .spatial_stages(&ProjectList::new());
        let b = TickContext::new(&snapshot, PlayerId(1), &table, &sequential)
            .spatial_stages(&ProjectList::new());
        assert_eq!(a, b);
    }

    #[test]
    fn test_report_counts_reachable_cells() {
        let table = PropertyTable::standard();
        let config = StrategyConfig::default();
        let mut projects = ProjectList::new();
        let outcome = run_tick(&view(vec![], vec![]), PlayerId(1), &table, &config, &mut projects);

        assert_eq!(outcome.report.reachable_cells, 900);
        assert!(outcome.actions.is_empty());
        assert!(outcome.report.new_project.is_none());
    }
}
