//! Decision state that lives across ticks

use crate::core::config::StrategyConfig;
use crate::core::error::Result;
use crate::core::types::PlayerId;
use crate::model::properties::PropertyTable;
use crate::model::view::PlayerView;
use crate::planning::project::ProjectList;
use crate::strategy::tick::{run_tick, TickOutcome};

/// The deciding player's strategy over a whole game
///
/// Holds only what must survive between ticks: the player id, the property
/// table, the configuration and the open projects.
#[derive(Debug, Clone)]
pub struct Session {
    my_id: PlayerId,
    properties: PropertyTable,
    config: StrategyConfig,
    projects: ProjectList,
}

impl Session {
    pub fn new(my_id: PlayerId, properties: PropertyTable, config: StrategyConfig) -> Result<Self> {
        config.validate()?;
        tracing::info!("Session started for player {:?}", my_id);
        Ok(Self {
            my_id,
            properties,
            config,
            projects: ProjectList::new(),
        })
    }

    pub fn my_id(&self) -> PlayerId {
        self.my_id
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn properties(&self) -> &PropertyTable {
        &self.properties
    }

    pub fn projects(&self) -> &ProjectList {
        &self.projects
    }

    /// Decide this tick's actions; ownership follows the session's player
    /// even when the snapshot names another
    pub fn tick(&mut self, view: &PlayerView) -> TickOutcome {
        if view.my_id != self.my_id {
            tracing::warn!(
                "Snapshot is for player {:?}, session for {:?}",
                view.my_id,
                self.my_id
            );
        }
        run_tick(view, self.my_id, &self.properties, &self.config, &mut self.projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::StrategyError;
    use crate::core::types::{Cell, EntityId};
    use crate::model::entity::{Entity, EntityKind};
    use crate::model::view::Player;

    #[test]
    fn test_invalid_config_rejected() {
        let config = StrategyConfig {
            house_crew_size: 0,
            ..StrategyConfig::default()
        };
        let result = Session::new(PlayerId(1), PropertyTable::standard(), config);
        assert!(matches!(result, Err(StrategyError::Config(_))));
    }

    #[test]
    fn test_projects_carry_over_between_ticks() {
        let mut session =
            Session::new(PlayerId(1), PropertyTable::standard(), StrategyConfig::default()).unwrap();

        // Saturated: one full house, five builders, funds for one house
        let mut entities = vec![Entity::new(
            EntityId(100),
            Some(PlayerId(1)),
            EntityKind::House,
            Cell::new(30, 30),
            50,
        )];
        entities.extend((0..5).map(|i| {
            Entity::new(
                EntityId(i + 1),
                Some(PlayerId(1)),
                EntityKind::BuilderUnit,
                Cell::new(8 + i as i32, 8),
                10,
            )
        }));
        let view = PlayerView {
            my_id: PlayerId(1),
            map_size: 40,
            current_tick: 0,
            players: vec![Player {
                id: PlayerId(1),
                score: 0,
                resource: 60,
            }],
            entities,
        };

        let first = session.tick(&view);
        assert!(first.report.new_project.is_some());
        assert_eq!(session.projects().len(), 1);

        // 60 no longer covers two houses
        let second = session.tick(&view);
        assert!(second.report.new_project.is_none());
        assert_eq!(session.projects().len(), 1);
    }

    #[test]
    fn test_ownership_follows_session_player() {
        let mut session =
            Session::new(PlayerId(1), PropertyTable::standard(), StrategyConfig::default()).unwrap();

        // Snapshot addressed to player 2, one melee unit on each side
        let view = PlayerView {
            my_id: PlayerId(2),
            map_size: 40,
            current_tick: 0,
            players: vec![
                Player {
                    id: PlayerId(1),
                    score: 0,
                    resource: 25,
                },
                Player {
                    id: PlayerId(2),
                    score: 0,
                    resource: 90,
                },
            ],
            entities: vec![
                Entity::new(
                    EntityId(1),
                    Some(PlayerId(1)),
                    EntityKind::MeleeUnit,
                    Cell::new(5, 5),
                    50,
                ),
                Entity::new(
                    EntityId(2),
                    Some(PlayerId(2)),
                    EntityKind::MeleeUnit,
                    Cell::new(30, 30),
                    50,
                ),
            ],
        };

        let outcome = session.tick(&view);
        assert!(outcome.actions.get(EntityId(1)).is_some());
        assert!(outcome.actions.get(EntityId(2)).is_none());
        assert_eq!(outcome.report.resources, 25);
        assert_eq!(outcome.report.enemy_targets, vec![Cell::new(30, 30)]);
    }
}
