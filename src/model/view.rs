//! One tick's snapshot of the game as seen by the deciding player

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{Result, StrategyError};
use crate::core::types::{PlayerId, Tick};
use crate::model::entity::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub score: i32,
    pub resource: i32,
}

/// Full world snapshot for a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub my_id: PlayerId,
    pub map_size: i32,
    pub current_tick: Tick,
    pub players: Vec<Player>,
    pub entities: Vec<Entity>,
}

impl PlayerView {
    pub fn load_from_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Resources banked by the deciding player
    pub fn my_resources(&self) -> Result<i32> {
        self.resources_of(self.my_id)
    }

    pub fn resources_of(&self, player: PlayerId) -> Result<i32> {
        self.players
            .iter()
            .find(|p| p.id == player)
            .map(|p| p.resource)
            .ok_or(StrategyError::UnknownPlayer(player))
    }
}
