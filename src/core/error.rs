use thiserror::Error;

use crate::core::types::{Cell, EntityId, PlayerId};
use crate::model::entity::EntityKind;

#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("No properties for entity kind: {0:?}")]
    MissingProperties(EntityKind),

    #[error("Entity {id} footprint at {position} leaves the map")]
    OutOfBounds { id: EntityId, position: Cell },

    #[error("Player not found in snapshot: {0:?}")]
    UnknownPlayer(PlayerId),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, StrategyError>;
