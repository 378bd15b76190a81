//! Snapshot entities and their kinds

use serde::{Deserialize, Serialize};

use crate::core::types::{Cell, EntityId, PlayerId};

/// Kind of entity
///
/// Declaration order is the iteration order used wherever entities are
/// grouped by kind, which keeps per-kind scans deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    House,
    BuilderBase,
    BuilderUnit,
    MeleeBase,
    MeleeUnit,
    RangedBase,
    RangedUnit,
    Resource,
    Turret,
}

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        EntityKind::House,
        EntityKind::BuilderBase,
        EntityKind::BuilderUnit,
        EntityKind::MeleeBase,
        EntityKind::MeleeUnit,
        EntityKind::RangedBase,
        EntityKind::RangedUnit,
        EntityKind::Resource,
        EntityKind::Turret,
    ];

    /// Unit kind trained by this base, if it is a production base
    pub fn produces(&self) -> Option<EntityKind> {
        match self {
            EntityKind::BuilderBase => Some(EntityKind::BuilderUnit),
            EntityKind::MeleeBase => Some(EntityKind::MeleeUnit),
            EntityKind::RangedBase => Some(EntityKind::RangedUnit),
            _ => None,
        }
    }
}

/// Who an entity belongs to, relative to the deciding player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Mine,
    Enemy(PlayerId),
    Neutral,
}

/// An entity as reported by the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    pub kind: EntityKind,
    pub position: Cell,
    pub health: i32,
}

impl Entity {
    pub fn new(
        id: EntityId,
        player_id: Option<PlayerId>,
        kind: EntityKind,
        position: Cell,
        health: i32,
    ) -> Self {
        Self {
            id,
            player_id,
            kind,
            position,
            health,
        }
    }

    pub fn owner(&self, me: PlayerId) -> Owner {
        match self.player_id {
            Some(player) if player == me => Owner::Mine,
            Some(player) => Owner::Enemy(player),
            None => Owner::Neutral,
        }
    }

    pub fn is_mine(&self, me: PlayerId) -> bool {
        self.owner(me) == Owner::Mine
    }
}
