//! Game-facing data model: snapshot input, property table, action output

pub mod action;
pub mod entity;
pub mod properties;
pub mod view;

pub use action::{ActionSet, AttackAction, AutoAttack, BuildAction, EntityAction, MoveAction, RepairAction};
pub use entity::{Entity, EntityKind, Owner};
pub use properties::{AttackProperties, BuildProperties, EntityProperties, PropertyTable, RepairProperties};
pub use view::{Player, PlayerView};
