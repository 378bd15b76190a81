//! Hearth Strategist - Per-Tick Decision Engine
//!
//! Turns a full game snapshot into one action per owned entity: builders
//! gather and raise houses, bases train units, fighters converge on the
//! nearest enemies.

pub mod actions;
pub mod assignment;
pub mod core;
pub mod model;
pub mod planning;
pub mod scenario;
pub mod spatial;
pub mod strategy;
pub mod world;

pub use strategy::{Session, TickOutcome};
