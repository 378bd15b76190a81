//! Per-tick pipeline and the session that drives it

pub mod session;
pub mod tick;

pub use session::Session;
pub use tick::{run_tick, TickContext, TickOutcome, TickReport};
