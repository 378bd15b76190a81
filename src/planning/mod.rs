//! Construction projects and house placement

pub mod housing;
pub mod project;

pub use housing::{find_house_position, is_valid_house_position, plan_house_project, select_house_crew};
pub use project::{Project, ProjectList};
