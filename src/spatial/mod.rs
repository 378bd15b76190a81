//! Spatial structures: occupancy grid and the corner distance field

pub mod distance_field;
pub mod grid;
pub mod occupancy;

pub use distance_field::DistanceField;
pub use grid::Grid;
pub use occupancy::{Occupancy, OccupancyGrid, Occupant};
