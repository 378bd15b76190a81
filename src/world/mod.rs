//! World index: occupancy, ownership partitions and population

pub mod index;
pub mod population;

pub use index::WorldIndex;
pub use population::{HeadcountTargets, PopulationLedger};
