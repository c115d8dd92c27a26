mod coord;
mod entity;
mod snapshot;

pub use coord::{Coordinate, path_length_m};
pub use entity::{CableSegment, ConstructionStatus, DistributionPoint, Pole};
pub use snapshot::{NetworkSnapshot, SnapshotStats};
