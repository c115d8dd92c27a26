use serde::{Deserialize, Serialize};

use super::coord::{Coordinate, path_length_m};

/// Lifecycle state of a physical element as recorded in the survey data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionStatus {
    InService,
    Planned,
    #[default]
    Unknown,
}

impl ConstructionStatus {
    /// Lenient parse from survey free text ("In Service", "in-service",
    /// "Existing", "Planned", "Proposed", ...). Anything else is Unknown.
    pub fn parse(text: &str) -> Self {
        let text = text.trim().to_ascii_lowercase();
        if text.contains("service") || text.contains("existing") {
            Self::InService
        } else if text.contains("plan") || text.contains("proposed") {
            Self::Planned
        } else {
            Self::Unknown
        }
    }
}

/// Utility pole. Immutable once parsed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pole {
    pub name: String,
    pub designator: String,
    pub construction_status: ConstructionStatus,
    pub material_type: String,
    pub usage: String,
    pub coordinate: Coordinate,
}

/// Optical distribution point (ODP).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionPoint {
    pub name: String,
    pub specification: String,
    pub splice_type: String,
    pub construction_status: ConstructionStatus,
    pub coordinate: Coordinate,
}

/// One fiber cable run. The route is the ordered physical path (at least
/// two points); `fiber_length_m` is the surveyed length, falling back to
/// the haversine route length when the survey carried none.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CableSegment {
    pub name: String,
    pub specification: String,
    pub number_of_cores: u32,
    pub fiber_length_m: f64,
    pub construction_status: ConstructionStatus,
    pub route: Vec<Coordinate>,
}

impl CableSegment {
    #[inline]
    pub fn fiber_length_km(&self) -> f64 {
        self.fiber_length_m / 1000.0
    }

    /// Haversine length along the recorded route, in meters.
    #[inline]
    pub fn route_length_m(&self) -> f64 {
        path_length_m(&self.route)
    }
}
