use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::entity::{CableSegment, ConstructionStatus, DistributionPoint, Pole};

/// Normalized contents of one ingested network description. Read-only after
/// construction; owned by whichever analysis invoked the normalizer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub poles: Vec<Pole>,
    pub odps: Vec<DistributionPoint>,
    pub cables: Vec<CableSegment>,
}

/// Headline counts and totals for one snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotStats {
    pub total_poles: usize,
    pub total_odps: usize,
    pub total_cables: usize,
    pub poles_in_service: usize,
    pub poles_planned: usize,
    pub total_cable_length_m: f64,
    pub total_cable_length_km: f64,
}

impl NetworkSnapshot {
    /// Case-insensitive cable lookup by name.
    pub fn cable(&self, name: &str) -> Option<&CableSegment> {
        self.cables.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Cables keyed by lowercase name, for matching across snapshots.
    pub(crate) fn cable_index(&self) -> AHashMap<String, &CableSegment> {
        self.cables
            .iter()
            .map(|c| (c.name.to_ascii_lowercase(), c))
            .collect()
    }

    pub fn stats(&self) -> SnapshotStats {
        let total_cable_length_m: f64 = self.cables.iter().map(|c| c.fiber_length_m).sum();
        SnapshotStats {
            total_poles: self.poles.len(),
            total_odps: self.odps.len(),
            total_cables: self.cables.len(),
            poles_in_service: self
                .poles
                .iter()
                .filter(|p| p.construction_status == ConstructionStatus::InService)
                .count(),
            poles_planned: self
                .poles
                .iter()
                .filter(|p| p.construction_status == ConstructionStatus::Planned)
                .count(),
            total_cable_length_m,
            total_cable_length_km: total_cable_length_m / 1000.0,
        }
    }
}
