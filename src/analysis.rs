//! Request-scoped orchestration for single-network analysis. No global
//! state: each request owns its snapshot, parameters and overrides.

use serde::Serialize;
use tracing::info;

use crate::budget::{self, LossStandards, NetworkSummary, OpticalParameters, SegmentResult};
use crate::measure::OverrideSet;
use crate::network::NetworkSnapshot;

/// Per-segment failure surfaced alongside the successful results.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FailedSegment {
    pub name: String,
    pub reason: String,
}

/// Single-network analysis response.
#[derive(Clone, Debug, Serialize)]
pub struct NetworkAnalysis {
    pub results: Vec<SegmentResult>,
    pub summary: NetworkSummary,
    pub failed: Vec<FailedSegment>,
}

/// Run the loss-budget calculator over every cable in the snapshot.
/// Segment-level config failures are collected into the response, not fatal
/// to the batch.
pub fn analyze_network(
    snapshot: &NetworkSnapshot,
    optical: &OpticalParameters,
    loss: &LossStandards,
    overrides: &OverrideSet,
) -> NetworkAnalysis {
    let mut results = Vec::with_capacity(snapshot.cables.len());
    let mut failed = Vec::new();

    for cable in &snapshot.cables {
        match budget::compute(optical, loss, cable, &overrides.get(&cable.name)) {
            Ok(result) => results.push(result),
            Err(err) => {
                failed.push(FailedSegment { name: cable.name.clone(), reason: err.to_string() })
            }
        }
    }

    let summary = budget::summarize(&results);
    info!(
        segments = results.len(),
        failed = failed.len(),
        average_quality = summary.average_quality_score,
        "analyzed network"
    );
    NetworkAnalysis { results, summary, failed }
}
