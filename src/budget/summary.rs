use serde::{Deserialize, Serialize};

use super::calc::{LinkStatus, SegmentResult};

/// Network-wide aggregate over per-segment results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub total_segments: usize,
    pub average_quality_score: f64,
    /// Sum, not average: loss accumulates across the network even though
    /// quality is judged per independent path.
    pub total_network_loss_db: f64,
    pub ok_count: usize,
    pub warning_count: usize,
    pub critical_count: usize,
}

/// Aggregate per-segment results. Order-independent; an empty input yields
/// a zeroed summary rather than failing.
pub fn summarize(results: &[SegmentResult]) -> NetworkSummary {
    let total_segments = results.len();
    let average_quality_score = if total_segments == 0 {
        0.0
    } else {
        results.iter().map(|r| r.quality_score).sum::<f64>() / total_segments as f64
    };
    let count = |status| results.iter().filter(|r| r.status == status).count();

    NetworkSummary {
        total_segments,
        average_quality_score,
        total_network_loss_db: results.iter().map(|r| r.total_loss_db).sum(),
        ok_count: count(LinkStatus::OK),
        warning_count: count(LinkStatus::Warning),
        critical_count: count(LinkStatus::Critical),
    }
}
