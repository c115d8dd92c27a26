#![doc = "Fiberplan public API: loss-budget analysis and plan-vs-built reconciliation for fiber access networks"]
mod analysis;
mod budget;
mod error;
mod measure;
mod network;
mod normalize;
mod reconcile;
mod store;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use network::{
    CableSegment, ConstructionStatus, Coordinate, DistributionPoint, NetworkSnapshot, Pole,
    SnapshotStats, path_length_m,
};

#[doc(inline)]
pub use normalize::{Entity, NormalizeReport, Normalizer, RawPlacemark, SkippedRecord};

#[doc(inline)]
pub use budget::{
    FiberType, LinkStatus, LossBreakdown, LossStandards, NetworkSummary, OpticalParameters,
    SegmentDetails, SegmentOverrides, SegmentResult, SplitRatio, SplitterElement, compute,
    db_to_linear, dbm_to_mw, estimate_splice_count, linear_to_db, max_distance_km, mw_to_dbm,
    required_tx_power_dbm, round2, summarize,
};

#[doc(inline)]
pub use measure::{MeasurementRecord, OverrideSet};

#[doc(inline)]
pub use analysis::{FailedSegment, NetworkAnalysis, analyze_network};

#[doc(inline)]
pub use reconcile::{
    ComparisonReport, ComparisonResult, ComplianceStatus, ComplianceSummary, reconcile,
};

#[doc(inline)]
pub use store::{ProjectPhases, ProjectStore};
