mod calc;
mod params;
mod summary;

pub use calc::{
    LinkStatus, LossBreakdown, SegmentDetails, SegmentResult, compute, db_to_linear, dbm_to_mw,
    estimate_splice_count, linear_to_db, max_distance_km, mw_to_dbm, required_tx_power_dbm, round2,
};
pub use params::{
    FiberType, LossStandards, OpticalParameters, SegmentOverrides, SplitRatio, SplitterElement,
};
pub use summary::{NetworkSummary, summarize};
