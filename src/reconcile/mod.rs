mod engine;

pub use engine::{
    ComparisonReport, ComparisonResult, ComplianceStatus, ComplianceSummary, reconcile,
};
