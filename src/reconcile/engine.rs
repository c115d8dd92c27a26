use serde::{Deserialize, Serialize};
use tracing::info;

use crate::network::{CableSegment, ConstructionStatus, NetworkSnapshot};

/// How closely a built cable matches its plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    MinorDeviation,
    MajorDeviation,
}

impl ComplianceStatus {
    /// Variance thresholds: within 5% Compliant (boundary inclusive),
    /// within 15% MinorDeviation, beyond MajorDeviation.
    fn from_variance_pct(variance_pct: f64) -> Self {
        let v = variance_pct.abs();
        if v <= 5.0 {
            Self::Compliant
        } else if v <= 15.0 {
            Self::MinorDeviation
        } else {
            Self::MajorDeviation
        }
    }

    /// One severity level worse. MajorDeviation stays where it is.
    fn downgraded(self) -> Self {
        match self {
            Self::Compliant => Self::MinorDeviation,
            Self::MinorDeviation | Self::MajorDeviation => Self::MajorDeviation,
        }
    }
}

/// Per-cable comparison between the planned and built snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub cable_id: String,
    pub planned_length_km: f64,
    pub built_length_km: f64,
    /// `None` (serialized as null) when the planned length is zero, to
    /// avoid a division by zero.
    pub length_variance_pct: Option<f64>,
    pub planned_status: ConstructionStatus,
    pub built_status: ConstructionStatus,
    pub compliance_status: ComplianceStatus,
}

/// Aggregate over the matched cables only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total_matched: usize,
    pub compliant_count: usize,
    pub minor_deviation_count: usize,
    pub major_deviation_count: usize,
    pub compliance_rate: f64,
}

/// Full reconciliation output. Unmatched cables are surfaces, not errors
/// (partial deployments are expected mid-project), and never enter the
/// compliance denominator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub results: Vec<ComparisonResult>,
    pub missing_in_built: Vec<String>,
    pub unplanned_additions: Vec<String>,
    pub summary: ComplianceSummary,
}

/// Match cables across the two snapshots by case-insensitive name, compute
/// per-cable variance and compliance, and aggregate.
pub fn reconcile(planned: &NetworkSnapshot, built: &NetworkSnapshot) -> ComparisonReport {
    let planned_index = planned.cable_index();
    let built_index = built.cable_index();

    let mut results = Vec::new();
    let mut missing_in_built = Vec::new();

    for cable in &planned.cables {
        match built_index.get(&cable.name.to_ascii_lowercase()) {
            Some(built_cable) => results.push(compare_cable(cable, built_cable)),
            None => missing_in_built.push(cable.name.clone()),
        }
    }

    let unplanned_additions: Vec<String> = built
        .cables
        .iter()
        .filter(|c| !planned_index.contains_key(&c.name.to_ascii_lowercase()))
        .map(|c| c.name.clone())
        .collect();

    let summary = summarize_compliance(&results);
    info!(
        matched = results.len(),
        missing = missing_in_built.len(),
        unplanned = unplanned_additions.len(),
        compliance_rate = summary.compliance_rate,
        "reconciled planned vs built"
    );
    ComparisonReport { results, missing_in_built, unplanned_additions, summary }
}

fn compare_cable(planned: &CableSegment, built: &CableSegment) -> ComparisonResult {
    let planned_length_km = planned.fiber_length_km();
    let built_length_km = built.fiber_length_km();
    let length_variance_pct = (planned_length_km > 0.0)
        .then(|| (built_length_km - planned_length_km) / planned_length_km * 100.0);

    let mut compliance_status = match length_variance_pct {
        Some(variance) => ComplianceStatus::from_variance_pct(variance),
        // No planned length to compare against: anything actually built is
        // a major departure from plan, nothing built matches it.
        None if built_length_km > 0.0 => ComplianceStatus::MajorDeviation,
        None => ComplianceStatus::Compliant,
    };

    // Planned -> InService is the expected progression and not penalized;
    // the reverse is a regression and costs one severity level.
    if planned.construction_status == ConstructionStatus::InService
        && built.construction_status == ConstructionStatus::Planned
    {
        compliance_status = compliance_status.downgraded();
    }

    ComparisonResult {
        cable_id: planned.name.clone(),
        planned_length_km,
        built_length_km,
        length_variance_pct,
        planned_status: planned.construction_status,
        built_status: built.construction_status,
        compliance_status,
    }
}

fn summarize_compliance(results: &[ComparisonResult]) -> ComplianceSummary {
    let count = |status| results.iter().filter(|r| r.compliance_status == status).count();
    let total_matched = results.len();
    let compliant_count = count(ComplianceStatus::Compliant);

    ComplianceSummary {
        total_matched,
        compliant_count,
        minor_deviation_count: count(ComplianceStatus::MinorDeviation),
        major_deviation_count: count(ComplianceStatus::MajorDeviation),
        compliance_rate: if total_matched == 0 {
            0.0
        } else {
            compliant_count as f64 / total_matched as f64 * 100.0
        },
    }
}
