use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::error::{Error, Result};
use crate::network::CableSegment;

use super::params::{LossStandards, OpticalParameters, SegmentOverrides};

/// Link health classification derived from available margin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkStatus {
    OK,
    Warning,
    Critical,
}

impl LinkStatus {
    /// Classify from available margin. Boundary values belong to the
    /// lower-margin state: 0 dB is Warning, 3 dB is OK.
    pub fn from_margin_db(margin_db: f64) -> Self {
        if margin_db < 0.0 {
            Self::Critical
        } else if margin_db < 3.0 {
            Self::Warning
        } else {
            Self::OK
        }
    }
}

/// Per-element loss contributions, in dB.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LossBreakdown {
    pub fiber_loss_db: f64,
    pub splice_loss_db: f64,
    pub connector_loss_db: f64,
    pub splitter_loss_db: f64,
}

impl LossBreakdown {
    #[inline]
    pub fn total_db(&self) -> f64 {
        self.fiber_loss_db + self.splice_loss_db + self.connector_loss_db + self.splitter_loss_db
    }
}

/// Physical attributes the breakdown was computed from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentDetails {
    pub fiber_length_km: f64,
    pub splice_count: u32,
    pub connector_count: u32,
}

/// Complete loss-budget result for one cable segment. Derived and immutable;
/// recomputed whenever inputs change, never mutated in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentResult {
    pub cable_name: String,
    pub power_budget_db: f64,
    pub total_loss_db: f64,
    pub available_margin_db: f64,
    pub status: LinkStatus,
    /// Full precision internally; serialized rounded to two decimals.
    #[serde(serialize_with = "ser_round2")]
    pub quality_score: f64,
    pub loss_breakdown: LossBreakdown,
    pub segment_details: SegmentDetails,
}

/// Round to two decimal places for reporting.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn ser_round2<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(round2(*value))
}

/// Policy default: one splice per 2 km of cable, minimum two (a termination
/// splice at each end). Callers with measured counts should override.
#[inline]
pub fn estimate_splice_count(fiber_length_m: f64) -> u32 {
    ((fiber_length_m.max(0.0) / 2000.0).floor() as u32).max(2)
}

/// Compute the full loss budget for one segment.
///
/// Fails only on structurally invalid input (negative or non-finite length,
/// negative loss standards); out-of-range derived values are clamped, never
/// rejected.
pub fn compute(
    optical: &OpticalParameters,
    loss: &LossStandards,
    segment: &CableSegment,
    overrides: &SegmentOverrides,
) -> Result<SegmentResult> {
    let fiber_length_m = overrides.measured_length_m.unwrap_or(segment.fiber_length_m);
    let (loss_breakdown, segment_details) = breakdown(loss, fiber_length_m, overrides)
        .map_err(|err| Error::Config(format!("segment '{}': {err}", segment.name)))?;

    let total_loss_db = loss_breakdown.total_db();
    let power_budget_db = optical.power_budget_db();
    let available_margin_db = power_budget_db - total_loss_db - loss.safety_margin_db;
    let status = LinkStatus::from_margin_db(available_margin_db);

    // Quality weighting is 40% loss efficiency, 60% margin adequacy.
    let fiber_length_km = segment_details.fiber_length_km;
    let loss_efficiency = if fiber_length_km > 0.0 {
        (100.0 - total_loss_db / fiber_length_km * 10.0).clamp(0.0, 100.0)
    } else {
        // Nothing can be efficient over zero distance.
        0.0
    };
    let margin_adequacy = (available_margin_db / 10.0 * 100.0).clamp(0.0, 100.0);
    let quality_score = loss_efficiency * 0.4 + margin_adequacy * 0.6;

    debug!(
        cable = %segment.name,
        ?status,
        total_loss_db,
        available_margin_db,
        "computed loss budget"
    );

    Ok(SegmentResult {
        cable_name: segment.name.clone(),
        power_budget_db,
        total_loss_db,
        available_margin_db,
        status,
        quality_score,
        loss_breakdown,
        segment_details,
    })
}

/// Longest span that keeps the margin non-negative after fixed losses and
/// the safety margin, in kilometers. Clamped at zero.
pub fn max_distance_km(
    optical: &OpticalParameters,
    loss: &LossStandards,
    splice_count: u32,
    connector_count: u32,
) -> f64 {
    if loss.fiber_loss_db_per_km <= 0.0 {
        return 0.0;
    }
    let fixed_loss_db = f64::from(splice_count) * loss.splice_loss_db
        + f64::from(connector_count) * loss.connector_loss_db
        + loss.safety_margin_db;
    ((optical.power_budget_db() - fixed_loss_db) / loss.fiber_loss_db_per_km).max(0.0)
}

/// Transmit power needed to close the link: rx sensitivity plus total loss
/// plus the safety margin, in dBm.
pub fn required_tx_power_dbm(
    rx_sensitivity_dbm: f64,
    loss: &LossStandards,
    segment: &CableSegment,
    overrides: &SegmentOverrides,
) -> Result<f64> {
    let fiber_length_m = overrides.measured_length_m.unwrap_or(segment.fiber_length_m);
    let (loss_breakdown, _) = breakdown(loss, fiber_length_m, overrides)
        .map_err(|err| Error::Config(format!("segment '{}': {err}", segment.name)))?;
    Ok(rx_sensitivity_dbm + loss_breakdown.total_db() + loss.safety_margin_db)
}

fn breakdown(
    loss: &LossStandards,
    fiber_length_m: f64,
    overrides: &SegmentOverrides,
) -> std::result::Result<(LossBreakdown, SegmentDetails), String> {
    if !fiber_length_m.is_finite() || fiber_length_m < 0.0 {
        return Err(format!("invalid fiber length {fiber_length_m} m"));
    }
    if loss.fiber_loss_db_per_km < 0.0
        || loss.splice_loss_db < 0.0
        || loss.connector_loss_db < 0.0
        || loss.safety_margin_db < 0.0
    {
        return Err("loss standards must be non-negative".into());
    }

    let fiber_length_km = fiber_length_m / 1000.0;
    let splice_count =
        overrides.splice_count.unwrap_or_else(|| estimate_splice_count(fiber_length_m));
    let connector_count = overrides.connector_count.unwrap_or(2);

    let loss_breakdown = LossBreakdown {
        fiber_loss_db: fiber_length_km * loss.fiber_loss_db_per_km,
        splice_loss_db: f64::from(splice_count) * loss.splice_loss_db,
        connector_loss_db: f64::from(connector_count) * loss.connector_loss_db,
        splitter_loss_db: overrides
            .splitters
            .iter()
            .map(|&element| loss.element_loss_db(element))
            .sum(),
    };
    Ok((loss_breakdown, SegmentDetails { fiber_length_km, splice_count, connector_count }))
}

/// Convert dB to linear scale.
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}

/// Convert linear to dB scale. Negative infinity at or below zero.
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    if linear <= 0.0 { f64::NEG_INFINITY } else { 10.0 * linear.log10() }
}

/// Convert dBm to milliwatts.
#[inline]
pub fn dbm_to_mw(dbm: f64) -> f64 {
    10f64.powf(dbm / 10.0)
}

/// Convert milliwatts to dBm. Negative infinity at or below zero.
#[inline]
pub fn mw_to_dbm(mw: f64) -> f64 {
    if mw <= 0.0 { f64::NEG_INFINITY } else { 10.0 * mw.log10() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::params::{SplitRatio, SplitterElement};
    use crate::network::{ConstructionStatus, Coordinate};

    fn segment(length_m: f64) -> CableSegment {
        CableSegment {
            name: "FA-01".into(),
            specification: "ADSS 24C".into(),
            number_of_cores: 24,
            fiber_length_m: length_m,
            construction_status: ConstructionStatus::InService,
            route: vec![
                Coordinate::new(106.80, -6.20).unwrap(),
                Coordinate::new(106.85, -6.20).unwrap(),
            ],
        }
    }

    #[test]
    fn status_boundaries() {
        assert_eq!(LinkStatus::from_margin_db(-0.01), LinkStatus::Critical);
        assert_eq!(LinkStatus::from_margin_db(0.0), LinkStatus::Warning);
        assert_eq!(LinkStatus::from_margin_db(2.99), LinkStatus::Warning);
        assert_eq!(LinkStatus::from_margin_db(3.0), LinkStatus::OK);
    }

    #[test]
    fn splice_estimate_policy() {
        assert_eq!(estimate_splice_count(0.0), 2);
        assert_eq!(estimate_splice_count(4000.0), 2);
        assert_eq!(estimate_splice_count(4999.0), 2);
        assert_eq!(estimate_splice_count(5000.0), 2);
        assert_eq!(estimate_splice_count(6000.0), 3);
        assert_eq!(estimate_splice_count(20_000.0), 10);
    }

    #[test]
    fn five_km_reference_link() {
        let result = compute(
            &OpticalParameters::default(),
            &LossStandards::default(),
            &segment(5000.0),
            &SegmentOverrides::default(),
        )
        .unwrap();

        assert_eq!(result.power_budget_db, 31.0);
        assert_eq!(round2(result.loss_breakdown.fiber_loss_db), 1.75);
        assert_eq!(round2(result.loss_breakdown.splice_loss_db), 0.2);
        assert_eq!(round2(result.loss_breakdown.connector_loss_db), 0.5);
        assert_eq!(result.loss_breakdown.splitter_loss_db, 0.0);
        assert_eq!(round2(result.total_loss_db), 2.45);
        assert_eq!(round2(result.available_margin_db), 25.55);
        assert_eq!(result.status, LinkStatus::OK);
        assert_eq!(round2(result.quality_score), 98.04);
        assert_eq!(result.segment_details.splice_count, 2);
        assert_eq!(result.segment_details.connector_count, 2);
    }

    #[test]
    fn total_loss_is_the_sum_of_parts() {
        let overrides = SegmentOverrides {
            splitters: vec![SplitterElement::Splitter(SplitRatio::OneToEight)],
            ..Default::default()
        };
        let result = compute(
            &OpticalParameters::default(),
            &LossStandards::default(),
            &segment(12_345.0),
            &overrides,
        )
        .unwrap();
        let b = result.loss_breakdown;
        assert_eq!(
            result.total_loss_db,
            b.fiber_loss_db + b.splice_loss_db + b.connector_loss_db + b.splitter_loss_db
        );
        assert_eq!(b.splitter_loss_db, 11.4);
    }

    #[test]
    fn overrides_replace_policy_defaults() {
        let overrides = SegmentOverrides {
            splice_count: Some(7),
            connector_count: Some(4),
            measured_length_m: Some(3000.0),
            ..Default::default()
        };
        let result = compute(
            &OpticalParameters::default(),
            &LossStandards::default(),
            &segment(5000.0),
            &overrides,
        )
        .unwrap();
        assert_eq!(result.segment_details.splice_count, 7);
        assert_eq!(result.segment_details.connector_count, 4);
        assert_eq!(result.segment_details.fiber_length_km, 3.0);
    }

    #[test]
    fn zero_length_scores_zero_efficiency() {
        let result = compute(
            &OpticalParameters::default(),
            &LossStandards::default(),
            &segment(0.0),
            &SegmentOverrides::default(),
        )
        .unwrap();
        // margin = 31 - 0.7 - 3 = 27.3 -> adequacy clamps to 100, efficiency 0.
        assert_eq!(round2(result.quality_score), 60.0);
    }

    #[test]
    fn negative_length_is_a_config_error() {
        let result = compute(
            &OpticalParameters::default(),
            &LossStandards::default(),
            &segment(-1.0),
            &SegmentOverrides::default(),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn negative_loss_standard_is_a_config_error() {
        let loss = LossStandards { splice_loss_db: -0.1, ..Default::default() };
        let result = compute(
            &OpticalParameters::default(),
            &loss,
            &segment(1000.0),
            &SegmentOverrides::default(),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn max_distance_inverts_the_budget() {
        let optical = OpticalParameters::default();
        let loss = LossStandards::default();
        // 31 - (2*0.25) - 3 = 27.5 dB available for fiber at 0.35 dB/km.
        let km = max_distance_km(&optical, &loss, 0, 2);
        assert_eq!(round2(km), round2(27.5 / 0.35));

        // An exhausted budget clamps at zero.
        let weak = OpticalParameters { tx_power_dbm: -30.0, ..optical };
        assert_eq!(max_distance_km(&weak, &loss, 0, 2), 0.0);
    }

    #[test]
    fn required_tx_closes_the_link() {
        let loss = LossStandards::default();
        let seg = segment(5000.0);
        let tx =
            required_tx_power_dbm(-28.0, &loss, &seg, &SegmentOverrides::default()).unwrap();
        // -28 + 2.45 + 3.0
        assert_eq!(round2(tx), -22.55);
    }

    #[test]
    fn db_conversions_round_trip() {
        assert_eq!(db_to_linear(0.0), 1.0);
        assert_eq!(dbm_to_mw(0.0), 1.0);
        assert!((linear_to_db(db_to_linear(7.3)) - 7.3).abs() < 1e-9);
        assert!((mw_to_dbm(dbm_to_mw(-3.2)) - -3.2).abs() < 1e-9);
        assert_eq!(linear_to_db(0.0), f64::NEG_INFINITY);
        assert_eq!(mw_to_dbm(-1.0), f64::NEG_INFINITY);
    }

    #[test]
    fn quality_score_serializes_rounded() {
        let result = compute(
            &OpticalParameters::default(),
            &LossStandards::default(),
            &segment(5000.0),
            &SegmentOverrides::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["quality_score"], serde_json::json!(98.04));
    }
}
