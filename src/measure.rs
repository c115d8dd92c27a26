//! Measured-value overrides keyed by cable name, as supplied by an external
//! tabular-data reader (OPM / acceptance-test exports).

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::budget::{SegmentOverrides, SplitterElement};

/// One field-measurement row for a cable. Every value is optional; absent
/// values leave the calculator's policy defaults in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementRecord {
    pub cable_name: String,
    pub splice_count: Option<u32>,
    pub connector_count: Option<u32>,
    pub splitters: Vec<SplitterElement>,
    pub measured_length_m: Option<f64>,
    pub measured_loss_db: Option<f64>,
}

/// Measured overrides keyed by cable name (case-insensitive). Later records
/// for the same cable win field-by-field.
#[derive(Clone, Debug, Default)]
pub struct OverrideSet {
    by_cable: AHashMap<String, SegmentOverrides>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[MeasurementRecord]) -> Self {
        let mut set = Self::default();
        for record in records {
            set.insert(record);
        }
        set
    }

    pub fn insert(&mut self, record: &MeasurementRecord) {
        let entry = self.by_cable.entry(record.cable_name.to_ascii_lowercase()).or_default();
        if record.splice_count.is_some() {
            entry.splice_count = record.splice_count;
        }
        if record.connector_count.is_some() {
            entry.connector_count = record.connector_count;
        }
        if !record.splitters.is_empty() {
            entry.splitters = record.splitters.clone();
        }
        if record.measured_length_m.is_some() {
            entry.measured_length_m = record.measured_length_m;
        }
        if record.measured_loss_db.is_some() {
            entry.measured_loss_db = record.measured_loss_db;
        }
    }

    /// Overrides for a cable, or the all-default set when none were supplied.
    pub fn get(&self, cable_name: &str) -> SegmentOverrides {
        self.by_cable.get(&cable_name.to_ascii_lowercase()).cloned().unwrap_or_default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_cable.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_cable.is_empty()
    }
}
