use serde::{Deserialize, Serialize};

/// Optical transmission parameters for the link under analysis. Any field
/// omitted by the caller takes the stated default.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpticalParameters {
    pub tx_power_dbm: f64,
    pub rx_sensitivity_dbm: f64,
    pub wavelength_nm: u32,
    pub fiber_type: FiberType,
}

impl Default for OpticalParameters {
    fn default() -> Self {
        Self {
            tx_power_dbm: 3.0,
            rx_sensitivity_dbm: -28.0,
            wavelength_nm: 1550,
            fiber_type: FiberType::SingleMode,
        }
    }
}

impl OpticalParameters {
    /// Tx power minus receiver sensitivity, in dB.
    #[inline]
    pub fn power_budget_db(&self) -> f64 {
        self.tx_power_dbm - self.rx_sensitivity_dbm
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiberType {
    #[default]
    SingleMode,
    MultiMode,
}

/// Per-element loss standards, following ITU-T G.652/G.657 practice at
/// 1550 nm.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossStandards {
    pub fiber_loss_db_per_km: f64,
    pub splice_loss_db: f64,
    pub connector_loss_db: f64,
    pub safety_margin_db: f64,
}

impl Default for LossStandards {
    fn default() -> Self {
        Self {
            fiber_loss_db_per_km: 0.35,
            splice_loss_db: 0.1,
            connector_loss_db: 0.25,
            safety_margin_db: 3.0,
        }
    }
}

impl LossStandards {
    /// Standard attenuation at the given wavelength: 0.40 dB/km at 1310 nm,
    /// 0.35 dB/km otherwise (1550 nm band).
    pub fn for_wavelength(wavelength_nm: u32) -> Self {
        let fiber_loss_db_per_km = if wavelength_nm == 1310 { 0.40 } else { 0.35 };
        Self { fiber_loss_db_per_km, ..Self::default() }
    }

    /// Insertion loss of a declared splitter or combiner element, in dB.
    pub fn element_loss_db(&self, element: SplitterElement) -> f64 {
        match element {
            SplitterElement::Splitter(ratio) => ratio.insertion_loss_db(),
            SplitterElement::Combiner => 1.8,
        }
    }
}

/// Optical split ratios with standardized insertion losses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitRatio {
    #[serde(rename = "1:2")]
    OneToTwo,
    #[serde(rename = "1:4")]
    OneToFour,
    #[serde(rename = "1:8")]
    OneToEight,
    #[serde(rename = "1:16")]
    OneToSixteen,
    #[serde(rename = "1:32")]
    OneToThirtyTwo,
}

impl SplitRatio {
    #[inline]
    pub fn insertion_loss_db(self) -> f64 {
        match self {
            Self::OneToTwo => 4.2,
            Self::OneToFour => 7.4,
            Self::OneToEight => 11.4,
            Self::OneToSixteen => 14.4,
            Self::OneToThirtyTwo => 18.6,
        }
    }
}

/// Passive element declared on a segment. Contributes loss only when
/// declared; a plain point-to-point span has none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitterElement {
    Splitter(SplitRatio),
    Combiner,
}

/// Measured values that replace the calculator's policy defaults for one
/// segment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentOverrides {
    pub splice_count: Option<u32>,
    pub connector_count: Option<u32>,
    pub splitters: Vec<SplitterElement>,
    pub measured_length_m: Option<f64>,
    pub measured_loss_db: Option<f64>,
}
