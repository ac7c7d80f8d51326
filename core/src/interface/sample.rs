use serde::{Deserialize, Serialize};

/// Result of a maximum-range search in one direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RangeOutcome {
    /// Largest range confirmed detectable.
    Detected { max_range_m: f64 },
    /// Not detectable even at the lower search bound.
    NotDetectable,
    /// Still detectable at the upper search bound; the true maximum is larger.
    ExceedsCeiling { ceiling_m: f64 },
    /// The point could not be evaluated.
    Invalid { reason: String },
}

impl RangeOutcome {
    pub fn max_range_m(&self) -> Option<f64> {
        match self {
            RangeOutcome::Detected { max_range_m } => Some(*max_range_m),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, RangeOutcome::Invalid { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            RangeOutcome::Detected { .. } => "detected",
            RangeOutcome::NotDetectable => "not_detectable",
            RangeOutcome::ExceedsCeiling { .. } => "exceeds_ceiling",
            RangeOutcome::Invalid { .. } => "invalid",
        }
    }
}

/// One coverage point emitted by a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageSample {
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    /// `None` when the gain query itself failed.
    pub gain_db: Option<f64>,
    pub rcs_m2: f64,
    pub outcome: RangeOutcome,
}

impl CoverageSample {
    pub fn new(
        azimuth_deg: f64,
        elevation_deg: f64,
        gain_db: Option<f64>,
        rcs_m2: f64,
        outcome: RangeOutcome,
    ) -> Self {
        Self {
            azimuth_deg,
            elevation_deg,
            gain_db,
            rcs_m2,
            outcome,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.outcome.is_valid()
    }

    pub fn max_range_km(&self) -> Option<f64> {
        self.outcome.max_range_m().map(|range| range / 1000.0)
    }
}
