use serde::{Deserialize, Serialize};

/// Angular span in degrees, inclusive of both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularSpan {
    pub start_deg: f64,
    pub end_deg: f64,
    pub step_deg: f64,
}

impl AngularSpan {
    pub fn new(start_deg: f64, end_deg: f64, step_deg: f64) -> Self {
        Self {
            start_deg,
            end_deg,
            step_deg,
        }
    }

    /// A span holding a single angle.
    pub fn fixed(angle_deg: f64) -> Self {
        Self::new(angle_deg, angle_deg, 1.0)
    }
}

/// Externally submitted one-dimensional azimuth sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRequest {
    pub azimuth: AngularSpan,
    #[serde(default)]
    pub elevation_deg: f64,
    #[serde(default = "default_rcs")]
    pub rcs_m2: f64,
    #[serde(default)]
    pub label: Option<String>,
}

fn default_rcs() -> f64 {
    1.0
}
