use crate::prelude::{CoverageError, CoverageResult};
use serde::{Deserialize, Serialize};

/// Point target position and reflectivity. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetGeometry {
    pub range_m: f64,
    pub azimuth_rad: f64,
    pub elevation_rad: f64,
    pub rcs_m2: f64,
}

impl TargetGeometry {
    pub fn new(range_m: f64, azimuth_rad: f64, elevation_rad: f64, rcs_m2: f64) -> Self {
        Self {
            range_m,
            azimuth_rad,
            elevation_rad,
            rcs_m2,
        }
    }

    pub fn from_degrees(range_m: f64, azimuth_deg: f64, elevation_deg: f64, rcs_m2: f64) -> Self {
        Self::new(
            range_m,
            azimuth_deg.to_radians(),
            elevation_deg.to_radians(),
            rcs_m2,
        )
    }

    /// Same direction and RCS at another range.
    pub fn at_range(&self, range_m: f64) -> Self {
        Self { range_m, ..*self }
    }

    pub fn validate(&self) -> CoverageResult<()> {
        if self.range_m <= 0.0 || !self.range_m.is_finite() {
            return Err(CoverageError::InvalidGeometry(format!(
                "range must be a finite value > 0, got {}",
                self.range_m
            )));
        }
        validate_rcs(self.rcs_m2)?;
        if !self.azimuth_rad.is_finite() || !self.elevation_rad.is_finite() {
            return Err(CoverageError::InvalidGeometry(
                "angles must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_rcs(rcs_m2: f64) -> CoverageResult<()> {
    if rcs_m2 > 0.0 && rcs_m2.is_finite() {
        Ok(())
    } else {
        Err(CoverageError::InvalidGeometry(format!(
            "rcs must be a finite value > 0, got {}",
            rcs_m2
        )))
    }
}
