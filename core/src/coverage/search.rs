use crate::interface::RangeOutcome;
use crate::prelude::{CoverageError, CoverageResult, GainModel};
use crate::radar::link::RadarLinkModel;
use crate::radar::target::{validate_rcs, TargetGeometry};
use serde::{Deserialize, Serialize};

/// Bisection bracket and absolute tolerance, all in meters.
///
/// The bracket is a search bound, not a physical one: a target still
/// detectable at `max_range_m` is reported as exceeding the ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBounds {
    pub min_range_m: f64,
    pub max_range_m: f64,
    pub epsilon_m: f64,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            min_range_m: 1_000.0,
            max_range_m: 500_000.0,
            epsilon_m: 100.0,
        }
    }
}

impl SearchBounds {
    pub fn new(min_range_m: f64, max_range_m: f64, epsilon_m: f64) -> CoverageResult<Self> {
        let bounds = Self {
            min_range_m,
            max_range_m,
            epsilon_m,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> CoverageResult<()> {
        let all_finite = self.min_range_m.is_finite()
            && self.max_range_m.is_finite()
            && self.epsilon_m.is_finite();
        if !all_finite {
            return Err(CoverageError::InvalidSearchBounds(
                "bounds and tolerance must be finite".to_string(),
            ));
        }
        if self.min_range_m <= 0.0 {
            return Err(CoverageError::InvalidSearchBounds(format!(
                "min range must be > 0, got {}",
                self.min_range_m
            )));
        }
        if self.min_range_m >= self.max_range_m {
            return Err(CoverageError::InvalidSearchBounds(format!(
                "min range {} must be below max range {}",
                self.min_range_m, self.max_range_m
            )));
        }
        if self.epsilon_m <= 0.0 {
            return Err(CoverageError::InvalidSearchBounds(format!(
                "epsilon must be > 0, got {}",
                self.epsilon_m
            )));
        }
        Ok(())
    }

    /// Hard cap on bisection steps: `ceil(log2((max - min) / epsilon))`.
    pub fn iteration_cap(&self) -> usize {
        let ratio = (self.max_range_m - self.min_range_m) / self.epsilon_m;
        if ratio <= 1.0 {
            0
        } else {
            ratio.log2().ceil() as usize
        }
    }
}

/// Finds the largest range at which `detectable` still holds.
///
/// `detectable` must be non-increasing in range. Both ends of the bracket are
/// probed before the loop so that "never detectable" and "detectable beyond
/// the ceiling" come back as their own outcomes.
pub fn bisect_max_range<F>(bounds: &SearchBounds, mut detectable: F) -> CoverageResult<RangeOutcome>
where
    F: FnMut(f64) -> CoverageResult<bool>,
{
    bounds.validate()?;

    if !detectable(bounds.min_range_m)? {
        return Ok(RangeOutcome::NotDetectable);
    }
    if detectable(bounds.max_range_m)? {
        return Ok(RangeOutcome::ExceedsCeiling {
            ceiling_m: bounds.max_range_m,
        });
    }

    let mut lower = bounds.min_range_m;
    let mut upper = bounds.max_range_m;
    for _ in 0..bounds.iteration_cap() {
        if upper - lower <= bounds.epsilon_m {
            break;
        }
        let mid = (lower + upper) / 2.0;
        if detectable(mid)? {
            lower = mid;
        } else {
            upper = mid;
        }
    }

    Ok(RangeOutcome::Detected { max_range_m: lower })
}

/// Maximum detectable range search against a link model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxRangeSearch {
    bounds: SearchBounds,
}

impl MaxRangeSearch {
    pub fn new(bounds: SearchBounds) -> CoverageResult<Self> {
        bounds.validate()?;
        Ok(Self { bounds })
    }

    pub fn bounds(&self) -> &SearchBounds {
        &self.bounds
    }

    /// Queries the gain once for the direction, then searches over range.
    pub fn max_range<G: GainModel>(
        &self,
        link: &RadarLinkModel<G>,
        azimuth_rad: f64,
        elevation_rad: f64,
        rcs_m2: f64,
    ) -> CoverageResult<RangeOutcome> {
        validate_rcs(rcs_m2)?;
        let gain_db = link.antenna_gain(azimuth_rad, elevation_rad)?;
        self.max_range_with_gain(link, azimuth_rad, elevation_rad, rcs_m2, gain_db)
    }

    /// Range search with the gain for this direction already known. Gain
    /// depends only on angle, so it is held fixed across the bracket.
    pub fn max_range_with_gain<G: GainModel>(
        &self,
        link: &RadarLinkModel<G>,
        azimuth_rad: f64,
        elevation_rad: f64,
        rcs_m2: f64,
        gain_db: f64,
    ) -> CoverageResult<RangeOutcome> {
        let probe = TargetGeometry::new(self.bounds.min_range_m, azimuth_rad, elevation_rad, rcs_m2);
        probe.validate()?;
        bisect_max_range(&self.bounds, |range_m| {
            link.is_detectable_with_gain(&probe.at_range(range_m), gain_db)
        })
    }
}
