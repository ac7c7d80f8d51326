use crate::interface::AngularSpan;
use crate::prelude::{CoverageError, CoverageResult};

// Absorbs representation error in (end - start) / step for exact multiples.
const COUNT_SLACK: f64 = 1e-9;

/// Largest number of points a single span may describe.
pub const MAX_SPAN_POINTS: usize = 1_000_000;

/// Largest number of points a 2-D sweep may describe.
pub const MAX_SWEEP_POINTS: usize = 10_000_000;

impl AngularSpan {
    pub fn validate(&self) -> CoverageResult<()> {
        if !(self.start_deg.is_finite() && self.end_deg.is_finite() && self.step_deg.is_finite()) {
            return Err(CoverageError::InvalidSweepSpan(
                "span values must be finite".to_string(),
            ));
        }
        if self.step_deg <= 0.0 {
            return Err(CoverageError::InvalidSweepSpan(format!(
                "step must be > 0, got {}",
                self.step_deg
            )));
        }
        if self.end_deg < self.start_deg {
            return Err(CoverageError::InvalidSweepSpan(format!(
                "end {} is below start {}",
                self.end_deg, self.start_deg
            )));
        }
        let steps = self.step_count();
        if !steps.is_finite() || steps >= MAX_SPAN_POINTS as f64 {
            return Err(CoverageError::InvalidSweepSpan(format!(
                "step {} over [{}, {}] exceeds {} points",
                self.step_deg, self.start_deg, self.end_deg, MAX_SPAN_POINTS
            )));
        }
        Ok(())
    }

    fn step_count(&self) -> f64 {
        ((self.end_deg - self.start_deg) / self.step_deg + COUNT_SLACK).floor()
    }

    /// Number of grid points, end inclusive when it falls on a step.
    pub fn count(&self) -> CoverageResult<usize> {
        self.validate()?;
        (self.step_count() as usize)
            .checked_add(1)
            .ok_or_else(|| CoverageError::InvalidSweepSpan("point count overflows".to_string()))
    }

    /// Angle of the `index`-th grid point. Computed directly from the index so
    /// that long spans do not accumulate rounding drift.
    pub fn angle_at(&self, index: usize) -> f64 {
        self.start_deg + index as f64 * self.step_deg
    }

    pub fn angles(&self) -> CoverageResult<Vec<f64>> {
        Ok((0..self.count()?).map(|index| self.angle_at(index)).collect())
    }
}

/// Number of points in an azimuth x elevation grid.
pub fn grid_point_count(azimuth: &AngularSpan, elevation: &AngularSpan) -> CoverageResult<usize> {
    let rows = azimuth.count()?;
    let cols = elevation.count()?;
    rows.checked_mul(cols)
        .filter(|&total| total <= MAX_SWEEP_POINTS)
        .ok_or_else(|| {
            CoverageError::InvalidSweepSpan(format!(
                "{} x {} grid exceeds {} points",
                rows, cols, MAX_SWEEP_POINTS
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_count_matches_legacy_loops() {
        assert_eq!(AngularSpan::new(-180.0, 180.0, 5.0).count().unwrap(), 73);
        assert_eq!(AngularSpan::new(-30.0, 90.0, 5.0).count().unwrap(), 25);
        assert_eq!(AngularSpan::new(-180.0, 180.0, 10.0).count().unwrap(), 37);
        assert_eq!(AngularSpan::fixed(12.5).count().unwrap(), 1);
    }

    #[test]
    fn fractional_steps_do_not_drift() {
        let span = AngularSpan::new(0.0, 1.0, 0.1);
        let angles = span.angles().unwrap();
        assert_eq!(angles.len(), 11);
        assert!((angles[10] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn span_not_ending_on_step_stops_before_end() {
        let angles = AngularSpan::new(0.0, 10.0, 4.0).angles().unwrap();
        assert_eq!(angles, vec![0.0, 4.0, 8.0]);
    }

    #[test]
    fn rejects_bad_spans() {
        assert!(AngularSpan::new(0.0, 10.0, 0.0).validate().is_err());
        assert!(AngularSpan::new(0.0, 10.0, -1.0).validate().is_err());
        assert!(AngularSpan::new(10.0, 0.0, 1.0).validate().is_err());
        assert!(AngularSpan::new(0.0, f64::NAN, 1.0).validate().is_err());
    }

    #[test]
    fn rejects_spans_with_too_many_points() {
        let tiny = AngularSpan::new(0.0, 360.0, 1e-17);
        assert!(matches!(tiny.validate(), Err(CoverageError::InvalidSweepSpan(_))));
        assert!(matches!(tiny.count(), Err(CoverageError::InvalidSweepSpan(_))));
        assert!(tiny.angles().is_err());

        let fine = AngularSpan::new(0.0, 360.0, 1e-5);
        assert!(matches!(fine.count(), Err(CoverageError::InvalidSweepSpan(_))));
    }

    #[test]
    fn largest_span_is_accepted() {
        let span = AngularSpan::new(0.0, (MAX_SPAN_POINTS - 1) as f64, 1.0);
        assert_eq!(span.count().unwrap(), MAX_SPAN_POINTS);
    }

    #[test]
    fn grid_count_is_bounded() {
        let azimuth = AngularSpan::new(-180.0, 180.0, 10.0);
        let elevation = AngularSpan::new(-30.0, 90.0, 5.0);
        assert_eq!(grid_point_count(&azimuth, &elevation).unwrap(), 37 * 25);

        let wide = AngularSpan::new(0.0, 99_999.0, 1.0);
        assert!(matches!(
            grid_point_count(&wide, &wide),
            Err(CoverageError::InvalidSweepSpan(_))
        ));
    }
}
