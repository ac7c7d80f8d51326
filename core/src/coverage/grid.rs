use crate::coverage::span::grid_point_count;
use crate::interface::{AngularSpan, CoverageSample};
use crate::prelude::{CoverageError, CoverageResult};
use ndarray::Array2;

/// Azimuth x elevation matrices built from a 2-D sweep.
///
/// Row `i` is the `i`-th azimuth, column `j` the `j`-th elevation. Cells with
/// no numeric maximum range (not detectable, above the ceiling, invalid) hold
/// NaN, as do gains for points whose gain query failed.
#[derive(Debug, Clone)]
pub struct CoverageGrid {
    azimuths_deg: Vec<f64>,
    elevations_deg: Vec<f64>,
    max_range_km: Array2<f64>,
    gain_db: Array2<f64>,
}

impl CoverageGrid {
    /// Lays out samples produced by `sweep_2d` over the same spans.
    pub fn from_sweep(
        azimuth: &AngularSpan,
        elevation: &AngularSpan,
        samples: &[CoverageSample],
    ) -> CoverageResult<Self> {
        let azimuths_deg = azimuth.angles()?;
        let elevations_deg = elevation.angles()?;
        let total = grid_point_count(azimuth, elevation)?;
        let rows = azimuths_deg.len();
        let cols = elevations_deg.len();
        if samples.len() != total {
            return Err(CoverageError::InvalidSweepSpan(format!(
                "expected {} x {} = {} samples, got {}",
                rows,
                cols,
                total,
                samples.len()
            )));
        }

        let max_range_km = Array2::from_shape_fn((rows, cols), |(i, j)| {
            samples[i * cols + j].max_range_km().unwrap_or(f64::NAN)
        });
        let gain_db = Array2::from_shape_fn((rows, cols), |(i, j)| {
            samples[i * cols + j].gain_db.unwrap_or(f64::NAN)
        });

        Ok(Self {
            azimuths_deg,
            elevations_deg,
            max_range_km,
            gain_db,
        })
    }

    pub fn azimuths_deg(&self) -> &[f64] {
        &self.azimuths_deg
    }

    pub fn elevations_deg(&self) -> &[f64] {
        &self.elevations_deg
    }

    pub fn max_range_km(&self) -> &Array2<f64> {
        &self.max_range_km
    }

    pub fn gain_db(&self) -> &Array2<f64> {
        &self.gain_db
    }

    /// Longest detected range over elevation for each azimuth, NaN when no
    /// elevation produced one.
    pub fn azimuth_envelope_km(&self) -> Vec<f64> {
        self.max_range_km
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .copied()
                    .filter(|value| !value.is_nan())
                    .fold(f64::NAN, f64::max)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::RangeOutcome;

    fn sample(az: f64, el: f64, range_m: Option<f64>) -> CoverageSample {
        let outcome = match range_m {
            Some(max_range_m) => RangeOutcome::Detected { max_range_m },
            None => RangeOutcome::NotDetectable,
        };
        CoverageSample::new(az, el, Some(10.0), 1.0, outcome)
    }

    #[test]
    fn lays_out_rows_by_azimuth() {
        let azimuth = AngularSpan::new(0.0, 10.0, 10.0);
        let elevation = AngularSpan::new(0.0, 10.0, 5.0);
        let samples = vec![
            sample(0.0, 0.0, Some(10_000.0)),
            sample(0.0, 5.0, Some(20_000.0)),
            sample(0.0, 10.0, None),
            sample(10.0, 0.0, None),
            sample(10.0, 5.0, None),
            sample(10.0, 10.0, Some(4_000.0)),
        ];
        let grid = CoverageGrid::from_sweep(&azimuth, &elevation, &samples).unwrap();
        assert_eq!(grid.max_range_km().dim(), (2, 3));
        assert_eq!(grid.max_range_km()[[0, 1]], 20.0);
        assert!(grid.max_range_km()[[1, 0]].is_nan());
        assert_eq!(grid.azimuth_envelope_km(), vec![20.0, 4.0]);
        assert_eq!(grid.elevations_deg(), &[0.0, 5.0, 10.0]);
    }

    #[test]
    fn rejects_mismatched_sample_count() {
        let azimuth = AngularSpan::new(0.0, 10.0, 10.0);
        let elevation = AngularSpan::fixed(0.0);
        assert!(CoverageGrid::from_sweep(&azimuth, &elevation, &[]).is_err());
    }

    #[test]
    fn rejects_spans_too_fine_to_lay_out() {
        let azimuth = AngularSpan::new(0.0, 360.0, 1e-17);
        let elevation = AngularSpan::fixed(0.0);
        assert!(matches!(
            CoverageGrid::from_sweep(&azimuth, &elevation, &[]),
            Err(CoverageError::InvalidSweepSpan(_))
        ));
    }
}
