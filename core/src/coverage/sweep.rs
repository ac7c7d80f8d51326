use crate::coverage::search::{MaxRangeSearch, SearchBounds};
use crate::coverage::span::grid_point_count;
use crate::interface::{AngularSpan, CoverageSample, RangeOutcome};
use crate::prelude::{CoverageError, CoverageResult, GainModel};
use crate::radar::link::RadarLinkModel;
use crate::radar::target::validate_rcs;
use crate::telemetry::log::LogManager;
use crate::telemetry::progress::{Progress, SweepProgress};
use std::sync::{Arc, Mutex};

/// Drives the maximum-range search over angular grids.
///
/// Samples come out in grid order: increasing azimuth, and for 2-D sweeps
/// azimuth is the outer loop and elevation the inner one. A point whose gain
/// query or search fails is kept as an `Invalid` sample; only a sweep in
/// which every point fails is reported as an error.
///
/// Every sweep counts its points in its own [`SweepProgress`], so sweeps
/// running concurrently on a shared engine never reset each other. The
/// engine also remembers the most recently started one.
pub struct CoverageSweepEngine<G> {
    link: RadarLinkModel<G>,
    search: MaxRangeSearch,
    latest: Mutex<Arc<SweepProgress>>,
    logger: LogManager,
}

impl<G: GainModel> CoverageSweepEngine<G> {
    pub fn new(link: RadarLinkModel<G>, bounds: SearchBounds) -> CoverageResult<Self> {
        Ok(Self {
            link,
            search: MaxRangeSearch::new(bounds)?,
            latest: Mutex::new(Arc::new(SweepProgress::new(0))),
            logger: LogManager::with_target("radarcov::sweep"),
        })
    }

    pub fn link(&self) -> &RadarLinkModel<G> {
        &self.link
    }

    pub fn bounds(&self) -> &SearchBounds {
        self.search.bounds()
    }

    /// Progress of the most recently started sweep. Concurrent callers
    /// should read [`SweepIter::progress`] instead.
    pub fn progress(&self) -> Progress {
        match self.latest.lock() {
            Ok(latest) => latest.snapshot(),
            Err(_) => Progress::default(),
        }
    }

    fn start_progress(&self, total: usize) -> Arc<SweepProgress> {
        let progress = Arc::new(SweepProgress::new(total));
        if let Ok(mut latest) = self.latest.lock() {
            *latest = Arc::clone(&progress);
        }
        progress
    }

    /// Maximum detectable range in one direction (angles in degrees).
    pub fn max_range(
        &self,
        azimuth_deg: f64,
        elevation_deg: f64,
        rcs_m2: f64,
    ) -> CoverageResult<RangeOutcome> {
        self.search.max_range(
            &self.link,
            azimuth_deg.to_radians(),
            elevation_deg.to_radians(),
            rcs_m2,
        )
    }

    /// Gain and maximum range for one grid point. Never fails: per-point
    /// errors become an `Invalid` outcome.
    pub fn evaluate_point(&self, azimuth_deg: f64, elevation_deg: f64, rcs_m2: f64) -> CoverageSample {
        let azimuth_rad = azimuth_deg.to_radians();
        let elevation_rad = elevation_deg.to_radians();

        let gain_db = match self.link.antenna_gain(azimuth_rad, elevation_rad) {
            Ok(gain_db) => gain_db,
            Err(err) => {
                self.logger.warn(&format!("sweep point skipped: {}", err));
                return CoverageSample::new(
                    azimuth_deg,
                    elevation_deg,
                    None,
                    rcs_m2,
                    RangeOutcome::Invalid {
                        reason: err.to_string(),
                    },
                );
            }
        };

        let outcome = self
            .search
            .max_range_with_gain(&self.link, azimuth_rad, elevation_rad, rcs_m2, gain_db)
            .unwrap_or_else(|err| {
                self.logger.warn(&format!(
                    "range search failed at az {:.2} deg, el {:.2} deg: {}",
                    azimuth_deg, elevation_deg, err
                ));
                RangeOutcome::Invalid {
                    reason: err.to_string(),
                }
            });

        self.logger.debug(&format!(
            "az {:.2} deg, el {:.2} deg, gain {:.2} dB: {}",
            azimuth_deg,
            elevation_deg,
            gain_db,
            outcome.label()
        ));
        CoverageSample::new(azimuth_deg, elevation_deg, Some(gain_db), rcs_m2, outcome)
    }

    /// Azimuth cut at a fixed elevation.
    pub fn sweep_azimuth(
        &self,
        elevation_deg: f64,
        azimuth: AngularSpan,
        rcs_m2: f64,
    ) -> CoverageResult<Vec<CoverageSample>> {
        let (points, progress) = self.plan(&azimuth, &AngularSpan::fixed(elevation_deg), rcs_m2)?;
        self.collect(SweepIter::new(self, points, rcs_m2, progress))
    }

    /// Elevation cut at a fixed azimuth.
    pub fn sweep_elevation(
        &self,
        azimuth_deg: f64,
        elevation: AngularSpan,
        rcs_m2: f64,
    ) -> CoverageResult<Vec<CoverageSample>> {
        let (points, progress) = self.plan(&AngularSpan::fixed(azimuth_deg), &elevation, rcs_m2)?;
        self.collect(SweepIter::new(self, points, rcs_m2, progress))
    }

    /// Full azimuth x elevation grid, azimuth outer loop.
    pub fn sweep_2d(
        &self,
        azimuth: AngularSpan,
        elevation: AngularSpan,
        rcs_m2: f64,
    ) -> CoverageResult<Vec<CoverageSample>> {
        self.collect(self.iter_2d(azimuth, elevation, rcs_m2)?)
    }

    /// Lazy form of [`sweep_2d`](Self::sweep_2d). Dropping the iterator
    /// abandons the sweep between points; samples already yielded stay valid.
    /// No all-points-failed check is made.
    pub fn iter_2d(
        &self,
        azimuth: AngularSpan,
        elevation: AngularSpan,
        rcs_m2: f64,
    ) -> CoverageResult<SweepIter<'_, G>> {
        let (points, progress) = self.plan(&azimuth, &elevation, rcs_m2)?;
        Ok(SweepIter::new(self, points, rcs_m2, progress))
    }

    /// Maximum range in one direction for several target sizes.
    pub fn rcs_profile(
        &self,
        azimuth_deg: f64,
        elevation_deg: f64,
        rcs_values: &[f64],
    ) -> CoverageResult<Vec<CoverageSample>> {
        for &rcs_m2 in rcs_values {
            validate_rcs(rcs_m2)?;
        }
        let progress = self.start_progress(rcs_values.len());
        let samples: Vec<CoverageSample> = rcs_values
            .iter()
            .map(|&rcs_m2| {
                let sample = self.evaluate_point(azimuth_deg, elevation_deg, rcs_m2);
                progress.record_point(sample.is_valid());
                sample
            })
            .collect();
        ensure_some_valid(samples)
    }

    fn plan(
        &self,
        azimuth: &AngularSpan,
        elevation: &AngularSpan,
        rcs_m2: f64,
    ) -> CoverageResult<(Vec<(f64, f64)>, Arc<SweepProgress>)> {
        let total = grid_point_count(azimuth, elevation)?;
        validate_rcs(rcs_m2)?;

        let azimuths = azimuth.angles()?;
        let elevations = elevation.angles()?;
        let mut points = Vec::with_capacity(total);
        for &az in &azimuths {
            points.extend(elevations.iter().map(|&el| (az, el)));
        }

        let progress = self.start_progress(points.len());
        self.logger.record(&format!(
            "sweep planned: {} azimuth x {} elevation points, rcs {} m2",
            azimuths.len(),
            elevations.len(),
            rcs_m2
        ));
        Ok((points, progress))
    }

    fn collect(&self, iter: SweepIter<'_, G>) -> CoverageResult<Vec<CoverageSample>> {
        let tracker = Arc::clone(&iter.progress);
        let samples: Vec<CoverageSample> = iter.collect();
        let progress = tracker.snapshot();
        self.logger.record(&format!(
            "sweep finished: {} points, {} invalid",
            progress.completed, progress.failed
        ));
        ensure_some_valid(samples)
    }

    fn note_progress(&self, tracker: &SweepProgress, valid: bool) {
        let progress = tracker.record_point(valid);
        let stride = (progress.total / 10).max(1);
        if progress.completed % stride == 0 || progress.is_done() {
            self.logger.record(&format!(
                "sweep progress: {}/{} ({}%)",
                progress.completed,
                progress.total,
                progress.percent()
            ));
        }
    }
}

#[cfg(feature = "parallel")]
impl<G: GainModel + Sync> CoverageSweepEngine<G> {
    /// Same samples, in the same order, as [`sweep_2d`](Self::sweep_2d), with
    /// grid points evaluated on the rayon pool.
    pub fn sweep_2d_parallel(
        &self,
        azimuth: AngularSpan,
        elevation: AngularSpan,
        rcs_m2: f64,
    ) -> CoverageResult<Vec<CoverageSample>> {
        use rayon::prelude::*;

        let (points, progress) = self.plan(&azimuth, &elevation, rcs_m2)?;
        let samples: Vec<CoverageSample> = points
            .par_iter()
            .map(|&(az, el)| {
                let sample = self.evaluate_point(az, el, rcs_m2);
                self.note_progress(&progress, sample.is_valid());
                sample
            })
            .collect();
        ensure_some_valid(samples)
    }
}

fn ensure_some_valid(samples: Vec<CoverageSample>) -> CoverageResult<Vec<CoverageSample>> {
    if !samples.is_empty() && samples.iter().all(|sample| !sample.is_valid()) {
        return Err(CoverageError::AllPointsFailed {
            total: samples.len(),
        });
    }
    Ok(samples)
}

/// Iterator over the points of a planned sweep.
pub struct SweepIter<'a, G> {
    engine: &'a CoverageSweepEngine<G>,
    points: std::vec::IntoIter<(f64, f64)>,
    rcs_m2: f64,
    progress: Arc<SweepProgress>,
}

impl<'a, G: GainModel> SweepIter<'a, G> {
    fn new(
        engine: &'a CoverageSweepEngine<G>,
        points: Vec<(f64, f64)>,
        rcs_m2: f64,
        progress: Arc<SweepProgress>,
    ) -> Self {
        Self {
            engine,
            points: points.into_iter(),
            rcs_m2,
            progress,
        }
    }

    /// Progress of this sweep alone.
    pub fn progress(&self) -> Progress {
        self.progress.snapshot()
    }
}

impl<'a, G: GainModel> Iterator for SweepIter<'a, G> {
    type Item = CoverageSample;

    fn next(&mut self) -> Option<Self::Item> {
        let (azimuth_deg, elevation_deg) = self.points.next()?;
        let sample = self
            .engine
            .evaluate_point(azimuth_deg, elevation_deg, self.rcs_m2);
        self.engine.note_progress(&self.progress, sample.is_valid());
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}

impl<'a, G: GainModel> ExactSizeIterator for SweepIter<'a, G> {}
