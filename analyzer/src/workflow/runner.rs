use crate::generator::pattern::{build_gain_model, SharedGainModel};
use crate::workflow::config::{AnalysisConfig, TargetSpec};
use anyhow::Context;
use radarcov::interface::SweepRequest;
use radarcov::math::CoverageStats;
use radarcov::{
    AngularSpan, CoverageGrid, CoverageSample, CoverageSweepEngine, LinkBudget, RadarLinkModel,
};
use std::sync::Arc;

pub type Engine = CoverageSweepEngine<SharedGainModel>;

/// Link analysis of one configured target.
pub struct TargetReport {
    pub target: TargetSpec,
    pub budget: Result<LinkBudget, String>,
}

/// Maximum range versus RCS in one direction.
pub struct RcsComparison {
    pub azimuth_deg: f64,
    pub samples: Vec<CoverageSample>,
}

pub struct AnalysisReport {
    pub azimuth_cut: Vec<CoverageSample>,
    pub elevation_cut: Vec<CoverageSample>,
    pub grid: Vec<CoverageSample>,
    pub grid_stats: CoverageStats,
    pub coverage_grid: CoverageGrid,
    pub targets: Vec<TargetReport>,
    pub main_beam_gain_db: f64,
    pub rcs_comparison: Vec<RcsComparison>,
}

#[derive(Clone)]
pub struct Runner {
    config: AnalysisConfig,
    engine: Arc<Engine>,
}

impl Runner {
    pub fn new(config: AnalysisConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let gain_model = build_gain_model(&config.pattern)?;
        let link = RadarLinkModel::new(config.radar.clone(), gain_model)
            .context("building radar link model")?;
        let engine =
            CoverageSweepEngine::new(link, config.search).context("building sweep engine")?;
        Ok(Self {
            config,
            engine: Arc::new(engine),
        })
    }

    pub fn execute(&self) -> anyhow::Result<AnalysisReport> {
        let sweeps = &self.config.sweeps;
        let rcs_m2 = self.config.rcs_m2;

        let azimuth_cut = self
            .engine
            .sweep_azimuth(sweeps.azimuth_cut_elevation_deg, sweeps.azimuth_cut, rcs_m2)
            .context("running azimuth coverage")?;
        let elevation_cut = self
            .engine
            .sweep_elevation(sweeps.elevation_cut_azimuth_deg, sweeps.elevation_cut, rcs_m2)
            .context("running elevation coverage")?;
        let grid = self
            .run_grid(sweeps.grid_azimuth, sweeps.grid_elevation, rcs_m2)
            .context("running 2-D coverage")?;
        let grid_stats = CoverageStats::from_samples(&grid);
        let coverage_grid =
            CoverageGrid::from_sweep(&sweeps.grid_azimuth, &sweeps.grid_elevation, &grid)
                .context("laying out 2-D coverage grid")?;

        let targets = self
            .config
            .targets
            .iter()
            .map(|target| TargetReport {
                target: target.clone(),
                budget: self
                    .engine
                    .link()
                    .evaluate(&target.to_geometry())
                    .map_err(|err| err.to_string()),
            })
            .collect();

        let main_beam_gain_db = self
            .engine
            .link()
            .antenna_gain(0.0, 0.0)
            .context("querying main beam gain")?;

        let rcs_comparison = self
            .config
            .comparison_azimuths_deg
            .iter()
            .map(|&azimuth_deg| {
                self.engine
                    .rcs_profile(azimuth_deg, 0.0, &self.config.rcs_comparison)
                    .map(|samples| RcsComparison {
                        azimuth_deg,
                        samples,
                    })
                    .with_context(|| format!("comparing RCS at azimuth {} deg", azimuth_deg))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(AnalysisReport {
            azimuth_cut,
            elevation_cut,
            grid,
            grid_stats,
            coverage_grid,
            targets,
            main_beam_gain_db,
            rcs_comparison,
        })
    }

    /// Azimuth sweep submitted through the bridge.
    pub fn run_sweep(&self, request: &SweepRequest) -> anyhow::Result<Vec<CoverageSample>> {
        self.engine
            .sweep_azimuth(request.elevation_deg, request.azimuth, request.rcs_m2)
            .with_context(|| {
                format!(
                    "sweep {}",
                    request.label.clone().unwrap_or_else(|| "request".to_string())
                )
            })
    }

    fn run_grid(
        &self,
        azimuth: AngularSpan,
        elevation: AngularSpan,
        rcs_m2: f64,
    ) -> radarcov::CoverageResult<Vec<CoverageSample>> {
        if self.config.parallel {
            self.engine.sweep_2d_parallel(azimuth, elevation, rcs_m2)
        } else {
            self.engine.sweep_2d(azimuth, elevation, rcs_m2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::pattern::PatternConfig;
    use crate::workflow::config::SweepPlan;

    fn small_config() -> AnalysisConfig {
        AnalysisConfig {
            sweeps: SweepPlan {
                azimuth_cut: AngularSpan::new(-20.0, 20.0, 5.0),
                elevation_cut: AngularSpan::new(-10.0, 10.0, 5.0),
                grid_azimuth: AngularSpan::new(-20.0, 20.0, 10.0),
                grid_elevation: AngularSpan::new(0.0, 10.0, 5.0),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn runner_executes_full_analysis() {
        let runner = Runner::new(small_config()).unwrap();
        let report = runner.execute().unwrap();
        assert_eq!(report.azimuth_cut.len(), 9);
        assert_eq!(report.elevation_cut.len(), 5);
        assert_eq!(report.grid.len(), 15);
        assert_eq!(report.coverage_grid.max_range_km().dim(), (5, 3));
        assert_eq!(report.coverage_grid.azimuth_envelope_km().len(), 5);
        assert_eq!(report.targets.len(), 6);
        assert_eq!(report.rcs_comparison.len(), 3);
        assert!((report.main_beam_gain_db - 30.0).abs() < 1e-12);
        assert_eq!(report.grid_stats.total, 15);
        assert!(report.grid_stats.best.is_some());
    }

    #[test]
    fn parallel_grid_matches_sequential() {
        let sequential = Runner::new(small_config()).unwrap().execute().unwrap();
        let parallel = Runner::new(AnalysisConfig {
            parallel: true,
            ..small_config()
        })
        .unwrap()
        .execute()
        .unwrap();
        assert_eq!(sequential.grid, parallel.grid);
    }

    #[test]
    fn bridge_requests_run_azimuth_sweeps() {
        let runner = Runner::new(AnalysisConfig {
            pattern: PatternConfig::Constant { offset_db: 0.0 },
            ..small_config()
        })
        .unwrap();
        let request = SweepRequest {
            azimuth: AngularSpan::new(0.0, 30.0, 10.0),
            elevation_deg: 0.0,
            rcs_m2: 1.0,
            label: Some("unit".into()),
        };
        let samples = runner.run_sweep(&request).unwrap();
        assert_eq!(samples.len(), 4);
        assert!(samples
            .iter()
            .all(|s| s.outcome == samples[0].outcome));
    }

    #[test]
    fn runner_rejects_invalid_config() {
        let mut cfg = small_config();
        cfg.radar.noise_temperature_k = 0.0;
        assert!(Runner::new(cfg).is_err());
    }
}
