use crate::generator::pattern::PatternConfig;
use anyhow::Context;
use radarcov::coverage::grid_point_count;
use radarcov::{AngularSpan, RadarSystemConfig, SearchBounds, TargetGeometry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Angular grids covered by one analysis run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepPlan {
    pub azimuth_cut: AngularSpan,
    pub azimuth_cut_elevation_deg: f64,
    pub elevation_cut: AngularSpan,
    pub elevation_cut_azimuth_deg: f64,
    pub grid_azimuth: AngularSpan,
    pub grid_elevation: AngularSpan,
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            azimuth_cut: AngularSpan::new(-180.0, 180.0, 5.0),
            azimuth_cut_elevation_deg: 0.0,
            elevation_cut: AngularSpan::new(-30.0, 90.0, 5.0),
            elevation_cut_azimuth_deg: 0.0,
            grid_azimuth: AngularSpan::new(-180.0, 180.0, 10.0),
            grid_elevation: AngularSpan::new(-30.0, 90.0, 5.0),
        }
    }
}

/// A target for single-point link analysis; angles in degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub range_m: f64,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub rcs_m2: f64,
}

impl TargetSpec {
    pub fn new(range_m: f64, azimuth_deg: f64, elevation_deg: f64, rcs_m2: f64) -> Self {
        Self {
            range_m,
            azimuth_deg,
            elevation_deg,
            rcs_m2,
        }
    }

    pub fn to_geometry(&self) -> TargetGeometry {
        TargetGeometry::from_degrees(self.range_m, self.azimuth_deg, self.elevation_deg, self.rcs_m2)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub radar: RadarSystemConfig,
    pub pattern: PatternConfig,
    pub search: SearchBounds,
    pub sweeps: SweepPlan,
    /// RCS used for every coverage sweep.
    pub rcs_m2: f64,
    pub rcs_comparison: Vec<f64>,
    /// Directions (azimuth, elevation 0) for the RCS comparison: main beam,
    /// side and back by default.
    pub comparison_azimuths_deg: Vec<f64>,
    pub targets: Vec<TargetSpec>,
    pub output_dir: PathBuf,
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            radar: RadarSystemConfig::default(),
            pattern: PatternConfig::default(),
            search: SearchBounds::default(),
            sweeps: SweepPlan::default(),
            rcs_m2: 1.0,
            rcs_comparison: vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0],
            comparison_azimuths_deg: vec![0.0, 90.0, 180.0],
            targets: vec![
                TargetSpec::new(50_000.0, 0.0, 0.0, 1.0),
                TargetSpec::new(100_000.0, 30.0, 5.0, 0.5),
                TargetSpec::new(200_000.0, 45.0, 10.0, 2.0),
                TargetSpec::new(150_000.0, 90.0, 0.0, 1.5),
                TargetSpec::new(80_000.0, 180.0, 0.0, 0.8),
                TargetSpec::new(120_000.0, -45.0, 15.0, 1.2),
            ],
            output_dir: PathBuf::from("coverage_output"),
            parallel: false,
        }
    }
}

impl AnalysisConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading analysis config {}", path_ref.display()))?;
        let config: AnalysisConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing analysis config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        pattern: PatternConfig,
        rcs_m2: f64,
        azimuth_step_deg: f64,
        elevation_step_deg: f64,
    ) -> Self {
        let defaults = SweepPlan::default();
        let sweeps = SweepPlan {
            azimuth_cut: AngularSpan {
                step_deg: azimuth_step_deg,
                ..defaults.azimuth_cut
            },
            elevation_cut: AngularSpan {
                step_deg: elevation_step_deg,
                ..defaults.elevation_cut
            },
            grid_azimuth: AngularSpan {
                step_deg: azimuth_step_deg * 2.0,
                ..defaults.grid_azimuth
            },
            grid_elevation: AngularSpan {
                step_deg: elevation_step_deg,
                ..defaults.grid_elevation
            },
            ..defaults
        };
        Self {
            pattern,
            rcs_m2,
            sweeps,
            ..Default::default()
        }
    }

    /// Checks everything that can be checked before building the engine.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.radar.validate().context("radar section")?;
        self.search.validate().context("search section")?;
        for (name, span) in [
            ("azimuth_cut", &self.sweeps.azimuth_cut),
            ("elevation_cut", &self.sweeps.elevation_cut),
            ("grid_azimuth", &self.sweeps.grid_azimuth),
            ("grid_elevation", &self.sweeps.grid_elevation),
        ] {
            span.validate()
                .with_context(|| format!("sweeps.{}", name))?;
        }
        grid_point_count(&self.sweeps.grid_azimuth, &self.sweeps.grid_elevation)
            .context("sweeps.grid")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_overrides_steps() {
        let cfg = AnalysisConfig::from_args(PatternConfig::default(), 2.0, 5.0, 5.0);
        assert_eq!(cfg.rcs_m2, 2.0);
        assert_eq!(cfg.sweeps.azimuth_cut.count().unwrap(), 73);
        assert_eq!(cfg.sweeps.grid_azimuth.count().unwrap(), 37);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn config_load_reads_yaml_with_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"radar:\n  transmit_power_w: 500000.0\n  detection_threshold_db: 10.0\npattern:\n  kind: constant\n  offset_db: -3.0\nsearch:\n  epsilon_m: 50.0\nrcs_m2: 0.5\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = AnalysisConfig::load(&path).unwrap();
        assert_eq!(cfg.radar.transmit_power_w, 500_000.0);
        assert_eq!(cfg.radar.frequency_hz, 10.0e9);
        assert_eq!(cfg.pattern, PatternConfig::Constant { offset_db: -3.0 });
        assert_eq!(cfg.search.epsilon_m, 50.0);
        assert_eq!(cfg.search.max_range_m, 500_000.0);
        assert_eq!(cfg.targets.len(), 6);
    }

    #[test]
    fn bundled_config_is_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/x_band.yaml");
        let cfg = AnalysisConfig::load(path).unwrap();
        assert_eq!(cfg.pattern, PatternConfig::Sinc { floor_db: -40.0 });
        assert_eq!(cfg.targets.len(), 3);
        assert!(cfg.parallel);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_reports_bad_spans() {
        let mut cfg = AnalysisConfig::default();
        cfg.sweeps.grid_elevation.step_deg = 0.0;
        let err = cfg.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("grid_elevation"));
    }

    #[test]
    fn validate_rejects_steps_too_fine_to_sweep() {
        let cfg = AnalysisConfig::from_args(PatternConfig::default(), 1.0, 1e-17, 5.0);
        let err = cfg.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("azimuth_cut"));

        let mut cfg = AnalysisConfig::default();
        cfg.sweeps.grid_azimuth = AngularSpan::new(0.0, 99_999.0, 1.0);
        cfg.sweeps.grid_elevation = AngularSpan::new(0.0, 99_999.0, 1.0);
        let err = cfg.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("sweeps.grid"));
    }
}
