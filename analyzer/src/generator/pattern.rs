use anyhow::{bail, Context};
use radarcov::prelude::{GainError, GainModel, GainQuery};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Gain model handed to the link model by the driver.
pub type SharedGainModel = Box<dyn GainModel + Send + Sync>;

// sin(x)/x falls to 1/sqrt(2) at this argument.
const SINC_HALF_POWER_ARG: f64 = 1.391_557_4;

/// Synthetic antenna pattern selection, tagged by `kind` in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternConfig {
    /// Same gain everywhere, relative to the reference gain.
    Constant {
        #[serde(default)]
        offset_db: f64,
    },
    /// Gaussian main beam clamped at a sidelobe floor.
    Gaussian {
        #[serde(default = "default_floor")]
        floor_db: f64,
    },
    /// Separable sin(x)/x pattern clamped at a floor.
    Sinc {
        #[serde(default = "default_floor")]
        floor_db: f64,
    },
    /// Separable azimuth/elevation cuts as `[angle_deg, relative_db]` pairs.
    Table {
        azimuth: Vec<[f64; 2]>,
        elevation: Vec<[f64; 2]>,
    },
}

fn default_floor() -> f64 {
    -40.0
}

impl Default for PatternConfig {
    fn default() -> Self {
        PatternConfig::Gaussian {
            floor_db: default_floor(),
        }
    }
}

/// Wraps an angle into [-pi, pi).
fn wrap_angle(angle_rad: f64) -> f64 {
    (angle_rad + PI).rem_euclid(2.0 * PI) - PI
}

fn check_beamwidths(query: &GainQuery) -> Result<(), GainError> {
    if query.horizontal_beamwidth_rad > 0.0 && query.vertical_beamwidth_rad > 0.0 {
        Ok(())
    } else {
        Err(GainError::Unavailable(
            "beamwidths must be positive".to_string(),
        ))
    }
}

pub struct ConstantPattern {
    offset_db: f64,
}

impl GainModel for ConstantPattern {
    fn gain(&self, query: &GainQuery) -> Result<f64, GainError> {
        Ok(query.reference_gain_db + self.offset_db)
    }
}

/// `G = G0 - 12 * ((az / hbw)^2 + (el / vbw)^2)`, 3 dB down at half beamwidth.
pub struct GaussianBeam {
    floor_db: f64,
}

impl GainModel for GaussianBeam {
    fn gain(&self, query: &GainQuery) -> Result<f64, GainError> {
        check_beamwidths(query)?;
        let az = wrap_angle(query.azimuth_rad) / query.horizontal_beamwidth_rad;
        let el = wrap_angle(query.elevation_rad) / query.vertical_beamwidth_rad;
        let relative = (-12.0 * (az * az + el * el)).max(self.floor_db);
        Ok(query.reference_gain_db + relative)
    }
}

pub struct SincBeam {
    floor_db: f64,
}

impl SincBeam {
    fn cut_db(angle_rad: f64, beamwidth_rad: f64) -> f64 {
        let x = 2.0 * SINC_HALF_POWER_ARG * angle_rad / beamwidth_rad;
        let sinc = if x.abs() < 1e-12 { 1.0 } else { x.sin() / x };
        20.0 * sinc.abs().log10()
    }
}

impl GainModel for SincBeam {
    fn gain(&self, query: &GainQuery) -> Result<f64, GainError> {
        check_beamwidths(query)?;
        let az = Self::cut_db(wrap_angle(query.azimuth_rad), query.horizontal_beamwidth_rad);
        let el = Self::cut_db(wrap_angle(query.elevation_rad), query.vertical_beamwidth_rad);
        // Pattern nulls give -inf, which the floor absorbs.
        Ok(query.reference_gain_db + (az + el).max(self.floor_db))
    }
}

/// Linearly interpolated azimuth and elevation cuts, relative to the
/// reference gain.
pub struct TablePattern {
    azimuth: Vec<(f64, f64)>,
    elevation: Vec<(f64, f64)>,
}

impl TablePattern {
    /// Builds the pattern from `(angle_deg, relative_db)` pairs.
    pub fn new(azimuth: &[[f64; 2]], elevation: &[[f64; 2]]) -> anyhow::Result<Self> {
        Ok(Self {
            azimuth: Self::prepare("azimuth", azimuth)?,
            elevation: Self::prepare("elevation", elevation)?,
        })
    }

    /// Parabolic cuts: azimuth -3 dB at 90 deg floored at -30 dB, elevation
    /// -1.5 dB at 45 deg floored at -20 dB.
    pub fn parabolic() -> Self {
        let azimuth = (-18..=18)
            .map(|step| {
                let deg = step as f64 * 10.0;
                (deg.to_radians(), (-3.0 * deg * deg / (90.0 * 90.0)).max(-30.0))
            })
            .collect();
        let elevation = (-9..=9)
            .map(|step| {
                let deg = step as f64 * 10.0;
                (deg.to_radians(), (-1.5 * deg * deg / (45.0 * 45.0)).max(-20.0))
            })
            .collect();
        Self { azimuth, elevation }
    }

    fn prepare(name: &str, points: &[[f64; 2]]) -> anyhow::Result<Vec<(f64, f64)>> {
        if points.len() < 2 {
            bail!("{} table needs at least two points", name);
        }
        let mut cut: Vec<(f64, f64)> = points
            .iter()
            .map(|[deg, db]| (deg.to_radians(), *db))
            .collect();
        if cut.iter().any(|(angle, db)| !angle.is_finite() || !db.is_finite()) {
            bail!("{} table contains non-finite values", name);
        }
        cut.sort_by(|a, b| a.0.total_cmp(&b.0));
        if cut.windows(2).any(|pair| pair[0].0 == pair[1].0) {
            bail!("{} table repeats an angle", name);
        }
        Ok(cut)
    }

    fn interpolate(cut: &[(f64, f64)], angle_rad: f64) -> Result<f64, GainError> {
        let (first, last) = match (cut.first(), cut.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(GainError::Unavailable("empty table".to_string())),
        };
        if angle_rad < first.0 || angle_rad > last.0 {
            return Err(GainError::OutOfDomain(format!(
                "{:.2} deg outside [{:.2}, {:.2}] deg",
                angle_rad.to_degrees(),
                first.0.to_degrees(),
                last.0.to_degrees()
            )));
        }
        let upper = cut.partition_point(|(angle, _)| *angle < angle_rad);
        if upper == 0 {
            return Ok(first.1);
        }
        let (a0, g0) = cut[upper - 1];
        let (a1, g1) = cut[upper];
        Ok(g0 + (g1 - g0) * (angle_rad - a0) / (a1 - a0))
    }
}

impl GainModel for TablePattern {
    fn gain(&self, query: &GainQuery) -> Result<f64, GainError> {
        let az = Self::interpolate(&self.azimuth, query.azimuth_rad)?;
        let el = Self::interpolate(&self.elevation, query.elevation_rad)?;
        Ok(query.reference_gain_db + az + el)
    }
}

pub fn build_gain_model(config: &PatternConfig) -> anyhow::Result<SharedGainModel> {
    let model: SharedGainModel = match config {
        PatternConfig::Constant { offset_db } => Box::new(ConstantPattern {
            offset_db: *offset_db,
        }),
        PatternConfig::Gaussian { floor_db } => Box::new(GaussianBeam {
            floor_db: *floor_db,
        }),
        PatternConfig::Sinc { floor_db } => Box::new(SincBeam {
            floor_db: *floor_db,
        }),
        PatternConfig::Table {
            azimuth,
            elevation,
        } if azimuth.is_empty() && elevation.is_empty() => Box::new(TablePattern::parabolic()),
        PatternConfig::Table {
            azimuth,
            elevation,
        } => Box::new(TablePattern::new(azimuth, elevation).context("building table pattern")?),
    };
    Ok(model)
}
