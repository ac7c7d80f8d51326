use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Common error type for link evaluation, range search and sweeps.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoverageError {
    #[error("invalid target geometry: {0}")]
    InvalidGeometry(String),
    #[error("invalid search bounds: {0}")]
    InvalidSearchBounds(String),
    #[error("numeric domain error: {0}")]
    NumericDomainError(String),
    #[error("gain query failed at az {azimuth_deg:.2} deg, el {elevation_deg:.2} deg: {source}")]
    GainQueryFailure {
        azimuth_deg: f64,
        elevation_deg: f64,
        #[source]
        source: GainError,
    },
    #[error("invalid radar configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid sweep span: {0}")]
    InvalidSweepSpan(String),
    #[error("every one of {total} sweep points failed")]
    AllPointsFailed { total: usize },
}

pub type CoverageResult<T> = Result<T, CoverageError>;

/// Failure reported by a gain model for a single query.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GainError {
    #[error("angle outside pattern domain: {0}")]
    OutOfDomain(String),
    #[error("gain unavailable: {0}")]
    Unavailable(String),
}

/// Antenna polarization forwarded to the gain model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Polarization {
    Horizontal,
    #[default]
    Vertical,
    HorzVert,
    VertHorz,
}

/// Parameters of a single gain lookup. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainQuery {
    pub azimuth_rad: f64,
    pub elevation_rad: f64,
    pub frequency_hz: f64,
    pub reference_gain_db: f64,
    pub polarization: Polarization,
    pub horizontal_beamwidth_rad: f64,
    pub vertical_beamwidth_rad: f64,
}

/// Directional antenna gain capability consumed by the link model.
///
/// Implementations are expected to be pure functions of the query for the
/// duration of a sweep. A model used with the parallel sweep must also be
/// safe for concurrent reads.
pub trait GainModel {
    /// Gain in dB for the given query.
    fn gain(&self, query: &GainQuery) -> Result<f64, GainError>;
}

impl<T: GainModel + ?Sized> GainModel for &T {
    fn gain(&self, query: &GainQuery) -> Result<f64, GainError> {
        (**self).gain(query)
    }
}

impl<T: GainModel + ?Sized> GainModel for Box<T> {
    fn gain(&self, query: &GainQuery) -> Result<f64, GainError> {
        (**self).gain(query)
    }
}

impl<T: GainModel + ?Sized> GainModel for Arc<T> {
    fn gain(&self, query: &GainQuery) -> Result<f64, GainError> {
        (**self).gain(query)
    }
}

/// Gain model returning the same value at every angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantGain(pub f64);

impl GainModel for ConstantGain {
    fn gain(&self, _query: &GainQuery) -> Result<f64, GainError> {
        Ok(self.0)
    }
}

/// Adapts a closure into a gain model.
pub struct FnGain<F>(pub F);

impl<F> GainModel for FnGain<F>
where
    F: Fn(&GainQuery) -> Result<f64, GainError>,
{
    fn gain(&self, query: &GainQuery) -> Result<f64, GainError> {
        (self.0)(query)
    }
}
