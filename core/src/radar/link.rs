use crate::math::units::UnitsHelper;
use crate::prelude::{CoverageError, CoverageResult, GainError, GainModel, GainQuery};
use crate::radar::config::RadarSystemConfig;
use crate::radar::target::TargetGeometry;
use crate::telemetry::log::LogManager;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Full link evaluation for one target geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkBudget {
    pub gain_db: f64,
    pub received_power_w: f64,
    pub received_power_dbm: f64,
    pub snr_db: f64,
    pub detectable: bool,
}

/// Monostatic radar range equation evaluated against an injected gain model.
///
/// The configuration is validated once in [`RadarLinkModel::new`] and never
/// changes afterwards. Every evaluation is a pure function of its inputs and
/// of the gain model's answer.
pub struct RadarLinkModel<G> {
    config: RadarSystemConfig,
    gain_model: G,
    noise_power_w: f64,
}

impl<G: GainModel> RadarLinkModel<G> {
    pub fn new(config: RadarSystemConfig, gain_model: G) -> CoverageResult<Self> {
        config.validate()?;
        let noise_power_w = config.noise_power_w();
        LogManager::with_target("radarcov::link").record(&format!(
            "link model ready: {:.3} MW at {:.3} GHz, noise {:.3e} W, threshold {:.1} dB",
            config.transmit_power_w / 1.0e6,
            config.frequency_hz / 1.0e9,
            noise_power_w,
            config.detection_threshold_db
        ));
        Ok(Self {
            config,
            gain_model,
            noise_power_w,
        })
    }

    pub fn config(&self) -> &RadarSystemConfig {
        &self.config
    }

    pub fn noise_power_w(&self) -> f64 {
        self.noise_power_w
    }

    pub fn gain_query(&self, azimuth_rad: f64, elevation_rad: f64) -> GainQuery {
        GainQuery {
            azimuth_rad,
            elevation_rad,
            frequency_hz: self.config.frequency_hz,
            reference_gain_db: self.config.reference_gain_db,
            polarization: self.config.polarization,
            horizontal_beamwidth_rad: self.config.horizontal_beamwidth_deg.to_radians(),
            vertical_beamwidth_rad: self.config.vertical_beamwidth_deg.to_radians(),
        }
    }

    /// Antenna gain in dB at the given direction. Not cached.
    ///
    /// `-inf` is passed through (it becomes a numeric domain error once the
    /// SNR logarithm is taken); NaN and `+inf` are treated as a failed query.
    pub fn antenna_gain(&self, azimuth_rad: f64, elevation_rad: f64) -> CoverageResult<f64> {
        let query = self.gain_query(azimuth_rad, elevation_rad);
        let gain = self
            .gain_model
            .gain(&query)
            .map_err(|source| CoverageError::GainQueryFailure {
                azimuth_deg: azimuth_rad.to_degrees(),
                elevation_deg: elevation_rad.to_degrees(),
                source,
            })?;
        if gain.is_nan() || gain == f64::INFINITY {
            return Err(CoverageError::GainQueryFailure {
                azimuth_deg: azimuth_rad.to_degrees(),
                elevation_deg: elevation_rad.to_degrees(),
                source: GainError::Unavailable(format!(
                    "gain model returned {}",
                    gain
                )),
            });
        }
        Ok(gain)
    }

    /// Received echo power in watts.
    pub fn received_power(&self, target: &TargetGeometry) -> CoverageResult<f64> {
        target.validate()?;
        let gain_db = self.antenna_gain(target.azimuth_rad, target.elevation_rad)?;
        self.received_power_with_gain(target, gain_db)
    }

    /// Received power using an already known antenna gain for the target's
    /// direction. Transmit and receive gain are the same (monostatic).
    pub fn received_power_with_gain(
        &self,
        target: &TargetGeometry,
        gain_db: f64,
    ) -> CoverageResult<f64> {
        target.validate()?;
        let tx_gain = UnitsHelper::db_to_linear(gain_db);
        let rx_gain = tx_gain;
        let wavelength = self.config.wavelength_m();
        let numerator = self.config.transmit_power_w
            * tx_gain
            * rx_gain
            * wavelength.powi(2)
            * target.rcs_m2;
        let denominator =
            (4.0 * PI).powi(3) * target.range_m.powi(4) * self.config.loss_linear();
        Ok(numerator / denominator)
    }

    /// Signal-to-noise ratio in dB.
    pub fn snr(&self, target: &TargetGeometry) -> CoverageResult<f64> {
        let received = self.received_power(target)?;
        self.snr_from_power(received)
    }

    pub fn snr_with_gain(&self, target: &TargetGeometry, gain_db: f64) -> CoverageResult<f64> {
        let received = self.received_power_with_gain(target, gain_db)?;
        self.snr_from_power(received)
    }

    pub fn is_detectable(&self, target: &TargetGeometry) -> CoverageResult<bool> {
        Ok(self.snr(target)? >= self.config.detection_threshold_db)
    }

    pub fn is_detectable_with_gain(
        &self,
        target: &TargetGeometry,
        gain_db: f64,
    ) -> CoverageResult<bool> {
        Ok(self.snr_with_gain(target, gain_db)? >= self.config.detection_threshold_db)
    }

    /// Gain, received power, SNR and detectability in one pass.
    pub fn evaluate(&self, target: &TargetGeometry) -> CoverageResult<LinkBudget> {
        target.validate()?;
        let gain_db = self.antenna_gain(target.azimuth_rad, target.elevation_rad)?;
        let received_power_w = self.received_power_with_gain(target, gain_db)?;
        let snr_db = self.snr_from_power(received_power_w)?;
        Ok(LinkBudget {
            gain_db,
            received_power_w,
            received_power_dbm: UnitsHelper::watts_to_dbm(received_power_w),
            snr_db,
            detectable: snr_db >= self.config.detection_threshold_db,
        })
    }

    fn snr_from_power(&self, received_power_w: f64) -> CoverageResult<f64> {
        if received_power_w.is_nan() || received_power_w <= 0.0 {
            return Err(CoverageError::NumericDomainError(format!(
                "received power {} W is not positive",
                received_power_w
            )));
        }
        if self.noise_power_w.is_nan() || self.noise_power_w <= 0.0 {
            return Err(CoverageError::NumericDomainError(format!(
                "noise power {} W is not positive",
                self.noise_power_w
            )));
        }
        Ok(UnitsHelper::linear_to_db(received_power_w / self.noise_power_w))
    }
}
