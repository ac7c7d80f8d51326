use crate::math::units::{UnitsHelper, BOLTZMANN};
use crate::prelude::{CoverageError, CoverageResult, Polarization};
use serde::{Deserialize, Serialize};

/// Fixed radar system parameters owned by the link model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarSystemConfig {
    pub transmit_power_w: f64,
    pub frequency_hz: f64,
    /// Nominal antenna reference gain handed to the gain model.
    pub reference_gain_db: f64,
    pub system_loss_db: f64,
    pub noise_temperature_k: f64,
    pub detection_threshold_db: f64,
    /// Receiver bandwidth, used only for the noise power.
    pub bandwidth_hz: f64,
    pub polarization: Polarization,
    pub horizontal_beamwidth_deg: f64,
    pub vertical_beamwidth_deg: f64,
}

impl Default for RadarSystemConfig {
    fn default() -> Self {
        Self {
            transmit_power_w: 1.0e6,
            frequency_hz: 10.0e9,
            reference_gain_db: 30.0,
            system_loss_db: 6.0,
            noise_temperature_k: 290.0,
            detection_threshold_db: 13.0,
            bandwidth_hz: 1.0e6,
            polarization: Polarization::Vertical,
            horizontal_beamwidth_deg: 3.0,
            vertical_beamwidth_deg: 5.0,
        }
    }
}

impl RadarSystemConfig {
    /// Builds a validated config. Polarization and beamwidths take their
    /// defaults.
    pub fn new(
        transmit_power_w: f64,
        frequency_hz: f64,
        reference_gain_db: f64,
        system_loss_db: f64,
        noise_temperature_k: f64,
        detection_threshold_db: f64,
        bandwidth_hz: f64,
    ) -> CoverageResult<Self> {
        let config = Self {
            transmit_power_w,
            frequency_hz,
            reference_gain_db,
            system_loss_db,
            noise_temperature_k,
            detection_threshold_db,
            bandwidth_hz,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoverageResult<()> {
        positive("transmit_power_w", self.transmit_power_w)?;
        positive("frequency_hz", self.frequency_hz)?;
        finite("reference_gain_db", self.reference_gain_db)?;
        finite("system_loss_db", self.system_loss_db)?;
        if self.system_loss_db < 0.0 {
            return Err(CoverageError::InvalidConfig(format!(
                "system_loss_db must be >= 0, got {}",
                self.system_loss_db
            )));
        }
        positive("noise_temperature_k", self.noise_temperature_k)?;
        finite("detection_threshold_db", self.detection_threshold_db)?;
        positive("bandwidth_hz", self.bandwidth_hz)?;
        positive("horizontal_beamwidth_deg", self.horizontal_beamwidth_deg)?;
        positive("vertical_beamwidth_deg", self.vertical_beamwidth_deg)?;
        Ok(())
    }

    /// Thermal noise power `k * T * B` in watts.
    pub fn noise_power_w(&self) -> f64 {
        BOLTZMANN * self.noise_temperature_k * self.bandwidth_hz
    }

    pub fn wavelength_m(&self) -> f64 {
        UnitsHelper::wavelength(self.frequency_hz)
    }

    pub fn loss_linear(&self) -> f64 {
        UnitsHelper::db_to_linear(self.system_loss_db)
    }
}

fn finite(name: &str, value: f64) -> CoverageResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoverageError::InvalidConfig(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

fn positive(name: &str, value: f64) -> CoverageResult<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(CoverageError::InvalidConfig(format!(
            "{} must be > 0, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RadarSystemConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_power_and_negative_loss() {
        let config = RadarSystemConfig {
            transmit_power_w: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoverageError::InvalidConfig(_))
        ));

        let config = RadarSystemConfig {
            system_loss_db: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RadarSystemConfig {
            bandwidth_hz: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn new_validates_fields() {
        let config = RadarSystemConfig::new(1.0e6, 10.0e9, 30.0, 6.0, 290.0, 13.0, 1.0e6).unwrap();
        assert_eq!(config, RadarSystemConfig::default());

        assert!(matches!(
            RadarSystemConfig::new(1.0e6, 0.0, 30.0, 6.0, 290.0, 13.0, 1.0e6),
            Err(CoverageError::InvalidConfig(_))
        ));
        assert!(RadarSystemConfig::new(1.0e6, 10.0e9, 30.0, -0.5, 290.0, 13.0, 1.0e6).is_err());
        assert!(RadarSystemConfig::new(1.0e6, 10.0e9, 30.0, 6.0, -1.0, 13.0, 1.0e6).is_err());
    }

    #[test]
    fn noise_power_at_room_temperature() {
        let noise = RadarSystemConfig::default().noise_power_w();
        assert!((noise - 4.003_880_708e-15).abs() < 1e-24);
    }
}
