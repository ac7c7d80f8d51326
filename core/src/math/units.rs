//! Physical constants and dB/linear conversions.

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e8;

/// Boltzmann constant (J/K).
pub const BOLTZMANN: f64 = 1.380_648_52e-23;

pub struct UnitsHelper;

impl UnitsHelper {
    pub fn db_to_linear(db: f64) -> f64 {
        10.0_f64.powf(db / 10.0)
    }

    /// Non-positive input yields `-inf` or NaN; callers guard the domain.
    pub fn linear_to_db(linear: f64) -> f64 {
        10.0 * linear.log10()
    }

    pub fn watts_to_dbm(watts: f64) -> f64 {
        Self::linear_to_db(watts * 1000.0)
    }

    pub fn wavelength(frequency_hz: f64) -> f64 {
        SPEED_OF_LIGHT / frequency_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_round_trip_within_tolerance() {
        let mut x = -50.0;
        while x <= 50.0 {
            let back = UnitsHelper::linear_to_db(UnitsHelper::db_to_linear(x));
            assert!((back - x).abs() < 1e-9, "x={} back={}", x, back);
            x += 0.25;
        }
    }

    #[test]
    fn known_conversions() {
        assert!((UnitsHelper::db_to_linear(30.0) - 1000.0).abs() < 1e-9);
        assert!((UnitsHelper::db_to_linear(-10.0) - 0.1).abs() < 1e-15);
        assert!((UnitsHelper::watts_to_dbm(1.0) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn wavelength_at_x_band() {
        assert!((UnitsHelper::wavelength(10.0e9) - 0.029_979_245_8).abs() < 1e-15);
    }

    #[test]
    fn zero_power_maps_to_negative_infinity() {
        assert_eq!(UnitsHelper::linear_to_db(0.0), f64::NEG_INFINITY);
    }
}
