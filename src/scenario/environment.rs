use crate::error::{BallisticsError, Result};
use crate::physics::atmosphere;
use crate::vector::Vec3;

// ---------------------------------------------------------------------------
// Firing environment: weather, site altitudes, wind
// ---------------------------------------------------------------------------

/// Weather and site geometry for one shot.
///
/// Density and pressure are derived on every call, never cached, so a
/// change in altitude or weather is always reflected.
#[derive(Debug, Clone)]
pub struct Environment {
    pub humidity: f64,         // relative, 0.0..=1.0
    pub temperature: f64,      // °C
    pub shooter_altitude: f64, // m above sea level
    pub target_altitude: f64,  // m above sea level (target centre)
    pub wind: Vec3,            // m/s, same frame as the trajectory
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            humidity: 0.25,
            temperature: 30.0,
            shooter_altitude: 0.0,
            target_altitude: 0.0,
            wind: Vec3::zeros(),
        }
    }
}

impl Environment {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.humidity) {
            return Err(BallisticsError::invalid(
                "humidity",
                self.humidity,
                "must be within [0, 1]",
            ));
        }
        if !self.temperature.is_finite() || self.temperature <= -273.15 {
            return Err(BallisticsError::invalid(
                "temperature",
                self.temperature,
                "must be above absolute zero",
            ));
        }
        if !self.wind.is_finite() {
            return Err(BallisticsError::Config("wind must be finite".into()));
        }
        // Surface pressure must exist at both ends of the shot.
        atmosphere::pressure_at_altitude(self.shooter_altitude)?;
        atmosphere::pressure_at_altitude(self.target_altitude)?;
        Ok(())
    }

    /// Target centre height relative to the muzzle, m.
    pub fn altitude_delta(&self) -> f64 {
        self.target_altitude - self.shooter_altitude
    }

    /// Absolute pressure (Pa) at `height` metres above the muzzle.
    pub fn pressure_at(&self, height: f64) -> Result<f64> {
        Ok(atmosphere::pressure_at_altitude(self.shooter_altitude + height)? * 1000.0)
    }

    /// Air density (kg/m^3) at `height` metres above the muzzle.
    ///
    /// Temperature is constant along the flight. The water vapour keeps its
    /// muzzle share of the total pressure, so the vapour partial pressure
    /// falls with altitude and never exceeds the total.
    pub fn air_density_at(&self, height: f64) -> Result<f64> {
        let surface = self.pressure_at(0.0)?;
        if height == 0.0 {
            return atmosphere::air_density(self.humidity, self.temperature, surface);
        }
        let vapor_share =
            self.humidity * atmosphere::saturation_vapor_pressure(self.temperature) / surface;
        let pressure = self.pressure_at(height)?;
        atmosphere::humid_air_density(pressure, vapor_share * pressure, self.temperature)
    }

    /// Air density at the muzzle.
    pub fn surface_density(&self) -> Result<f64> {
        self.air_density_at(0.0)
    }

    pub fn speed_of_sound(&self) -> f64 {
        atmosphere::speed_of_sound(self.temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_surface_density() {
        let env = Environment::default();
        assert_abs_diff_eq!(env.surface_density().unwrap(), 1.160, epsilon = 2e-3);
    }

    #[test]
    fn density_falls_with_height() {
        let env = Environment::default();
        let low = env.air_density_at(0.0).unwrap();
        let high = env.air_density_at(2000.0).unwrap();
        assert!(high < low);
    }

    #[test]
    fn humid_air_has_density_up_to_the_barometric_limit() {
        let env = Environment { humidity: 1.0, temperature: 35.0, ..Environment::default() };
        let mut prev = env.surface_density().unwrap();
        for h in [10_000.0, 31_000.0, 35_000.0, 40_000.0, 44_000.0] {
            let rho = env.air_density_at(h).unwrap();
            assert!(rho > 0.0 && rho < prev, "density at {} m", h);
            prev = rho;
        }
        assert!(matches!(
            env.air_density_at(45_000.0),
            Err(BallisticsError::AltitudeOutOfRange { .. })
        ));
    }

    #[test]
    fn altitude_is_recomputed_not_cached() {
        let mut env = Environment::default();
        let sea = env.surface_density().unwrap();
        env.shooter_altitude = 1500.0;
        let mountain = env.surface_density().unwrap();
        assert!(mountain < sea);
    }

    #[test]
    fn altitude_delta_is_signed() {
        let env = Environment {
            shooter_altitude: 300.0,
            target_altitude: 250.0,
            ..Environment::default()
        };
        assert_eq!(env.altitude_delta(), -50.0);
    }

    #[test]
    fn validation() {
        assert!(Environment::default().validate().is_ok());
        let wet = Environment { humidity: 1.2, ..Environment::default() };
        assert!(wet.validate().is_err());
        let space = Environment { shooter_altitude: 50_000.0, ..Environment::default() };
        assert!(matches!(
            space.validate(),
            Err(BallisticsError::AltitudeOutOfRange { .. })
        ));
    }
}
