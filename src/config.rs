use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dynamics::state::{DensityModel, IntegrationScheme, SimConfig};
use crate::error::{BallisticsError, Result};
use crate::scenario::{Environment, Projectile, ScopeSettings, Target};
use crate::units;
use crate::vector::Vec3;

// ---------------------------------------------------------------------------
// User-facing shot configuration
// ---------------------------------------------------------------------------

/// Shot parameters in the units a shooter types (grains, inches, °C, mrad,
/// G1 lb/in²), converted to the SI core types on demand. Every field has a
/// default, so a JSON file only needs the values that differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShotConfig {
    // Geometry
    pub distance_m: f64,
    pub altitude_shooter_m: f64,
    pub altitude_target_m: f64,
    pub target_height_m: f64,
    pub target_width_m: f64,

    // Scope
    pub angle_mrad: f64,
    pub scope_mount_angle_mrad: f64,
    pub zero_distance_m: f64,
    pub wind_correction_mrad: f64,

    // Bullet
    pub bullet_name: String,
    pub bullet_mass_grains: f64,
    pub bullet_diameter_in: f64,
    pub muzzle_velocity_ms: f64,
    pub ballistic_coefficient: f64,

    // Weather
    pub humidity: f64,
    pub temperature_c: f64,
    pub wind_x_ms: f64,
    pub wind_y_ms: f64,
    pub wind_z_ms: f64,

    // Integrator
    pub time_step_s: f64,
    pub max_time_s: f64,
    pub sample_interval_s: f64,
    pub scheme: SchemeName,
    pub density_model: DensityName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SchemeName {
    Euler,
    SemiImplicitEuler,
    #[default]
    Rk4,
}

impl From<SchemeName> for IntegrationScheme {
    fn from(s: SchemeName) -> Self {
        match s {
            SchemeName::Euler => IntegrationScheme::Euler,
            SchemeName::SemiImplicitEuler => IntegrationScheme::SemiImplicitEuler,
            SchemeName::Rk4 => IntegrationScheme::RungeKutta4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DensityName {
    #[default]
    Altitude,
    Surface,
}

impl From<DensityName> for DensityModel {
    fn from(d: DensityName) -> Self {
        match d {
            DensityName::Altitude => DensityModel::Altitude,
            DensityName::Surface => DensityModel::Surface,
        }
    }
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            distance_m: 100.0,
            altitude_shooter_m: 0.0,
            altitude_target_m: 0.0,
            target_height_m: 0.61,
            target_width_m: 0.4,

            angle_mrad: 0.0,
            scope_mount_angle_mrad: 0.0,
            zero_distance_m: 0.0,
            wind_correction_mrad: 0.0,

            bullet_name: ".308 200gr".into(),
            bullet_mass_grains: 200.0,
            bullet_diameter_in: 0.308,
            muzzle_velocity_ms: 1005.0,
            ballistic_coefficient: 0.3,

            humidity: 0.25,
            temperature_c: 30.0,
            wind_x_ms: 0.0,
            wind_y_ms: 0.0,
            wind_z_ms: 0.0,

            time_step_s: 1e-4,
            max_time_s: 600.0,
            sample_interval_s: 1.0,
            scheme: SchemeName::default(),
            density_model: DensityName::default(),
        }
    }
}

impl ShotConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field and the derived core types.
    pub fn validate(&self) -> Result<()> {
        self.environment().validate()?;
        self.projectile().validate()?;
        self.target().validate()?;
        self.scope().validate()?;
        let sim = self.sim_config();
        if !(sim.dt > 0.0 && sim.dt.is_finite()) {
            return Err(BallisticsError::invalid("time step", sim.dt, "must be positive"));
        }
        if !(sim.max_time > 0.0) {
            return Err(BallisticsError::invalid("max time", sim.max_time, "must be positive"));
        }
        if !(sim.sample_interval > 0.0) {
            return Err(BallisticsError::invalid(
                "sample interval",
                sim.sample_interval,
                "must be positive",
            ));
        }
        Ok(())
    }

    pub fn environment(&self) -> Environment {
        Environment {
            humidity: self.humidity,
            temperature: self.temperature_c,
            shooter_altitude: self.altitude_shooter_m,
            target_altitude: self.altitude_target_m,
            wind: Vec3::new(self.wind_x_ms, self.wind_y_ms, self.wind_z_ms),
        }
    }

    pub fn projectile(&self) -> Projectile {
        Projectile {
            name: self.bullet_name.clone(),
            mass: units::grains_to_kg(self.bullet_mass_grains),
            ballistic_coefficient: self.ballistic_coefficient,
            diameter: units::inches_to_m(self.bullet_diameter_in),
            muzzle_velocity: self.muzzle_velocity_ms,
        }
    }

    pub fn target(&self) -> Target {
        Target {
            range: self.distance_m,
            height: self.target_height_m,
            width: self.target_width_m,
        }
    }

    pub fn scope(&self) -> ScopeSettings {
        ScopeSettings {
            mount_angle_mrad: self.scope_mount_angle_mrad,
            zero_distance: self.zero_distance_m,
            elevation_mrad: self.angle_mrad,
            windage_mrad: self.wind_correction_mrad,
        }
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            dt: self.time_step_s,
            max_time: self.max_time_s,
            sample_interval: self.sample_interval_s,
            scheme: self.scheme.into(),
            density: self.density_model.into(),
            ..SimConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_match_documented_shot() {
        let c = ShotConfig::default();
        assert_eq!(c.distance_m, 100.0);
        assert_eq!(c.angle_mrad, 0.0);
        assert_eq!((c.target_height_m, c.target_width_m), (0.61, 0.4));
        assert_relative_eq!(c.projectile().mass, 0.012_959_782, max_relative = 1e-9);
        assert_eq!(c.projectile().muzzle_velocity, 1005.0);
        assert_eq!(c.ballistic_coefficient, 0.3);
        assert_eq!(c.environment().humidity, 0.25);
        assert_eq!(c.environment().temperature, 30.0);
        assert_eq!(c.environment().shooter_altitude, 0.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_takes_defaults() {
        let c = ShotConfig::from_json_str(r#"{ "distance_m": 600, "wind_y_ms": -3.5 }"#).unwrap();
        assert_eq!(c.distance_m, 600.0);
        assert_eq!(c.environment().wind, Vec3::new(0.0, -3.5, 0.0));
        assert_eq!(c.muzzle_velocity_ms, 1005.0);
    }

    #[test]
    fn json_round_trip() {
        let c = ShotConfig {
            zero_distance_m: 200.0,
            scheme: SchemeName::SemiImplicitEuler,
            density_model: DensityName::Surface,
            ..ShotConfig::default()
        };
        let back = ShotConfig::from_json_str(&c.to_json_string().unwrap()).unwrap();
        assert_eq!(back, c);
        assert_eq!(back.sim_config().scheme, IntegrationScheme::SemiImplicitEuler);
        assert_eq!(back.sim_config().density, DensityModel::Surface);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let r = ShotConfig::from_json_str(r#"{ "distanse_m": 600 }"#);
        assert!(matches!(r, Err(BallisticsError::Json(_))));
    }

    #[test]
    fn validation_catches_bad_values() {
        let c = ShotConfig { time_step_s: 0.0, ..ShotConfig::default() };
        assert!(c.validate().is_err());
        let c = ShotConfig { bullet_mass_grains: -1.0, ..ShotConfig::default() };
        assert!(c.validate().is_err());
        let c = ShotConfig { humidity: 2.0, ..ShotConfig::default() };
        assert!(c.validate().is_err());
    }
}
