use std::f64::consts::PI;

use crate::error::{BallisticsError, Result};
use crate::physics::drag;
use crate::units;

/// A ballistic coefficient of exactly this value marks a drag-free projectile.
pub const NEGLIGIBLE_DRAG_BC: f64 = 1.0;

// ---------------------------------------------------------------------------
// Projectile definition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Projectile {
    pub name: String,
    pub mass: f64,                  // kg
    pub ballistic_coefficient: f64, // G1, lb/in^2 (1.0 = negligible drag)
    pub diameter: f64,              // m
    pub muzzle_velocity: f64,       // m/s
}

impl Projectile {
    /// Reject non-physical parameters before any simulation starts.
    pub fn validate(&self) -> Result<()> {
        if !(self.mass > 0.0 && self.mass.is_finite()) {
            return Err(BallisticsError::invalid("mass", self.mass, "must be positive"));
        }
        if !(self.ballistic_coefficient > 0.0 && self.ballistic_coefficient.is_finite()) {
            return Err(BallisticsError::invalid(
                "ballistic coefficient",
                self.ballistic_coefficient,
                "must be positive",
            ));
        }
        if !(self.diameter > 0.0 && self.diameter.is_finite()) {
            return Err(BallisticsError::invalid("diameter", self.diameter, "must be positive"));
        }
        if !(self.muzzle_velocity >= 0.0 && self.muzzle_velocity.is_finite()) {
            return Err(BallisticsError::invalid(
                "muzzle velocity",
                self.muzzle_velocity,
                "must be non-negative",
            ));
        }
        Ok(())
    }

    /// Cross-sectional area presented to the airflow, m^2.
    pub fn frontal_area(&self) -> f64 {
        PI * self.diameter * self.diameter / 4.0
    }

    /// Ballistic coefficient in kg/m^2.
    pub fn ballistic_coefficient_si(&self) -> f64 {
        units::bc_to_si(self.ballistic_coefficient)
    }

    pub fn is_drag_free(&self) -> bool {
        self.ballistic_coefficient == NEGLIGIBLE_DRAG_BC
    }

    pub fn drag_coefficient(&self) -> Result<f64> {
        drag::drag_coefficient(self.ballistic_coefficient_si(), self.mass, self.frontal_area())
    }
}

// ---------------------------------------------------------------------------
// Projectile builder
// ---------------------------------------------------------------------------

pub struct ProjectileBuilder {
    name: String,
    mass: f64,
    ballistic_coefficient: f64,
    diameter: f64,
    muzzle_velocity: f64,
}

impl ProjectileBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mass: units::grains_to_kg(200.0),
            ballistic_coefficient: 0.3,
            diameter: units::inches_to_m(0.308),
            muzzle_velocity: 1005.0,
        }
    }

    pub fn mass(mut self, v: f64) -> Self { self.mass = v; self }
    pub fn mass_grains(mut self, v: f64) -> Self { self.mass = units::grains_to_kg(v); self }
    pub fn ballistic_coefficient(mut self, v: f64) -> Self { self.ballistic_coefficient = v; self }
    pub fn diameter(mut self, v: f64) -> Self { self.diameter = v; self }
    pub fn muzzle_velocity(mut self, v: f64) -> Self { self.muzzle_velocity = v; self }

    pub fn build(self) -> Result<Projectile> {
        let p = Projectile {
            name: self.name,
            mass: self.mass,
            ballistic_coefficient: self.ballistic_coefficient,
            diameter: self.diameter,
            muzzle_velocity: self.muzzle_velocity,
        };
        p.validate()?;
        Ok(p)
    }
}

// ---------------------------------------------------------------------------
// Preset projectiles
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// 200 gr .308 at 1005 m/s, G1 BC 0.3.
    pub fn heavy_308() -> Projectile {
        Projectile {
            name: ".308 200gr".into(),
            mass: units::grains_to_kg(200.0),
            ballistic_coefficient: 0.3,
            diameter: units::inches_to_m(0.308),
            muzzle_velocity: 1005.0,
        }
    }

    /// Vacuum reference round: same geometry, no aerodynamic drag.
    pub fn drag_free(muzzle_velocity: f64) -> Projectile {
        Projectile {
            name: "drag-free".into(),
            ballistic_coefficient: NEGLIGIBLE_DRAG_BC,
            muzzle_velocity,
            ..heavy_308()
        }
    }
}
