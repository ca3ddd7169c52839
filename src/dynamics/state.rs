use crate::vector::Vec3;

// ---------------------------------------------------------------------------
// Point-mass state: time, position, velocity
// ---------------------------------------------------------------------------

/// Projectile state at one instant.
/// Frame: origin at the muzzle, x downrange, y left, z up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub time: f64, // s
    pub pos: Vec3, // m
    pub vel: Vec3, // m/s
}

impl State {
    /// Muzzle state for a launch at `speed` along the given elevation/azimuth.
    pub fn at_muzzle(speed: f64, elevation: f64, azimuth: f64) -> State {
        State {
            time: 0.0,
            pos: Vec3::zeros(),
            vel: Vec3::from_length_elevation_azimuth(speed, elevation, azimuth),
        }
    }

    /// Advance state by a derivative scaled by dt (used inside RK4).
    pub fn apply(&self, d: &Deriv, dt: f64) -> State {
        State {
            time: self.time + dt,
            pos: self.pos + d.dpos.scale(dt),
            vel: self.vel + d.dvel.scale(dt),
        }
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    pub fn is_finite(&self) -> bool {
        self.time.is_finite() && self.pos.is_finite() && self.vel.is_finite()
    }
}

// ---------------------------------------------------------------------------
// State derivative (dp/dt, dv/dt)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Deriv {
    pub dpos: Vec3, // velocity
    pub dvel: Vec3, // acceleration
}

// ---------------------------------------------------------------------------
// Simulation configuration
// ---------------------------------------------------------------------------

/// Time-stepping scheme for the trajectory loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrationScheme {
    /// Explicit Euler: position advanced with the old velocity.
    Euler,
    /// Symplectic Euler: position advanced with the updated velocity.
    SemiImplicitEuler,
    #[default]
    RungeKutta4,
}

/// Where air density comes from on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DensityModel {
    /// Recomputed from the projectile's instantaneous altitude.
    #[default]
    Altitude,
    /// Held at the muzzle value for the whole flight.
    Surface,
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub dt: f64,              // integration timestep, s
    pub max_time: f64,        // simulated-time ceiling, s
    pub max_ticks: u64,       // hard tick ceiling
    pub stall_ticks: u64,     // ticks without downrange progress before giving up
    pub sample_interval: f64, // s between recorded samples
    pub scheme: IntegrationScheme,
    pub density: DensityModel,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 1e-4,             // 10 kHz
            max_time: 600.0,
            max_ticks: 20_000_000,
            stall_ticks: 1_000,
            sample_interval: 1.0, // whole seconds
            scheme: IntegrationScheme::default(),
            density: DensityModel::default(),
        }
    }
}

impl SimConfig {
    pub fn with_dt(dt: f64) -> Self {
        Self { dt, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muzzle_state_has_requested_speed() {
        let s = State::at_muzzle(800.0, 0.01, 0.002);
        assert!((s.speed() - 800.0).abs() < 1e-9);
        assert_eq!(s.pos, Vec3::zeros());
        assert_eq!(s.time, 0.0);
    }

    #[test]
    fn apply_advances_time_and_state() {
        let s = State::at_muzzle(100.0, 0.0, 0.0);
        let d = Deriv { dpos: s.vel, dvel: Vec3::new(0.0, 0.0, -10.0) };
        let n = s.apply(&d, 0.5);
        assert_eq!(n.time, 0.5);
        assert_eq!(n.pos, Vec3::new(50.0, 0.0, 0.0));
        assert_eq!(n.vel, Vec3::new(100.0, 0.0, -5.0));
    }
}
