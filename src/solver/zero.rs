use tracing::debug;

use super::elevation::solve_elevation_angles;
use crate::dynamics::state::SimConfig;
use crate::error::{BallisticsError, Result};
use crate::scenario::{Environment, Projectile};
use crate::sim::{simulate_with, Launch};

const ANGLE_TOLERANCE: f64 = 1e-9; // rad
const MAX_ITERATIONS: usize = 60;
const MAX_ZERO_ANGLE: f64 = std::f64::consts::FRAC_PI_4;

/// Height of the trajectory (relative to the bore line origin) at `distance`.
fn height_at(
    env: &Environment,
    projectile: &Projectile,
    elevation: f64,
    distance: f64,
    config: &SimConfig,
) -> Result<f64> {
    let r = simulate_with(env, projectile, Launch::elevation(elevation), distance, config)?;
    Ok(r.impact.pos.z())
}

/// Bore elevation (rad) that brings the bullet back to line of sight at
/// `zero_distance`, including drag.
///
/// Seeded with the flat drag-free root, then bisected on the simulated height
/// at the zero distance. The flat arc is always chosen.
pub fn zero_angle(
    env: &Environment,
    projectile: &Projectile,
    zero_distance: f64,
    config: &SimConfig,
) -> Result<f64> {
    if !(zero_distance >= 0.0 && zero_distance.is_finite()) {
        return Err(BallisticsError::invalid(
            "zero distance",
            zero_distance,
            "must be non-negative",
        ));
    }
    if zero_distance == 0.0 {
        return Ok(0.0);
    }

    let no_solution = || BallisticsError::NoElevationSolution {
        range_m: zero_distance,
        altitude_delta_m: 0.0,
        muzzle_speed: projectile.muzzle_velocity,
    };

    let seed = solve_elevation_angles(zero_distance, 0.0, projectile.muzzle_velocity)?.flat();

    let mut lo = 0.0_f64;
    if height_at(env, projectile, lo, zero_distance, config)? >= 0.0 {
        return Ok(lo);
    }

    // Drag only adds drop, so the drag-free seed is a lower bound.
    let mut hi = (seed * 2.0).max(seed + 1e-3).min(MAX_ZERO_ANGLE);
    loop {
        if height_at(env, projectile, hi, zero_distance, config)? >= 0.0 {
            break;
        }
        if hi >= MAX_ZERO_ANGLE {
            return Err(no_solution());
        }
        lo = hi;
        hi = (hi * 2.0).min(MAX_ZERO_ANGLE);
    }

    let mut iterations = 0;
    while hi - lo > ANGLE_TOLERANCE && iterations < MAX_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if height_at(env, projectile, mid, zero_distance, config)? < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
        iterations += 1;
    }

    let angle = 0.5 * (lo + hi);
    debug!(zero_distance, seed_rad = seed, angle_rad = angle, iterations, "zero solved");
    Ok(angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::presets;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bore_sighted_zero_is_zero() {
        let env = Environment::default();
        let a = zero_angle(&env, &presets::heavy_308(), 0.0, &SimConfig::default()).unwrap();
        assert_eq!(a, 0.0);
    }

    #[test]
    fn zeroed_trajectory_crosses_line_of_sight() {
        let env = Environment::default();
        let p = presets::heavy_308();
        let config = SimConfig::default();
        let a = zero_angle(&env, &p, 200.0, &config).unwrap();
        let h = height_at(&env, &p, a, 200.0, &config).unwrap();
        assert_abs_diff_eq!(h, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn drag_needs_more_elevation_than_vacuum() {
        let env = Environment::default();
        let p = presets::heavy_308();
        let config = SimConfig::default();
        let with_drag = zero_angle(&env, &p, 300.0, &config).unwrap();
        let vacuum = solve_elevation_angles(300.0, 0.0, p.muzzle_velocity).unwrap().flat();
        assert!(with_drag > vacuum);
    }

    #[test]
    fn drag_free_matches_analytic_flat_root() {
        let env = Environment::default();
        let p = presets::drag_free(800.0);
        let config = SimConfig::default();
        let a = zero_angle(&env, &p, 400.0, &config).unwrap();
        let analytic = solve_elevation_angles(400.0, 0.0, 800.0).unwrap().flat();
        assert_abs_diff_eq!(a, analytic, epsilon = 1e-7);
    }

    #[test]
    fn out_of_reach_zero_fails() {
        let env = Environment::default();
        let p = presets::drag_free(50.0);
        let r = zero_angle(&env, &p, 10_000.0, &SimConfig::default());
        assert!(matches!(r, Err(BallisticsError::NoElevationSolution { .. })));
    }
}
