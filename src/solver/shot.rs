use tracing::info;

use super::zero::zero_angle;
use crate::dynamics::state::SimConfig;
use crate::error::Result;
use crate::scenario::{Environment, Projectile, ScopeSettings, Target};
use crate::sim::{simulate_with, Launch, TrajectoryResult};
use crate::units::{mrad_to_rad, rad_to_mrad};

// ---------------------------------------------------------------------------
// Scope adjustment
// ---------------------------------------------------------------------------

/// Dial change needed to move the impact onto the target centre.
/// Positive elevation raises the impact, positive windage moves it left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScopeAdjustment {
    pub elevation_mrad: f64,
    pub windage_mrad: f64,
}

/// Angular correction for an impact offset (`dy`, `dz`) from the aim point
/// at `range`. A zero range needs no correction.
pub fn scope_adjustment(range: f64, dy: f64, dz: f64) -> ScopeAdjustment {
    if range <= 0.0 {
        return ScopeAdjustment::default();
    }
    ScopeAdjustment {
        elevation_mrad: rad_to_mrad((-dz).atan2(range)),
        windage_mrad: rad_to_mrad((-dy).atan2(range)),
    }
}

// ---------------------------------------------------------------------------
// Shot solution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ShotReport {
    /// Bore elevation that zeroes the scope at the configured distance, rad.
    pub zero_angle: f64,
    pub launch: Launch,
    pub trajectory: TrajectoryResult,
    /// Impact minus target centre, lateral (m).
    pub offset_y: f64,
    /// Impact minus target centre, vertical (m).
    pub offset_z: f64,
    pub adjustment: ScopeAdjustment,
    pub hit: bool,
}

/// Fire one shot with the given scope settings and classify the impact.
///
/// The bore is raised to the zero angle for `scope.zero_distance`, plus the
/// mount angle and dialed elevation; dialed windage turns the bore left.
pub fn solve_shot(
    env: &Environment,
    projectile: &Projectile,
    target: &Target,
    scope: &ScopeSettings,
    config: &SimConfig,
) -> Result<ShotReport> {
    target.validate()?;
    scope.validate()?;

    let zero = zero_angle(env, projectile, scope.zero_distance, config)?;
    let launch = Launch {
        elevation: zero + mrad_to_rad(scope.mount_angle_mrad + scope.elevation_mrad),
        azimuth: mrad_to_rad(scope.windage_mrad),
    };

    let trajectory = simulate_with(env, projectile, launch, target.range, config)?;
    let offset_y = trajectory.impact.pos.y();
    let offset_z = trajectory.impact.pos.z() - env.altitude_delta();
    let adjustment = scope_adjustment(target.range, offset_y, offset_z);
    let hit = target.contains(offset_y, offset_z);

    info!(
        range_m = target.range,
        offset_y,
        offset_z,
        elevation_mrad = adjustment.elevation_mrad,
        windage_mrad = adjustment.windage_mrad,
        hit,
        "shot solved"
    );

    Ok(ShotReport {
        zero_angle: zero,
        launch,
        trajectory,
        offset_y,
        offset_z,
        adjustment,
        hit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::presets;
    use crate::vector::Vec3;
    use approx::assert_abs_diff_eq;

    #[test]
    fn tenth_mil_per_centimetre_at_100m() {
        let adj = scope_adjustment(100.0, 0.0, -0.01);
        assert_abs_diff_eq!(adj.elevation_mrad, 0.1, epsilon = 1e-4);
        assert_eq!(adj.windage_mrad, 0.0);
    }

    #[test]
    fn zero_range_needs_no_adjustment() {
        assert_eq!(scope_adjustment(0.0, 0.3, -0.2), ScopeAdjustment::default());
    }

    #[test]
    fn default_shot_hits() {
        let env = Environment::default();
        let report = solve_shot(
            &env,
            &presets::heavy_308(),
            &Target::default(),
            &ScopeSettings { zero_distance: 100.0, ..ScopeSettings::default() },
            &SimConfig::default(),
        )
        .unwrap();
        assert!(report.hit);
        assert_abs_diff_eq!(report.offset_z, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(report.adjustment.elevation_mrad, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn dialing_the_adjustment_centres_the_shot() {
        let env = Environment { wind: Vec3::new(0.0, -8.0, 0.0), ..Environment::default() };
        let p = presets::heavy_308();
        let target = Target { range: 400.0, ..Target::default() };
        let config = SimConfig::default();
        let mut scope = ScopeSettings { zero_distance: 100.0, ..ScopeSettings::default() };

        let first = solve_shot(&env, &p, &target, &scope, &config).unwrap();
        assert!(first.offset_z < 0.0, "bullet drops below a 100 m zero at 400 m");
        assert!(first.offset_y < 0.0, "wind pushes the bullet right");
        assert!(first.adjustment.elevation_mrad > 0.0);
        assert!(first.adjustment.windage_mrad > 0.0);

        scope.elevation_mrad = first.adjustment.elevation_mrad;
        scope.windage_mrad = first.adjustment.windage_mrad;
        let second = solve_shot(&env, &p, &target, &scope, &config).unwrap();
        assert!(second.offset_z.abs() < first.offset_z.abs() / 5.0);
        assert!(second.offset_y.abs() < first.offset_y.abs() / 2.0);
        assert!(second.hit);
    }

    #[test]
    fn target_below_shooter_is_missed_high() {
        let env = Environment { target_altitude: -5.0, ..Environment::default() };
        let report = solve_shot(
            &env,
            &presets::heavy_308(),
            &Target::default(),
            &ScopeSettings { zero_distance: 100.0, ..ScopeSettings::default() },
            &SimConfig::default(),
        )
        .unwrap();
        assert!(!report.hit);
        assert_abs_diff_eq!(report.offset_z, 5.0, epsilon = 1e-3);
        assert!(report.adjustment.elevation_mrad < 0.0);
    }
}
