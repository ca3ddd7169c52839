pub mod state;

use tracing::trace;

use crate::error::Result;
use crate::physics::{drag, gravity};
use crate::scenario::{Environment, Projectile};
use state::{DensityModel, Deriv, State};

// ---------------------------------------------------------------------------
// Force model
// ---------------------------------------------------------------------------

/// Everything the equations of motion need for one run, resolved up front.
#[derive(Debug, Clone)]
pub struct FlightModel<'a> {
    pub env: &'a Environment,
    pub projectile: &'a Projectile,
    cd: Option<f64>,
    surface_density: Option<f64>,
    density: DensityModel,
}

impl<'a> FlightModel<'a> {
    pub fn new(
        env: &'a Environment,
        projectile: &'a Projectile,
        density: DensityModel,
    ) -> Result<Self> {
        let (cd, surface_density) = if projectile.is_drag_free() {
            (None, None)
        } else {
            (Some(projectile.drag_coefficient()?), Some(env.surface_density()?))
        };
        trace!(?cd, ?surface_density, ?density, "flight model resolved");
        Ok(Self { env, projectile, cd, surface_density, density })
    }

    /// Air density at `height` above the muzzle under the configured model.
    fn density_at(&self, height: f64) -> Result<f64> {
        match (self.density, self.surface_density) {
            (DensityModel::Surface, Some(rho)) => Ok(rho),
            _ => self.env.air_density_at(height),
        }
    }
}

// ---------------------------------------------------------------------------
// Equations of motion (3DOF point mass)
// ---------------------------------------------------------------------------

/// Compute state derivatives for a given state.
///
/// Forces modeled:
///   1. Gravity: uniform, -z
///   2. Drag: quadratic, opposing the wind-relative velocity
pub fn derivatives(state: &State, model: &FlightModel) -> Result<Deriv> {
    let a_gravity = gravity::gravity_accel();

    let a_drag = match model.cd {
        Some(cd) => {
            let rho = model.density_at(state.pos.z())?;
            let rel_vel = state.vel - model.env.wind;
            let f = drag::drag_force_vector(&rel_vel, rho, cd, model.projectile.frontal_area());
            f.checked_div(model.projectile.mass)?
        }
        None => crate::vector::Vec3::zeros(),
    };

    Ok(Deriv {
        dpos: state.vel,
        dvel: a_gravity + a_drag,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::gravity::G0;
    use crate::scenario::presets;
    use crate::vector::Vec3;

    #[test]
    fn drag_free_is_pure_gravity() {
        let env = Environment::default();
        let p = presets::drag_free(900.0);
        let model = FlightModel::new(&env, &p, DensityModel::Altitude).unwrap();
        let s = State::at_muzzle(900.0, 0.1, 0.0);
        let d = derivatives(&s, &model).unwrap();
        assert_eq!(d.dpos, s.vel);
        assert_eq!(d.dvel, Vec3::new(0.0, 0.0, -G0));
    }

    #[test]
    fn drag_decelerates_along_flight() {
        let env = Environment::default();
        let p = presets::heavy_308();
        let model = FlightModel::new(&env, &p, DensityModel::Altitude).unwrap();
        let s = State::at_muzzle(p.muzzle_velocity, 0.0, 0.0);
        let d = derivatives(&s, &model).unwrap();
        assert!(d.dvel.x() < 0.0);
        assert!(d.dvel.z() < -G0 + 1e-9);
    }

    #[test]
    fn tailwind_reduces_drag() {
        let calm = Environment::default();
        let tail = Environment { wind: Vec3::new(10.0, 0.0, 0.0), ..Environment::default() };
        let p = presets::heavy_308();
        let s = State::at_muzzle(p.muzzle_velocity, 0.0, 0.0);
        let d_calm = derivatives(&s, &FlightModel::new(&calm, &p, DensityModel::Altitude).unwrap()).unwrap();
        let d_tail = derivatives(&s, &FlightModel::new(&tail, &p, DensityModel::Altitude).unwrap()).unwrap();
        assert!(d_tail.dvel.x().abs() < d_calm.dvel.x().abs());
    }

    #[test]
    fn surface_model_ignores_height() {
        let env = Environment::default();
        let p = presets::heavy_308();
        let model = FlightModel::new(&env, &p, DensityModel::Surface).unwrap();
        let low = State::at_muzzle(800.0, 0.0, 0.0);
        let high = State { pos: Vec3::new(0.0, 0.0, 3000.0), ..low };
        let d_low = derivatives(&low, &model).unwrap();
        let d_high = derivatives(&high, &model).unwrap();
        assert_eq!(d_low.dvel, d_high.dvel);

        let per_tick = FlightModel::new(&env, &p, DensityModel::Altitude).unwrap();
        let d_thin = derivatives(&high, &per_tick).unwrap();
        assert!(d_thin.dvel.x().abs() < d_low.dvel.x().abs());
    }

    #[test]
    fn humid_drag_shot_has_density_in_the_upper_stratosphere() {
        let env = Environment::default();
        let p = Projectile { ballistic_coefficient: 50.0, ..presets::heavy_308() };
        let model = FlightModel::new(&env, &p, DensityModel::Altitude).unwrap();
        let s = State {
            pos: Vec3::new(2_500.0, 0.0, 35_000.0),
            ..State::at_muzzle(1500.0, 1.5, 0.0)
        };
        let d = derivatives(&s, &model).unwrap();
        assert!(d.dvel.is_finite());
        assert!(d.dvel.z() < -G0);
    }
}
