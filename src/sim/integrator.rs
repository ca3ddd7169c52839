use crate::dynamics::state::{IntegrationScheme, State};
use crate::dynamics::{self, FlightModel};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Fixed-step integration schemes
// ---------------------------------------------------------------------------

/// Advance `state` by `dt` with the chosen scheme.
pub fn step(state: &State, model: &FlightModel, scheme: IntegrationScheme, dt: f64) -> Result<State> {
    match scheme {
        IntegrationScheme::Euler => euler_step(state, model, dt),
        IntegrationScheme::SemiImplicitEuler => semi_implicit_step(state, model, dt),
        IntegrationScheme::RungeKutta4 => rk4_step(state, model, dt),
    }
}

/// Explicit Euler: p ← p + v·dt, then v ← v + a·dt.
pub fn euler_step(state: &State, model: &FlightModel, dt: f64) -> Result<State> {
    let d = dynamics::derivatives(state, model)?;
    Ok(state.apply(&d, dt))
}

/// Symplectic Euler: v ← v + a·dt, then p ← p + v_new·dt.
pub fn semi_implicit_step(state: &State, model: &FlightModel, dt: f64) -> Result<State> {
    let d = dynamics::derivatives(state, model)?;
    let vel = state.vel + d.dvel.scale(dt);
    Ok(State {
        time: state.time + dt,
        pos: state.pos + vel.scale(dt),
        vel,
    })
}

/// Classical 4th-order Runge-Kutta step.
pub fn rk4_step(state: &State, model: &FlightModel, dt: f64) -> Result<State> {
    let k1 = dynamics::derivatives(state, model)?;
    let k2 = dynamics::derivatives(&state.apply(&k1, dt * 0.5), model)?;
    let k3 = dynamics::derivatives(&state.apply(&k2, dt * 0.5), model)?;
    let k4 = dynamics::derivatives(&state.apply(&k3, dt), model)?;

    let w = dt / 6.0;
    Ok(State {
        time: state.time + dt,
        pos: state.pos
            + (k1.dpos + k2.dpos.scale(2.0) + k3.dpos.scale(2.0) + k4.dpos).scale(w),
        vel: state.vel
            + (k1.dvel + k2.dvel.scale(2.0) + k3.dvel.scale(2.0) + k4.dvel).scale(w),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::DensityModel;
    use crate::physics::gravity::G0;
    use crate::scenario::{presets, Environment};
    use approx::assert_abs_diff_eq;

    fn free_fall_after(scheme: IntegrationScheme, steps: usize, dt: f64) -> State {
        let env = Environment::default();
        let p = presets::drag_free(0.0);
        let model = FlightModel::new(&env, &p, DensityModel::Altitude).unwrap();
        let mut s = State::at_muzzle(0.0, 0.0, 0.0);
        for _ in 0..steps {
            s = step(&s, &model, scheme, dt).unwrap();
        }
        s
    }

    #[test]
    fn rk4_is_exact_under_constant_gravity() {
        let s = free_fall_after(IntegrationScheme::RungeKutta4, 100, 0.01);
        assert_abs_diff_eq!(s.pos.z(), -0.5 * G0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.vel.z(), -G0, epsilon = 1e-9);
    }

    #[test]
    fn euler_lags_and_semi_implicit_leads() {
        let exact = -0.5 * G0;
        let e = free_fall_after(IntegrationScheme::Euler, 100, 0.01);
        let si = free_fall_after(IntegrationScheme::SemiImplicitEuler, 100, 0.01);
        // Euler uses the old velocity, so it falls short; symplectic overshoots.
        assert!(e.pos.z() > exact);
        assert!(si.pos.z() < exact);
        assert_abs_diff_eq!(e.pos.z(), exact, epsilon = 0.06);
        assert_abs_diff_eq!(si.pos.z(), exact, epsilon = 0.06);
    }
}
