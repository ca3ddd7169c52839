use tracing::{debug, trace, warn};

use super::event::{ApexDetector, EventDetector, EventKind, SimEvent, TransonicDetector};
use super::integrator;
use crate::dynamics::state::{SimConfig, State};
use crate::dynamics::FlightModel;
use crate::error::{BallisticsError, Result, UnreachableReason};
use crate::scenario::{Environment, Projectile};

// ---------------------------------------------------------------------------
// Launch geometry and results
// ---------------------------------------------------------------------------

/// Bore direction at the muzzle, radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Launch {
    pub elevation: f64, // above horizontal
    pub azimuth: f64,   // from +x toward +y (left)
}

impl Launch {
    pub fn elevation(elevation: f64) -> Self {
        Self { elevation, azimuth: 0.0 }
    }
}

/// Outcome of a run that reached the target plane.
#[derive(Debug, Clone)]
pub struct TrajectoryResult {
    /// First integrated state at or past the target plane.
    pub final_state: State,
    /// State linearly interpolated onto the plane `x = range`.
    pub impact: State,
    pub max_altitude: f64,
    pub ticks: u64,
    pub events: Vec<SimEvent>,
    /// States recorded every `sample_interval`, plus launch and terminal.
    pub samples: Vec<State>,
}

impl TrajectoryResult {
    pub fn elapsed(&self) -> f64 {
        self.final_state.time
    }

    pub fn event(&self, kind: &EventKind) -> Option<&SimEvent> {
        self.events.iter().find(|e| &e.kind == kind)
    }
}

// ---------------------------------------------------------------------------
// Simulation loop
// ---------------------------------------------------------------------------

fn validate(target_range: f64, config: &SimConfig) -> Result<()> {
    if !(config.dt > 0.0 && config.dt.is_finite()) {
        return Err(BallisticsError::invalid("time step", config.dt, "must be positive"));
    }
    if !(target_range >= 0.0 && target_range.is_finite()) {
        return Err(BallisticsError::invalid("target range", target_range, "must be non-negative"));
    }
    if !(config.max_time > 0.0) {
        return Err(BallisticsError::invalid("max time", config.max_time, "must be positive"));
    }
    if !(config.sample_interval > 0.0) {
        return Err(BallisticsError::invalid(
            "sample interval",
            config.sample_interval,
            "must be positive",
        ));
    }
    if config.stall_ticks == 0 {
        return Err(BallisticsError::Config("stall_ticks must be at least 1".into()));
    }
    Ok(())
}

fn lerp(a: &State, b: &State, t: f64) -> State {
    State {
        time: a.time + (b.time - a.time) * t,
        pos: a.pos + (b.pos - a.pos).scale(t),
        vel: a.vel + (b.vel - a.vel).scale(t),
    }
}

/// Run until the projectile reaches `target_range` downrange.
///
/// `detectors` observe every tick in addition to the built-in apex and
/// transonic detectors.
pub fn simulate_observed(
    env: &Environment,
    projectile: &Projectile,
    launch: Launch,
    target_range: f64,
    config: &SimConfig,
    detectors: &mut [Box<dyn EventDetector>],
) -> Result<TrajectoryResult> {
    validate(target_range, config)?;
    env.validate()?;
    projectile.validate()?;
    let model = FlightModel::new(env, projectile, config.density)?;

    let mut state = State::at_muzzle(projectile.muzzle_velocity, launch.elevation, launch.azimuth);
    debug!(
        projectile = %projectile.name,
        elevation_rad = launch.elevation,
        azimuth_rad = launch.azimuth,
        target_range,
        dt = config.dt,
        scheme = ?config.scheme,
        "simulation start"
    );

    let mut builtin: [Box<dyn EventDetector>; 2] = [
        Box::new(ApexDetector),
        Box::new(TransonicDetector::new(env.speed_of_sound(), env.wind)),
    ];

    let mut events = vec![SimEvent::at(EventKind::Launch, &state)];
    let mut samples = vec![state];
    let mut next_sample = config.sample_interval;
    let mut max_altitude = 0.0_f64;
    let mut ticks: u64 = 0;
    let mut stalled: u64 = 0;

    if state.pos.x() >= target_range {
        events.push(SimEvent::at(EventKind::TargetPlane, &state));
        return Ok(TrajectoryResult {
            final_state: state,
            impact: state,
            max_altitude,
            ticks,
            events,
            samples,
        });
    }

    let give_up = |reason: UnreachableReason, ticks: u64, s: &State| {
        warn!(%reason, ticks, time_s = s.time, downrange_m = s.pos.x(), "target unreachable");
        BallisticsError::Unreachable {
            reason,
            ticks,
            time_s: s.time,
            downrange_m: s.pos.x(),
        }
    };

    loop {
        if ticks >= config.max_ticks {
            return Err(give_up(UnreachableReason::TickBudgetExhausted, ticks, &state));
        }

        let prev = state;
        state = integrator::step(&prev, &model, config.scheme, config.dt)?;
        ticks += 1;
        // Logical clock: no accumulated rounding from repeated `+= dt`.
        state.time = ticks as f64 * config.dt;

        if !state.is_finite() {
            return Err(give_up(UnreachableReason::NonFinite, ticks, &prev));
        }

        max_altitude = max_altitude.max(state.pos.z());

        for det in builtin.iter_mut().chain(detectors.iter_mut()) {
            if let Some(kind) = det.check(&prev, &state) {
                trace!(?kind, time = state.time, "event");
                events.push(SimEvent::at(kind, &state));
            }
        }

        if state.pos.x() >= target_range {
            let t = (target_range - prev.pos.x()) / (state.pos.x() - prev.pos.x());
            let impact = lerp(&prev, &state, t);
            events.push(SimEvent::at(EventKind::TargetPlane, &impact));
            samples.push(state);
            debug!(
                ticks,
                time_s = state.time,
                impact_z = impact.pos.z(),
                impact_y = impact.pos.y(),
                max_altitude,
                "target plane reached"
            );
            return Ok(TrajectoryResult {
                final_state: state,
                impact,
                max_altitude,
                ticks,
                events,
                samples,
            });
        }

        if state.time >= next_sample {
            samples.push(state);
            next_sample += config.sample_interval;
        }

        if state.pos.x() > prev.pos.x() {
            stalled = 0;
        } else {
            stalled += 1;
            if stalled >= config.stall_ticks {
                return Err(give_up(UnreachableReason::Stalled, ticks, &state));
            }
        }

        if state.time >= config.max_time {
            return Err(give_up(UnreachableReason::TimeBudgetExhausted, ticks, &state));
        }
    }
}

/// Run with a fully specified launch and configuration.
pub fn simulate_with(
    env: &Environment,
    projectile: &Projectile,
    launch: Launch,
    target_range: f64,
    config: &SimConfig,
) -> Result<TrajectoryResult> {
    simulate_observed(env, projectile, launch, target_range, config, &mut [])
}

/// Run in the vertical firing plane with default settings and the given step.
pub fn simulate(
    env: &Environment,
    projectile: &Projectile,
    launch_angle: f64,
    target_range: f64,
    time_step: f64,
) -> Result<TrajectoryResult> {
    simulate_with(
        env,
        projectile,
        Launch::elevation(launch_angle),
        target_range,
        &SimConfig::with_dt(time_step),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
