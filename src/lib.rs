pub mod config;
pub mod dynamics;
pub mod error;
pub mod io;
pub mod physics;
pub mod scenario;
pub mod sim;
pub mod solver;
pub mod units;
pub mod vector;

// Flat re-exports of the core entry points
pub use error::{BallisticsError, Result, UnreachableReason};
pub use physics::atmosphere::{air_density, pressure_at_altitude};
pub use sim::{simulate, simulate_with, Launch, TrajectoryResult};
pub use solver::{solve_elevation_angle, solve_shot, zero_angle};
pub use vector::Vec3;

pub mod types {
    pub use crate::dynamics::state::{DensityModel, IntegrationScheme, SimConfig, State};
    pub use crate::physics::gravity::G0;
    pub use crate::scenario::{Environment, Projectile, ScopeSettings, Target};
}
