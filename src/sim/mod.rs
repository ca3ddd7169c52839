pub mod event;
pub mod integrator;
pub mod runner;

pub use integrator::step;
pub use runner::{simulate, simulate_observed, simulate_with, Launch, TrajectoryResult};
