pub mod elevation;
pub mod shot;
pub mod zero;

pub use elevation::{solve_elevation_angle, solve_elevation_angles, ElevationSolution};
pub use shot::{scope_adjustment, solve_shot, ScopeAdjustment, ShotReport};
pub use zero::zero_angle;
