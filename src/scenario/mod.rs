pub mod environment;
pub mod projectile;
pub mod scope;
pub mod target;

pub use environment::Environment;
pub use projectile::{presets, Projectile, ProjectileBuilder, NEGLIGIBLE_DRAG_BC};
pub use scope::ScopeSettings;
pub use target::Target;
