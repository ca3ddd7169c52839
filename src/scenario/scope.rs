use crate::error::{BallisticsError, Result};

// ---------------------------------------------------------------------------
// Scope settings
// ---------------------------------------------------------------------------

/// Optic configuration. Every adjustment is relative to the zeroed scope:
/// dialing +0.1 mrad moves the impact up ~1 cm at 100 m.
#[derive(Debug, Clone, Default)]
pub struct ScopeSettings {
    pub mount_angle_mrad: f64, // canted base, usually 0
    pub zero_distance: f64,    // m, 0 = bore-sighted
    pub elevation_mrad: f64,   // dialed drop correction
    pub windage_mrad: f64,     // dialed wind correction (positive = left)
}

impl ScopeSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.zero_distance >= 0.0 && self.zero_distance.is_finite()) {
            return Err(BallisticsError::invalid(
                "zero distance",
                self.zero_distance,
                "must be non-negative",
            ));
        }
        for (field, v) in [
            ("mount angle", self.mount_angle_mrad),
            ("elevation", self.elevation_mrad),
            ("windage", self.windage_mrad),
        ] {
            if !v.is_finite() {
                return Err(BallisticsError::invalid(field, v, "must be finite"));
            }
        }
        Ok(())
    }
}
