use crate::error::{BallisticsError, Result};

// ---------------------------------------------------------------------------
// Target plate
// ---------------------------------------------------------------------------

/// Rectangular target centred on the aim point.
/// Only used to classify hits; the integrator needs the range alone.
#[derive(Debug, Clone)]
pub struct Target {
    pub range: f64,  // m, along the firing axis
    pub height: f64, // m
    pub width: f64,  // m
}

impl Default for Target {
    fn default() -> Self {
        Self { range: 100.0, height: 0.61, width: 0.4 }
    }
}

impl Target {
    pub fn validate(&self) -> Result<()> {
        if !(self.range >= 0.0 && self.range.is_finite()) {
            return Err(BallisticsError::invalid("range", self.range, "must be non-negative"));
        }
        if !(self.height > 0.0) {
            return Err(BallisticsError::invalid("target height", self.height, "must be positive"));
        }
        if !(self.width > 0.0) {
            return Err(BallisticsError::invalid("target width", self.width, "must be positive"));
        }
        Ok(())
    }

    /// Whether an impact offset from the target centre lands on the plate.
    /// `dy` lateral, `dz` vertical, both in metres.
    pub fn contains(&self, dy: f64, dz: f64) -> bool {
        dy.abs() <= self.width / 2.0 && dz.abs() <= self.height / 2.0
    }
}
