use crate::error::{BallisticsError, Result};
use crate::physics::gravity::G0;

// ---------------------------------------------------------------------------
// Drag-free launch angle (closed form)
// ---------------------------------------------------------------------------

/// Both launch angles that put a vacuum trajectory through the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationSolution {
    /// θ₊ = atan((v² + √D) / (g·R)): the lobbed arc.
    pub high: f64,
    /// θ₋ = atan((v² − √D) / (g·R)): the flat arc.
    pub low: f64,
}

impl ElevationSolution {
    /// θ₊ unless it is NaN, then θ₋.
    pub fn preferred(&self) -> f64 {
        if self.high.is_nan() {
            self.low
        } else {
            self.high
        }
    }

    pub fn flat(&self) -> f64 {
        self.low
    }
}

/// Solve `z(R) = altitude_delta` for a drag-free projectile.
///
/// `D = v⁴ − g·(g·R² + 2·Δh·v²)`; a negative discriminant means the target is
/// out of reach at this speed. `R = 0` yields 0 for both roots.
pub fn solve_elevation_angles(
    range: f64,
    altitude_delta: f64,
    muzzle_speed: f64,
) -> Result<ElevationSolution> {
    if !(range >= 0.0 && range.is_finite()) {
        return Err(BallisticsError::invalid("range", range, "must be non-negative"));
    }
    if !altitude_delta.is_finite() {
        return Err(BallisticsError::invalid(
            "altitude difference",
            altitude_delta,
            "must be finite",
        ));
    }
    if !(muzzle_speed >= 0.0 && muzzle_speed.is_finite()) {
        return Err(BallisticsError::invalid(
            "muzzle speed",
            muzzle_speed,
            "must be non-negative",
        ));
    }
    if range == 0.0 {
        return Ok(ElevationSolution { high: 0.0, low: 0.0 });
    }

    let v2 = muzzle_speed * muzzle_speed;
    let v4 = v2 * v2;
    let disc = v4 - G0 * (G0 * range * range + 2.0 * altitude_delta * v2);
    if disc < 0.0 {
        return Err(BallisticsError::NoElevationSolution {
            range_m: range,
            altitude_delta_m: altitude_delta,
            muzzle_speed,
        });
    }

    let root = disc.sqrt();
    let denom = G0 * range;
    Ok(ElevationSolution {
        high: ((v2 + root) / denom).atan(),
        low: ((v2 - root) / denom).atan(),
    })
}

/// Launch angle (rad) reaching `range` at `altitude_delta`, preferring θ₊.
pub fn solve_elevation_angle(range: f64, altitude_delta: f64, muzzle_speed: f64) -> Result<f64> {
    Ok(solve_elevation_angles(range, altitude_delta, muzzle_speed)?.preferred())
}
