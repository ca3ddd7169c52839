use crate::vector::Vec3;

pub const G0: f64 = 9.80665; // standard gravity, m/s^2

/// Uniform gravity acceleration (z up).
///
/// Bullet flights stay within a few kilometres of the muzzle, so the
/// inverse-square falloff is below the integrator's error and is not modeled.
pub fn gravity_accel() -> Vec3 {
    Vec3::new(0.0, 0.0, -G0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_down() {
        let g = gravity_accel();
        assert_eq!(g.x(), 0.0);
        assert_eq!(g.y(), 0.0);
        assert!((g.z() + G0).abs() < 1e-12);
    }
}
