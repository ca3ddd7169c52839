use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use nalgebra::Vector3;

use crate::error::{BallisticsError, Result};

// ---------------------------------------------------------------------------
// Vec3: position / velocity / acceleration value type
// ---------------------------------------------------------------------------

/// Three-component real vector.
/// Frame: x downrange, y lateral (positive to the shooter's left), z up.
///
/// There is no `Div<f64>` impl; use [`Vec3::checked_div`] so a zero divisor
/// surfaces as an error instead of infinities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3(Vector3<f64>);

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3(Vector3::new(x, y, z))
    }

    pub fn zeros() -> Self {
        Vec3(Vector3::zeros())
    }

    /// Vector in the vertical firing plane: (len·cosθ, 0, len·sinθ).
    pub fn from_length_and_elevation(length: f64, elevation: f64) -> Self {
        Vec3::new(length * elevation.cos(), 0.0, length * elevation.sin())
    }

    /// Vector with an elevation above the x/y plane and an azimuth measured
    /// from +x toward +y.
    pub fn from_length_elevation_azimuth(length: f64, elevation: f64, azimuth: f64) -> Self {
        let horizontal = length * elevation.cos();
        Vec3::new(
            horizontal * azimuth.cos(),
            horizontal * azimuth.sin(),
            length * elevation.sin(),
        )
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn scale(&self, k: f64) -> Vec3 {
        Vec3(self.0 * k)
    }

    /// Componentwise division by a scalar. Errors on a zero divisor.
    pub fn checked_div(&self, k: f64) -> Result<Vec3> {
        if k == 0.0 {
            return Err(BallisticsError::DivisionByZero);
        }
        Ok(Vec3(self.0 / k))
    }

    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector.
    pub fn try_normalize(&self) -> Option<Vec3> {
        self.0.try_normalize(1e-12).map(Vec3)
    }

    /// Elevation of the vector in the x/z plane (rad).
    pub fn elevation(&self) -> f64 {
        self.0.z.atan2(self.0.x)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Vec3::zeros()
    }
}

impl From<Vector3<f64>> for Vec3 {
    fn from(v: Vector3<f64>) -> Self {
        Vec3(v)
    }
}

impl From<Vec3> for Vector3<f64> {
    fn from(v: Vec3) -> Self {
        v.0
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3(self.0 + rhs.0)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3(self.0 - rhs.0)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3(-self.0)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        self.0 -= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn default_is_zero() {
        assert_eq!(Vec3::default(), Vec3::zeros());
        assert_eq!(Vec3::default(), Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn add_and_sub_are_componentwise() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 0.5, 10.0);
        assert_eq!(a + b, Vec3::new(-3.0, 2.5, 13.0));
        assert_eq!(a + b, b + a);
        assert_eq!(a - b, Vec3::new(5.0, 1.5, -7.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn accumulate_mutates_only_receiver() {
        let mut a = Vec3::new(1.0, 1.0, 1.0);
        let b = Vec3::new(2.0, 3.0, 4.0);
        a += b;
        assert_eq!(a, Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(b, Vec3::new(2.0, 3.0, 4.0));
        a -= b;
        assert_eq!(a, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn divide_by_zero_is_an_error() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(matches!(v.checked_div(0.0), Err(BallisticsError::DivisionByZero)));
        assert_eq!(v.checked_div(2.0).unwrap(), Vec3::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn length_and_elevation() {
        let v = Vec3::from_length_and_elevation(10.0, FRAC_PI_4);
        assert_abs_diff_eq!(v.x(), 10.0 * FRAC_PI_4.cos(), epsilon = 1e-12);
        assert_eq!(v.y(), 0.0);
        assert_abs_diff_eq!(v.z(), 10.0 * FRAC_PI_4.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(v.norm(), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.elevation(), FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn azimuth_rotates_toward_positive_y() {
        let v = Vec3::from_length_elevation_azimuth(5.0, 0.0, 0.01);
        assert!(v.y() > 0.0);
        assert_abs_diff_eq!(v.norm(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn normalize_zero_is_none() {
        assert!(Vec3::zeros().try_normalize().is_none());
        let n = Vec3::new(3.0, 0.0, 4.0).try_normalize().unwrap();
        assert_abs_diff_eq!(n.norm(), 1.0, epsilon = 1e-12);
    }
}
