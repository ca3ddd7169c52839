use crate::error::{BallisticsError, Result};
use crate::vector::Vec3;

/// Drag coefficient implied by a ballistic coefficient.
///
/// `bc_si` is the ballistic coefficient in kg/m², `mass` in kg, `area` the
/// frontal area in m². `C_D = M / (A · BC)`.
pub fn drag_coefficient(bc_si: f64, mass: f64, area: f64) -> Result<f64> {
    if bc_si <= 0.0 || !bc_si.is_finite() {
        return Err(BallisticsError::invalid(
            "ballistic coefficient",
            bc_si,
            "must be positive",
        ));
    }
    if area <= 0.0 || !area.is_finite() {
        return Err(BallisticsError::invalid("frontal area", area, "must be positive"));
    }
    Ok(mass / (area * bc_si))
}

/// Quadratic drag force magnitude (N): `0.5 · ρ · A · v² · C_D`.
pub fn drag_force(density: f64, area: f64, speed: f64, cd: f64) -> f64 {
    0.5 * density * area * speed * speed * cd
}

/// Drag force vector opposing the air-relative velocity.
///
/// `rel_vel` is the projectile velocity minus the wind.
pub fn drag_force_vector(rel_vel: &Vec3, density: f64, cd: f64, area: f64) -> Vec3 {
    match rel_vel.try_normalize() {
        Some(dir) => -dir.scale(drag_force(density, area, rel_vel.norm(), cd)),
        None => Vec3::zeros(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn coefficient_formula() {
        let cd = drag_coefficient(200.0, 0.01, 5e-5).unwrap();
        assert_relative_eq!(cd, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn coefficient_rejects_zero_bc_and_area() {
        assert!(drag_coefficient(0.0, 0.01, 5e-5).is_err());
        assert!(drag_coefficient(200.0, 0.01, 0.0).is_err());
        assert!(drag_coefficient(-1.0, 0.01, 5e-5).is_err());
    }

    #[test]
    fn force_is_quadratic_and_non_negative() {
        let f1 = drag_force(1.2, 1e-4, 100.0, 0.5);
        let f2 = drag_force(1.2, 1e-4, 200.0, 0.5);
        assert_relative_eq!(f2 / f1, 4.0, max_relative = 1e-12);
        assert!(drag_force(1.2, 1e-4, -300.0, 0.5) > 0.0);
    }

    #[test]
    fn drag_opposes_relative_velocity() {
        let f = drag_force_vector(&Vec3::new(800.0, 0.0, 10.0), 1.2, 0.5, 5e-5);
        assert!(f.x() < 0.0);
        assert!(f.z() < 0.0);
        assert_eq!(f.y(), 0.0);
    }

    #[test]
    fn crosswind_produces_lateral_drag() {
        // Wind blowing toward -y makes the air-relative velocity point to +y,
        // so drag pushes the bullet toward -y.
        let vel = Vec3::new(800.0, 0.0, 0.0);
        let wind = Vec3::new(0.0, -5.0, 0.0);
        let f = drag_force_vector(&(vel - wind), 1.2, 0.5, 5e-5);
        assert!(f.y() < 0.0);
    }

    #[test]
    fn no_drag_at_rest() {
        let f = drag_force_vector(&Vec3::zeros(), 1.2, 0.5, 5e-5);
        assert!(f.norm() < 1e-15);
    }
}
