use ballistic_sim::scenario::{presets, Environment};
use ballistic_sim::solver::{solve_elevation_angles, zero_angle};
use ballistic_sim::types::SimConfig;
use ballistic_sim::units::rad_to_mrad;

fn main() -> ballistic_sim::Result<()> {
    let env = Environment::default();
    let bullet = presets::heavy_308();
    let config = SimConfig::default();

    println!("=== Zero angles: {} at {:.0} m/s ===\n", bullet.name, bullet.muzzle_velocity);
    println!("  {:>8}  {:>14}  {:>14}  {:>10}", "zero (m)", "vacuum (mrad)", "drag (mrad)", "diff");
    println!("  {}", "-".repeat(54));

    for zero in [50.0, 100.0, 200.0, 300.0, 500.0, 800.0] {
        let vacuum = solve_elevation_angles(zero, 0.0, bullet.muzzle_velocity)?.flat();
        let with_drag = zero_angle(&env, &bullet, zero, &config)?;
        println!(
            "  {:>8.0}  {:>14.4}  {:>14.4}  {:>10.4}",
            zero,
            rad_to_mrad(vacuum),
            rad_to_mrad(with_drag),
            rad_to_mrad(with_drag - vacuum),
        );
    }
    Ok(())
}
