use ballistic_sim::scenario::{presets, Environment, ScopeSettings, Target};
use ballistic_sim::solver::solve_shot;
use ballistic_sim::types::SimConfig;
use ballistic_sim::Vec3;

fn main() -> ballistic_sim::Result<()> {
    let bullet = presets::heavy_308();
    let config = SimConfig::default();
    let scope = ScopeSettings { zero_distance: 100.0, ..ScopeSettings::default() };

    println!("=== Crosswind drift, {} zeroed at 100 m ===\n", bullet.name);
    println!(
        "  {:>6}  {:>9}  {:>10}  {:>10}  {:>12}  {:>5}",
        "range", "wind m/s", "drop (m)", "drift (m)", "windage mrad", "hit"
    );
    println!("  {}", "-".repeat(62));

    for range in [100.0, 300.0, 600.0] {
        for wind in [0.0, -2.0, -5.0] {
            let env = Environment { wind: Vec3::new(0.0, wind, 0.0), ..Environment::default() };
            let target = Target { range, ..Target::default() };
            let report = solve_shot(&env, &bullet, &target, &scope, &config)?;
            println!(
                "  {:>6.0}  {:>9.1}  {:>10.3}  {:>10.3}  {:>12.2}  {:>5}",
                range,
                wind,
                report.offset_z,
                report.offset_y,
                report.adjustment.windage_mrad,
                if report.hit { "yes" } else { "no" },
            );
        }
    }
    Ok(())
}
