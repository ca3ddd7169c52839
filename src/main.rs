use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use ballistic_sim::config::{DensityName, SchemeName, ShotConfig};
use ballistic_sim::io::{csv, json};
use ballistic_sim::io::json::ShotSummary;
use ballistic_sim::sim::event::EventKind;
use ballistic_sim::solver::{solve_shot, ShotReport};
use ballistic_sim::types::Projectile;
use ballistic_sim::units::rad_to_mrad;

#[derive(Parser)]
#[command(name = "ballistic-sim")]
#[command(version)]
#[command(about = "Bullet trajectory and scope adjustment calculator", long_about = None)]
struct Cli {
    /// JSON shot configuration; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target distance (m)
    #[arg(short = 'r', long)]
    distance: Option<f64>,

    /// Dialed elevation (mrad)
    #[arg(short = 'a', long, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// Dialed windage (mrad, positive = left)
    #[arg(long, allow_negative_numbers = true)]
    windage: Option<f64>,

    /// Scope mount angle (mrad)
    #[arg(long, allow_negative_numbers = true)]
    mount_angle: Option<f64>,

    /// Zero distance (m, 0 = bore-sighted)
    #[arg(short = 'z', long)]
    zero: Option<f64>,

    /// Shooter altitude above sea level (m)
    #[arg(long, allow_negative_numbers = true)]
    altitude_shooter: Option<f64>,

    /// Target centre altitude above sea level (m)
    #[arg(long, allow_negative_numbers = true)]
    altitude_target: Option<f64>,

    /// Target height (m)
    #[arg(long)]
    target_height: Option<f64>,

    /// Target width (m)
    #[arg(long)]
    target_width: Option<f64>,

    /// Bullet mass (grains)
    #[arg(short = 'm', long)]
    mass: Option<f64>,

    /// Bullet diameter (inches)
    #[arg(short = 'd', long)]
    diameter: Option<f64>,

    /// Muzzle velocity (m/s)
    #[arg(short = 'v', long)]
    velocity: Option<f64>,

    /// G1 ballistic coefficient (1.0 = no drag)
    #[arg(short = 'b', long)]
    bc: Option<f64>,

    /// Relative humidity (0.0 - 1.0)
    #[arg(long)]
    humidity: Option<f64>,

    /// Air temperature (Celsius)
    #[arg(short = 't', long, allow_negative_numbers = true)]
    temperature: Option<f64>,

    /// Wind along the firing axis (m/s, positive = away from shooter)
    #[arg(long, allow_negative_numbers = true)]
    wind_x: Option<f64>,

    /// Crosswind (m/s, positive = right to left)
    #[arg(long, allow_negative_numbers = true)]
    wind_y: Option<f64>,

    /// Vertical wind (m/s, positive = up)
    #[arg(long, allow_negative_numbers = true)]
    wind_z: Option<f64>,

    /// Integration time step (s)
    #[arg(long)]
    dt: Option<f64>,

    /// Interval between printed trajectory samples (s)
    #[arg(long)]
    sample_interval: Option<f64>,

    /// Integration scheme
    #[arg(long, value_enum)]
    scheme: Option<SchemeArg>,

    /// Hold air density at the muzzle value instead of tracking altitude
    #[arg(long)]
    surface_density: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemeArg {
    Euler,
    SemiImplicit,
    Rk4,
}

impl From<SchemeArg> for SchemeName {
    fn from(s: SchemeArg) -> Self {
        match s {
            SchemeArg::Euler => SchemeName::Euler,
            SchemeArg::SemiImplicit => SchemeName::SemiImplicitEuler,
            SchemeArg::Rk4 => SchemeName::Rk4,
        }
    }
}

impl Cli {
    /// Base configuration (file or defaults) with explicit flags applied.
    fn shot_config(&self) -> Result<ShotConfig, Box<dyn Error>> {
        let mut c = match &self.config {
            Some(path) => ShotConfig::from_json_file(path)?,
            None => ShotConfig::default(),
        };

        let overrides: [(Option<f64>, &mut f64); 20] = [
            (self.distance, &mut c.distance_m),
            (self.angle, &mut c.angle_mrad),
            (self.windage, &mut c.wind_correction_mrad),
            (self.mount_angle, &mut c.scope_mount_angle_mrad),
            (self.zero, &mut c.zero_distance_m),
            (self.altitude_shooter, &mut c.altitude_shooter_m),
            (self.altitude_target, &mut c.altitude_target_m),
            (self.target_height, &mut c.target_height_m),
            (self.target_width, &mut c.target_width_m),
            (self.mass, &mut c.bullet_mass_grains),
            (self.diameter, &mut c.bullet_diameter_in),
            (self.velocity, &mut c.muzzle_velocity_ms),
            (self.bc, &mut c.ballistic_coefficient),
            (self.humidity, &mut c.humidity),
            (self.temperature, &mut c.temperature_c),
            (self.wind_x, &mut c.wind_x_ms),
            (self.wind_y, &mut c.wind_y_ms),
            (self.wind_z, &mut c.wind_z_ms),
            (self.dt, &mut c.time_step_s),
            (self.sample_interval, &mut c.sample_interval_s),
        ];
        for (value, slot) in overrides {
            if let Some(v) = value {
                *slot = v;
            }
        }
        if let Some(s) = self.scheme {
            c.scheme = s.into();
        }
        if self.surface_density {
            c.density_model = DensityName::Surface;
        }

        c.validate()?;
        Ok(c)
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    let shot = cli.shot_config()?;

    let env = shot.environment();
    let projectile = shot.projectile();
    let target = shot.target();
    let scope = shot.scope();
    let config = shot.sim_config();

    let report = solve_shot(&env, &projectile, &target, &scope, &config)?;

    let stdout = std::io::stdout();
    match (cli.format, &cli.output) {
        (OutputFormat::Json, Some(path)) => {
            json::write_summary_file(path, &ShotSummary::from_report(&projectile, &report))?;
        }
        (OutputFormat::Json, None) => {
            json::write_summary(stdout.lock(), &ShotSummary::from_report(&projectile, &report))?;
        }
        (OutputFormat::Csv, Some(path)) => {
            csv::write_trajectory_file(path, &report.trajectory.samples)?;
        }
        (OutputFormat::Csv, None) => {
            csv::write_trajectory(stdout.lock(), &report.trajectory.samples)?;
        }
        (OutputFormat::Table, Some(path)) => {
            let mut file = std::fs::File::create(path)?;
            print_table(&mut file, &shot, &projectile, &report)?;
        }
        (OutputFormat::Table, None) => {
            print_table(&mut stdout.lock(), &shot, &projectile, &report)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Table output
// ---------------------------------------------------------------------------

fn print_table(
    out: &mut dyn Write,
    shot: &ShotConfig,
    projectile: &Projectile,
    report: &ShotReport,
) -> std::io::Result<()> {
    let traj = &report.trajectory;
    let impact = &traj.impact;

    writeln!(out)?;
    writeln!(out, "====================================================================")?;
    writeln!(out, "  BALLISTIC SOLUTION: {}", projectile.name)?;
    writeln!(out, "====================================================================")?;
    writeln!(out)?;
    writeln!(out, "  Inputs")?;
    writeln!(out, "  ──────────────────────────────────────────────────────────────────")?;
    writeln!(
        out,
        "  Bullet:        {:>8.1} gr    Muzzle vel:   {:>8.1} m/s",
        shot.bullet_mass_grains, shot.muzzle_velocity_ms
    )?;
    writeln!(
        out,
        "  BC (G1):       {:>8.3}       Diameter:     {:>8.3} in",
        shot.ballistic_coefficient, shot.bullet_diameter_in
    )?;
    writeln!(
        out,
        "  Temperature:   {:>8.1} °C    Humidity:     {:>8.0} %",
        shot.temperature_c,
        shot.humidity * 100.0
    )?;
    writeln!(
        out,
        "  Wind (x,y,z):  {:>5.1} {:>5.1} {:>5.1} m/s",
        shot.wind_x_ms, shot.wind_y_ms, shot.wind_z_ms
    )?;
    writeln!(
        out,
        "  Range:         {:>8.1} m     Zero:         {:>8.1} m",
        shot.distance_m, shot.zero_distance_m
    )?;
    writeln!(out)?;

    writeln!(out, "  Flight")?;
    writeln!(out, "  ──────────────────────────────────────────────────────────────────")?;
    writeln!(
        out,
        "  Bore elevation:{:>8.3} mrad  (zero {:.3} mrad)",
        rad_to_mrad(report.launch.elevation),
        rad_to_mrad(report.zero_angle)
    )?;
    writeln!(out, "  Time of flight:{:>8.4} s", impact.time)?;
    writeln!(out, "  Apex height:   {:>8.3} m", traj.max_altitude)?;
    writeln!(out, "  Impact speed:  {:>8.1} m/s", impact.speed())?;
    if let Some(e) = traj.event(&EventKind::Transonic) {
        writeln!(out, "  Transonic at:  {:>8.1} m", e.state.pos.x())?;
    }
    writeln!(out)?;

    writeln!(out, "  Trajectory")?;
    writeln!(out, "  ──────────────────────────────────────────────────────────────────")?;
    writeln!(
        out,
        "  {:>8}  {:>9}  {:>8}  {:>8}  {:>9}",
        "t (s)", "x (m)", "y (m)", "z (m)", "v (m/s)"
    )?;
    writeln!(out, "  {}", "─".repeat(50))?;
    for s in &traj.samples {
        writeln!(
            out,
            "  {:>8.3}  {:>9.2}  {:>8.3}  {:>8.3}  {:>9.1}",
            s.time,
            s.pos.x(),
            s.pos.y(),
            s.pos.z(),
            s.speed()
        )?;
    }
    writeln!(out)?;

    writeln!(out, "  Result")?;
    writeln!(out, "  ──────────────────────────────────────────────────────────────────")?;
    writeln!(
        out,
        "  Impact offset: {:>+8.3} m high  {:>+8.3} m left",
        report.offset_z, report.offset_y
    )?;
    writeln!(
        out,
        "  Adjustment:    {:>+8.2} mrad elevation  {:>+8.2} mrad windage",
        report.adjustment.elevation_mrad, report.adjustment.windage_mrad
    )?;
    writeln!(out, "  Target:        {}", if report.hit { "HIT" } else { "MISS" })?;
    writeln!(out)?;
    writeln!(out, "  Simulation: {} ticks, dt={} s", traj.ticks, shot.time_step_s)?;
    writeln!(out, "====================================================================")?;
    writeln!(out)?;
    Ok(())
}
