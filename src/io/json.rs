use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::scenario::Projectile;
use crate::sim::event::EventKind;
use crate::solver::ShotReport;
use crate::units::rad_to_mrad;

/// Summary of one solved shot, as written to JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ShotSummary {
    pub projectile: String,
    pub range_m: f64,
    pub zero_angle_mrad: f64,
    pub launch_elevation_mrad: f64,
    pub launch_azimuth_mrad: f64,
    pub time_of_flight_s: f64,
    pub ticks: u64,
    pub max_altitude_m: f64,
    pub impact_speed_ms: f64,
    pub impact_energy_j: f64,
    pub transonic_range_m: Option<f64>,
    pub offset_y_m: f64,
    pub offset_z_m: f64,
    pub elevation_adjustment_mrad: f64,
    pub windage_adjustment_mrad: f64,
    pub hit: bool,
}

impl ShotSummary {
    pub fn from_report(projectile: &Projectile, report: &ShotReport) -> Self {
        let traj = &report.trajectory;
        let impact_speed = traj.impact.speed();
        ShotSummary {
            projectile: projectile.name.clone(),
            range_m: traj.impact.pos.x(),
            zero_angle_mrad: rad_to_mrad(report.zero_angle),
            launch_elevation_mrad: rad_to_mrad(report.launch.elevation),
            launch_azimuth_mrad: rad_to_mrad(report.launch.azimuth),
            time_of_flight_s: traj.impact.time,
            ticks: traj.ticks,
            max_altitude_m: traj.max_altitude,
            impact_speed_ms: impact_speed,
            impact_energy_j: 0.5 * projectile.mass * impact_speed * impact_speed,
            transonic_range_m: traj.event(&EventKind::Transonic).map(|e| e.state.pos.x()),
            offset_y_m: report.offset_y,
            offset_z_m: report.offset_z,
            elevation_adjustment_mrad: report.adjustment.elevation_mrad,
            windage_adjustment_mrad: report.adjustment.windage_mrad,
            hit: report.hit,
        }
    }
}

/// Write a shot summary as pretty JSON to a writer.
pub fn write_summary<W: Write>(mut writer: W, summary: &ShotSummary) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer)?;
    Ok(())
}

/// Write a shot summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &ShotSummary) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_summary(file, summary)
}
