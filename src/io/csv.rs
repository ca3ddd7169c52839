use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::dynamics::state::State;
use crate::error::Result;

/// One CSV row per recorded trajectory sample.
#[derive(Debug, Serialize)]
struct SampleRow {
    time: f64,
    pos_x: f64,
    pos_y: f64,
    pos_z: f64,
    vel_x: f64,
    vel_y: f64,
    vel_z: f64,
    speed: f64,
}

impl From<&State> for SampleRow {
    fn from(s: &State) -> Self {
        SampleRow {
            time: s.time,
            pos_x: s.pos.x(),
            pos_y: s.pos.y(),
            pos_z: s.pos.z(),
            vel_x: s.vel.x(),
            vel_y: s.vel.y(),
            vel_z: s.vel.z(),
            speed: s.speed(),
        }
    }
}

/// Write trajectory samples in CSV format.
///
/// Columns: time, pos_x, pos_y, pos_z, vel_x, vel_y, vel_z, speed
pub fn write_trajectory<W: Write>(writer: W, samples: &[State]) -> Result<()> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    for s in samples {
        wtr.serialize(SampleRow::from(s))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write trajectory samples to a CSV file at the given path.
pub fn write_trajectory_file(path: impl AsRef<Path>, samples: &[State]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_trajectory(file, samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec3;

    #[test]
    fn csv_output_has_header_and_rows() {
        let samples = vec![
            State {
                time: 0.0,
                pos: Vec3::zeros(),
                vel: Vec3::new(1005.0, 0.0, 0.0),
            },
            State {
                time: 0.1,
                pos: Vec3::new(95.0, 0.0, -0.05),
                vel: Vec3::new(870.0, 0.0, -1.0),
            },
        ];

        let mut buf = Vec::new();
        write_trajectory(&mut buf, &samples).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "time,pos_x,pos_y,pos_z,vel_x,vel_y,vel_z,speed");
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[1].starts_with("0.0,0.0,0.0,0.0,1005.0,"));
    }

    #[test]
    fn file_output_matches_writer_output() {
        let samples = vec![State::at_muzzle(800.0, 0.001, 0.0)];
        let path = std::env::temp_dir().join(format!("ballistic_sim_traj_{}.csv", std::process::id()));
        write_trajectory_file(&path, &samples).unwrap();
        let from_file = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mut buf = Vec::new();
        write_trajectory(&mut buf, &samples).unwrap();
        assert_eq!(from_file, String::from_utf8(buf).unwrap());
    }
}
