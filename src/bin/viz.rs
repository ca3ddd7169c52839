use eframe::egui;
use egui_plot::{HLine, Line, Plot, PlotPoints};

use ballistic_sim::config::ShotConfig;
use ballistic_sim::solver::{solve_shot, ShotReport};
use ballistic_sim::types::State;

fn main() -> eframe::Result {
    let shot = ShotConfig {
        distance_m: 600.0,
        zero_distance_m: 100.0,
        wind_y_ms: -3.0,
        sample_interval_s: 0.001,
        ..ShotConfig::default()
    };

    let report = match solve_shot(
        &shot.environment(),
        &shot.projectile(),
        &shot.target(),
        &shot.scope(),
        &shot.sim_config(),
    ) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("shot failed: {e}");
            std::process::exit(1);
        }
    };

    let app = ShotViz { shot, report };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Ballistic Trajectory", options, Box::new(|_| Ok(Box::new(app))))
}

struct ShotViz {
    shot: ShotConfig,
    report: ShotReport,
}

impl eframe::App for ShotViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let trajectory = &self.report.trajectory.samples;
        let step = (trajectory.len() / 2000).max(1);
        let sampled: Vec<&State> = trajectory.iter().step_by(step).collect();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("{} at {:.0} m", self.shot.bullet_name, self.shot.distance_m));
            ui.label(format!(
                "Apex: {:.3} m  |  Flight: {:.3} s  |  Impact: {:+.3} m high, {:+.3} m left  |  {}",
                self.report.trajectory.max_altitude,
                self.report.trajectory.impact.time,
                self.report.offset_z,
                self.report.offset_y,
                if self.report.hit { "HIT" } else { "MISS" },
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;
            let target_z = self.shot.altitude_target_m - self.shot.altitude_shooter_m;

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Height (m)");
                    let points: PlotPoints = sampled.iter().map(|s| [s.pos.x(), s.pos.z()]).collect();
                    Plot::new("height")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Downrange (m)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Path", points));
                            plot_ui.hline(HLine::new("Target centre", target_z));
                        });
                });

                ui.vertical(|ui| {
                    ui.label("Speed (m/s)");
                    let points: PlotPoints = sampled.iter().map(|s| [s.time, s.speed()]).collect();
                    Plot::new("speed")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Speed", points));
                        });
                });
            });

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Lateral drift (m, + left)");
                    let points: PlotPoints = sampled.iter().map(|s| [s.pos.x(), s.pos.y()]).collect();
                    Plot::new("drift")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Downrange (m)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Drift", points));
                        });
                });

                ui.vertical(|ui| {
                    ui.label("Vertical velocity (m/s)");
                    let points: PlotPoints = sampled.iter().map(|s| [s.time, s.vel.z()]).collect();
                    Plot::new("vz")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("v_z", points));
                        });
                });
            });
        });
    }
}
