//! User interface for the Steiner tree viewer.
//!
//! The window is split into a control bar, an optional error banner, an info
//! panel on the right and the drawing surface in the centre.
//!
//! # Module Organization
//!
//! - `app` - The [`SteinerApp`] struct, its construction and small queries
//! - `canvas` - Displaying the painted surface and turning clicks into points
//! - `solve` - Dispatching solve requests and applying their outcomes
//! - `export` - SVG and PNG export through native save dialogs

mod app;
mod canvas;
mod export;
mod solve;

#[cfg(test)]
mod tests;

pub use app::{SteinerApp, CONFIG_STORAGE_KEY};
pub use canvas::InteractionController;

use eframe::egui;

/// Colour of the error banner text.
const ERROR_TEXT_COLOR: egui::Color32 = egui::Color32::from_rgb(0xf8, 0x71, 0x71);

impl eframe::App for SteinerApp {
    /// Persist the configuration between restarts. Terminals and solutions
    /// are session-only.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.config.to_json() {
            Ok(json) => storage.set_string(CONFIG_STORAGE_KEY, json),
            Err(err) => log::error!("Failed to serialize configuration: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `_frame` - The eframe frame
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_solve_outcomes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.draw_controls(ui);
        });

        if let Some(err) = self.state.error().copied() {
            egui::TopBottomPanel::top("error_banner").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(ERROR_TEXT_COLOR, err.to_string());
                    if ui.button("Dismiss").clicked() {
                        self.state.dismiss_error();
                    }
                });
            });
        }

        egui::SidePanel::right("info_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                self.draw_info_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });
    }
}

impl SteinerApp {
    /// Draws the solve, clear and export buttons.
    pub fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let solve = ui.add_enabled(
                self.state.can_solve(),
                egui::Button::new(self.solve_button_text()),
            );
            if solve.clicked() {
                self.start_solve(ui.ctx());
            }
            if self.state.is_loading() {
                ui.spinner();
            }

            ui.separator();

            if ui.button("Clear All").clicked() {
                self.state.clear_all();
            }
            let clear_solution =
                ui.add_enabled(self.state.solution().is_some(), egui::Button::new("Clear Solution"));
            if clear_solution.clicked() {
                self.state.clear_solution();
            }

            ui.separator();

            if ui.button("Export SVG").clicked() {
                self.export_svg();
            }
            if ui.button("Export PNG").clicked() {
                self.export_png();
            }

            ui.separator();
            ui.checkbox(&mut self.freeze_canvas, "Lock canvas");
        });
    }

    /// Draws the statistics, the edge table and the solver settings.
    pub fn draw_info_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Solution");
        ui.separator();

        let solution = self.state.solution();
        egui::Grid::new("stats_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Terminals");
                ui.label(self.state.terminals().len().to_string());
                ui.end_row();

                ui.label("Steiner points");
                ui.label(solution.map_or(0, |s| s.steiner_points.len()).to_string());
                ui.end_row();

                ui.label("Edges");
                ui.label(solution.map_or(0, |s| s.edges.len()).to_string());
                ui.end_row();

                ui.label("Total length");
                ui.label(format_total_length(solution.map(|s| s.total_length)));
                ui.end_row();
            });

        if let Some(solution) = solution.filter(|s| !s.edges.is_empty()) {
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Edges").strong());
            egui::ScrollArea::vertical()
                .max_height(240.0)
                .show(ui, |ui| {
                    egui::Grid::new("edge_table")
                        .num_columns(3)
                        .striped(true)
                        .show(ui, |ui| {
                            for (index, edge) in solution.edges.iter().enumerate() {
                                ui.label(format!("#{}", index + 1));
                                ui.monospace(format!(
                                    "({:.0}, {:.0}) → ({:.0}, {:.0})",
                                    edge.start.x, edge.start.y, edge.end.x, edge.end.y
                                ));
                                ui.monospace(format!("{:.2}", edge.length()));
                                ui.end_row();
                            }
                        });
                });
        }

        ui.add_space(8.0);
        egui::CollapsingHeader::new("Solver settings")
            .default_open(false)
            .show(ui, |ui| {
                ui.label("Solver URL");
                ui.text_edit_singleline(&mut self.solver_url_edit);
                if ui.button("Apply").clicked() {
                    let url = self.solver_url_edit.clone();
                    self.apply_solver_url(&url);
                }
            });
    }
}

/// Formats the reported total length with two decimals, or "-" when there is
/// no solution.
pub fn format_total_length(total: Option<f64>) -> String {
    match total {
        Some(total) => format!("{total:.2}"),
        None => "-".to_string(),
    }
}
