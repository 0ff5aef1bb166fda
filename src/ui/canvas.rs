//! Canvas display and click-to-point interaction.
//!
//! The scene is painted into the persistent pixmap only when the solving
//! state reports a change, then uploaded as a texture and shown scaled to fit
//! the central panel. Clicks on the displayed image are mapped back to logical
//! coordinates before they reach the state.

use super::app::SteinerApp;
use crate::geometry::{client_to_logical, fit_rect, LogicalSize};
use crate::types::Point;
use eframe::egui;

/// Turns clicks on the displayed surface into new terminal points.
///
/// No drag, no debouncing: every click while enabled yields exactly one point,
/// duplicates included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionController {
    enabled: bool,
}

impl InteractionController {
    /// Creates a controller with the given enablement.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether clicks currently produce points.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Maps a click to the point it adds, or `None` when disabled.
    ///
    /// # Arguments
    ///
    /// * `pos` - Pointer position in screen space
    /// * `rect` - Where the surface is displayed
    /// * `logical` - Backing resolution of the surface
    pub fn point_for_click(
        &self,
        pos: egui::Pos2,
        rect: egui::Rect,
        logical: LogicalSize,
    ) -> Option<Point> {
        if !self.enabled {
            return None;
        }
        Some(client_to_logical(pos.x, pos.y, rect.into(), logical))
    }

    /// Cursor to show while hovering the surface.
    pub fn cursor(&self) -> egui::CursorIcon {
        if self.enabled {
            egui::CursorIcon::Crosshair
        } else {
            egui::CursorIcon::Default
        }
    }
}

impl SteinerApp {
    /// Renders the canvas image and handles clicks on it.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        self.refresh_scene(ui.ctx());

        let rect = fit_rect(ui.available_rect_before_wrap(), self.canvas.size());
        let controller = self.interaction();
        let response = ui
            .allocate_rect(rect, egui::Sense::click())
            .on_hover_cursor(controller.cursor());
        self.last_canvas_rect = Some(rect);

        if let Some(texture) = &self.texture {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            ui.painter()
                .image(texture.id(), rect, uv, egui::Color32::WHITE);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.handle_canvas_click(controller, pos, rect);
            }
        }
    }

    /// Adds the point under a click, if the controller allows it.
    pub fn handle_canvas_click(
        &mut self,
        controller: InteractionController,
        pos: egui::Pos2,
        rect: egui::Rect,
    ) {
        if let Some(point) = controller.point_for_click(pos, rect, self.canvas.size()) {
            log::debug!("Adding terminal at ({}, {})", point.x, point.y);
            self.state.add_point(point);
        }
    }

    /// Repaints the pixmap and re-uploads the texture when the scene changed.
    /// The repaint flag is only cleared after a successful paint.
    fn refresh_scene(&mut self, ctx: &egui::Context) {
        if !self.state.needs_repaint() && self.texture.is_some() {
            return;
        }

        let (steiner_points, edges) = match self.state.solution() {
            Some(solution) => (solution.steiner_points.as_slice(), solution.edges.as_slice()),
            None => (&[][..], &[][..]),
        };
        if let Err(err) = self
            .canvas
            .repaint(self.state.terminals(), steiner_points, edges)
        {
            // Flag stays set so the next frame retries.
            log::error!("Scene repaint failed: {err}");
            return;
        }
        self.state.mark_scene_painted();

        let image = self.canvas.to_color_image();
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("steiner_scene", image, egui::TextureOptions::LINEAR));
            }
        }
    }
}
