//! Export the current scene to SVG or PNG through a native save dialog.

use super::app::SteinerApp;
use crate::render::render_svg;

impl SteinerApp {
    /// SVG text of the scene as it currently stands.
    pub fn scene_svg(&self) -> String {
        let (steiner_points, edges) = match self.state.solution() {
            Some(solution) => (solution.steiner_points.as_slice(), solution.edges.as_slice()),
            None => (&[][..], &[][..]),
        };
        render_svg(self.canvas.size(), self.state.terminals(), steiner_points, edges)
    }

    /// Asks for a destination and writes the scene as SVG.
    pub fn export_svg(&self) {
        let svg = self.scene_svg();
        self.save_with_dialog("SVG", "svg", "steiner_tree.svg", svg.into_bytes());
    }

    /// Asks for a destination and writes the painted surface as PNG.
    pub fn export_png(&self) {
        match self.canvas.encode_png() {
            Ok(png) => self.save_with_dialog("PNG", "png", "steiner_tree.png", png),
            Err(err) => log::error!("PNG export failed: {err}"),
        }
    }

    fn save_with_dialog(
        &self,
        filter_name: &'static str,
        extension: &'static str,
        file_name: &'static str,
        bytes: Vec<u8>,
    ) {
        self.runtime.spawn(async move {
            let Some(handle) = rfd::AsyncFileDialog::new()
                .add_filter(filter_name, &[extension])
                .set_file_name(file_name)
                .save_file()
                .await
            else {
                log::debug!("{filter_name} export cancelled");
                return;
            };

            let path = handle.path();
            match tokio::fs::write(path, &bytes).await {
                Ok(()) => log::info!("Exported {filter_name} to {}", path.display()),
                Err(err) => log::error!("Failed to write {}: {err}", path.display()),
            }
        });
    }
}
