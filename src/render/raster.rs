//! The persistent pixel surface the scene is painted onto.
//!
//! Each repaint renders the scene to SVG and rasterizes it into a tiny-skia
//! pixmap of the logical resolution with resvg. The pixmap outlives repaints
//! and is what the UI uploads as a texture and what PNG export encodes.

use super::render_svg;
use crate::geometry::LogicalSize;
use crate::types::{Edge, Point};
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Failures of the rendering pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No pixel surface could be allocated for the requested size.
    #[error("unable to acquire a {width}x{height} drawing surface")]
    SurfaceUnavailable {
        /// Requested logical width
        width: u32,
        /// Requested logical height
        height: u32,
    },
    /// The generated scene could not be parsed for rasterization.
    #[error("failed to rasterize scene: {0}")]
    Rasterize(String),
    /// The surface could not be encoded as PNG.
    #[error("failed to encode PNG: {0}")]
    Encode(String),
}

/// Owns the pixmap and the font database used to draw labels.
pub struct PixmapCanvas {
    size: LogicalSize,
    pixmap: Pixmap,
    fontdb: Arc<fontdb::Database>,
}

impl std::fmt::Debug for PixmapCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapCanvas")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl PixmapCanvas {
    /// Acquires a surface of `size`, loading the system fonts for labels.
    ///
    /// # Returns
    ///
    /// [`RenderError::SurfaceUnavailable`] if the pixmap cannot be allocated,
    /// e.g. for a zero-sized surface. Callers must treat this as fatal.
    pub fn new(size: LogicalSize) -> Result<Self, RenderError> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self::with_fonts(size, Arc::new(db))
    }

    /// Acquires a surface of `size` using an already loaded font database.
    pub fn with_fonts(size: LogicalSize, fontdb: Arc<fontdb::Database>) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(size.width, size.height).ok_or(RenderError::SurfaceUnavailable {
            width: size.width,
            height: size.height,
        })?;
        Ok(Self {
            size,
            pixmap,
            fontdb,
        })
    }

    /// Logical size of the surface.
    pub fn size(&self) -> LogicalSize {
        self.size
    }

    /// Current pixel contents.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Clears the surface and paints the scene onto it.
    pub fn repaint(
        &mut self,
        terminals: &[Point],
        steiner_points: &[Point],
        edges: &[Edge],
    ) -> Result<(), RenderError> {
        let svg = render_svg(self.size, terminals, steiner_points, edges);

        let mut opt = usvg::Options::default();
        opt.fontdb = Arc::clone(&self.fontdb);
        let tree =
            usvg::Tree::from_str(&svg, &opt).map_err(|e| RenderError::Rasterize(e.to_string()))?;

        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        let mut target = self.pixmap.as_mut();
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut target);
        Ok(())
    }

    /// Copies the surface into an egui image for texture upload.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_premultiplied(
            [self.size.width as usize, self.size.height as usize],
            self.pixmap.data(),
        )
    }

    /// Encodes the surface as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }
}
