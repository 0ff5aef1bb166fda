//! Conversion from on-screen pointer positions to the canvas's logical space.
//!
//! The drawable surface has a fixed backing resolution (its logical size) but
//! may be displayed stretched or shrunk. Everything downstream of this module
//! works in logical coordinates only.

use crate::types::Point;

/// Backing resolution of the drawable surface, in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalSize {
    /// Width in logical units
    pub width: u32,
    /// Height in logical units
    pub height: u32,
}

impl LogicalSize {
    /// Creates a new logical size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Screen-space bounding rectangle of the displayed surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    /// Left edge in screen pixels
    pub left: f32,
    /// Top edge in screen pixels
    pub top: f32,
    /// Displayed width in screen pixels
    pub width: f32,
    /// Displayed height in screen pixels
    pub height: f32,
}

impl SurfaceRect {
    /// Creates a new surface rectangle.
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

impl From<egui::Rect> for SurfaceRect {
    fn from(rect: egui::Rect) -> Self {
        Self::new(rect.min.x, rect.min.y, rect.width(), rect.height())
    }
}

/// Maps a pointer position in screen pixels to logical surface coordinates.
///
/// The result is rounded to whole logical units. No clamping is applied, so a
/// click on the very edge of the surface can land one unit outside it.
///
/// # Arguments
///
/// * `client_x`, `client_y` - Pointer position in screen pixels
/// * `rect` - Where the surface is displayed, in the same pixel space
/// * `logical` - Backing resolution of the surface
///
/// # Returns
///
/// The corresponding point in logical space
pub fn client_to_logical(
    client_x: f32,
    client_y: f32,
    rect: SurfaceRect,
    logical: LogicalSize,
) -> Point {
    let scale_x = f64::from(logical.width) / f64::from(rect.width);
    let scale_y = f64::from(logical.height) / f64::from(rect.height);

    let x = (f64::from(client_x - rect.left) * scale_x).round();
    let y = (f64::from(client_y - rect.top) * scale_y).round();

    Point::new(x, y)
}

/// Largest rectangle with the surface's aspect ratio that fits in `available`,
/// centred inside it.
pub fn fit_rect(available: egui::Rect, logical: LogicalSize) -> egui::Rect {
    let aspect = logical.width as f32 / logical.height.max(1) as f32;
    let mut size = available.size();
    if size.x / size.y.max(f32::EPSILON) > aspect {
        size.x = size.y * aspect;
    } else {
        size.y = size.x / aspect;
    }
    egui::Rect::from_center_size(available.center(), size)
}
