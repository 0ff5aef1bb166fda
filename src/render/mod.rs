//! Scene rendering for terminals, Steiner points and solution edges.
//!
//! [`render_scene`] paints one complete frame onto any [`DrawingContext`],
//! always in the same order (back to front):
//!
//! 1. background fill
//! 2. coordinate grid
//! 3. edges, each as a translucent glow stroke under a solid stroke
//! 4. Steiner points
//! 5. terminal points
//!
//! Each point gets a radial halo, a filled disc with a thin border, a label to
//! its right (`P1`... for terminals, `S1`... for Steiner points) and its
//! coordinates in smaller text underneath.
//!
//! # Module Organization
//!
//! - `svg` - [`SvgSurface`], a context that writes an SVG document
//! - `raster` - [`PixmapCanvas`], the persistent pixel surface shown on screen

mod raster;
mod svg;

pub use raster::{PixmapCanvas, RenderError};
pub use svg::SvgSurface;

use crate::constants;
use crate::geometry::LogicalSize;
use crate::types::{Edge, Point};

/// An RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Rgba {
    /// Builds a color from an `[r, g, b, a]` array.
    pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// The same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Font family class for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    /// Proportional UI font
    Proportional,
    /// Fixed-width font
    Monospace,
}

/// How a piece of text should look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in logical units
    pub size: f32,
    /// Bold-ish weight (600) instead of regular
    pub bold: bool,
    /// Font family class
    pub font: FontKind,
    /// Fill color
    pub color: Rgba,
}

/// A straight stroke between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke width in logical units
    pub width: f32,
    /// Stroke color
    pub color: Rgba,
    /// Rounded line caps
    pub round_cap: bool,
}

/// Drawing primitives the scene is built from.
///
/// Coordinates are always in the surface's logical space.
pub trait DrawingContext {
    /// Covers the whole surface with `color`, discarding previous content.
    fn fill_background(&mut self, size: LogicalSize, color: Rgba);

    /// Strokes a segment from `from` to `to`.
    fn line(&mut self, from: Point, to: Point, style: LineStyle);

    /// Fills a disc of `radius` with a radial gradient that holds `color`
    /// out to `inner_radius` and fades to transparent at `fade_radius`.
    fn halo(&mut self, center: Point, radius: f32, inner_radius: f32, fade_radius: f32, color: Rgba);

    /// Fills a disc and strokes its outline.
    fn disc(&mut self, center: Point, radius: f32, fill: Rgba, border: LineStyle);

    /// Draws `text` with its left edge at `anchor.x`, vertically centred on `anchor.y`.
    fn text(&mut self, anchor: Point, text: &str, style: TextStyle);
}

/// Visual parameters for one class of point.
#[derive(Debug, Clone, Copy)]
struct PointStyle {
    radius: f32,
    color: Rgba,
    label_prefix: &'static str,
}

const TERMINAL_STYLE: PointStyle = PointStyle {
    radius: constants::TERMINAL_RADIUS,
    color: Rgba::from_array(constants::TERMINAL_COLOR),
    label_prefix: constants::TERMINAL_LABEL_PREFIX,
};

const STEINER_STYLE: PointStyle = PointStyle {
    radius: constants::STEINER_RADIUS,
    color: Rgba::from_array(constants::STEINER_COLOR),
    label_prefix: constants::STEINER_LABEL_PREFIX,
};

/// Paints a complete frame.
///
/// Safe to call repeatedly: with the same inputs it issues the same sequence
/// of drawing calls every time.
///
/// # Arguments
///
/// * `ctx` - Target drawing context
/// * `size` - Logical size of the surface
/// * `terminals` - User-placed points, in insertion order
/// * `steiner_points` - Solver-produced junctions, in solver order
/// * `edges` - Solution edges
pub fn render_scene(
    ctx: &mut dyn DrawingContext,
    size: LogicalSize,
    terminals: &[Point],
    steiner_points: &[Point],
    edges: &[Edge],
) {
    ctx.fill_background(size, Rgba::from_array(constants::BACKGROUND_COLOR));
    draw_grid(ctx, size);
    draw_edges(ctx, edges);
    draw_points(ctx, steiner_points, STEINER_STYLE);
    draw_points(ctx, terminals, TERMINAL_STYLE);
}

/// Renders a frame straight to an SVG document.
pub fn render_svg(
    size: LogicalSize,
    terminals: &[Point],
    steiner_points: &[Point],
    edges: &[Edge],
) -> String {
    let mut surface = SvgSurface::new(size);
    render_scene(&mut surface, size, terminals, steiner_points, edges);
    surface.finish()
}

/// Label shown next to the point at `index` (zero-based) of a class.
pub fn point_label(prefix: &str, index: usize) -> String {
    format!("{prefix}{}", index + 1)
}

/// Coordinate text shown under a point's label, e.g. `(120, 45)`.
pub fn coordinate_text(point: &Point) -> String {
    format!("({}, {})", point.x, point.y)
}

fn draw_grid(ctx: &mut dyn DrawingContext, size: LogicalSize) {
    let style = LineStyle {
        width: constants::GRID_LINE_WIDTH,
        color: Rgba::from_array(constants::GRID_COLOR),
        round_cap: false,
    };
    let width = f64::from(size.width);
    let height = f64::from(size.height);
    let step = constants::GRID_SPACING as usize;

    for x in (0..=size.width).step_by(step) {
        let x = f64::from(x);
        ctx.line(Point::new(x, 0.0), Point::new(x, height), style);
    }
    for y in (0..=size.height).step_by(step) {
        let y = f64::from(y);
        ctx.line(Point::new(0.0, y), Point::new(width, y), style);
    }
}

fn draw_edges(ctx: &mut dyn DrawingContext, edges: &[Edge]) {
    let color = Rgba::from_array(constants::EDGE_COLOR);
    let glow = LineStyle {
        width: constants::EDGE_WIDTH + constants::EDGE_GLOW_EXTRA_WIDTH,
        color: color.with_alpha(constants::EDGE_GLOW_ALPHA),
        round_cap: true,
    };
    let solid = LineStyle {
        width: constants::EDGE_WIDTH,
        color,
        round_cap: true,
    };

    for edge in edges {
        ctx.line(edge.start, edge.end, glow);
        ctx.line(edge.start, edge.end, solid);
    }
}

fn draw_points(ctx: &mut dyn DrawingContext, points: &[Point], style: PointStyle) {
    for (index, point) in points.iter().enumerate() {
        draw_point(ctx, point, style, &point_label(style.label_prefix, index));
    }
}

fn draw_point(ctx: &mut dyn DrawingContext, point: &Point, style: PointStyle, label: &str) {
    ctx.halo(
        *point,
        style.radius + constants::HALO_EXTRA_RADIUS,
        style.radius,
        style.radius + constants::HALO_FADE_RADIUS,
        style.color.with_alpha(constants::HALO_ALPHA),
    );

    let border = LineStyle {
        width: constants::POINT_BORDER_WIDTH,
        color: Rgba::from_array(constants::POINT_BORDER_COLOR),
        round_cap: false,
    };
    ctx.disc(*point, style.radius, style.color, border);

    let text_x = point.x + f64::from(style.radius + constants::LABEL_GAP);
    ctx.text(
        Point::new(text_x, point.y),
        label,
        TextStyle {
            size: constants::LABEL_FONT_SIZE,
            bold: true,
            font: FontKind::Proportional,
            color: Rgba::from_array(constants::LABEL_COLOR),
        },
    );
    ctx.text(
        Point::new(text_x, point.y + f64::from(constants::COORDINATE_TEXT_OFFSET)),
        &coordinate_text(point),
        TextStyle {
            size: constants::COORDINATE_FONT_SIZE,
            bold: false,
            font: FontKind::Monospace,
            color: Rgba::from_array(constants::COORDINATE_COLOR),
        },
    );
}
