//! SVG backend for the scene renderer.
//!
//! Used both for SVG export and as the input to the raster canvas.

use super::{DrawingContext, FontKind, LineStyle, Rgba, TextStyle};
use crate::geometry::LogicalSize;
use crate::types::Point;
use std::fmt::Write as _;

/// Accumulates drawing calls as SVG elements.
#[derive(Debug)]
pub struct SvgSurface {
    body: String,
    size: LogicalSize,
    gradient_count: usize,
}

impl SvgSurface {
    /// Creates an empty document of the given logical size.
    pub fn new(size: LogicalSize) -> Self {
        Self {
            body: String::new(),
            size,
            gradient_count: 0,
        }
    }

    /// Closes the document and returns the SVG text.
    pub fn finish(self) -> String {
        let mut out = String::with_capacity(self.body.len() + 160);
        let _ = writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = self.size.width,
            h = self.size.height
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

/// `fill="#rrggbb" fill-opacity="..."` style attribute pair.
fn paint_attrs(kind: &str, color: Rgba) -> String {
    let hex = format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b);
    if color.a == u8::MAX {
        format!("{kind}=\"{hex}\"")
    } else {
        format!(
            "{kind}=\"{hex}\" {kind}-opacity=\"{:.3}\"",
            f32::from(color.a) / 255.0
        )
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

impl DrawingContext for SvgSurface {
    fn fill_background(&mut self, size: LogicalSize, color: Rgba) {
        // Painting the background replaces everything drawn so far.
        self.body.clear();
        self.gradient_count = 0;
        let _ = writeln!(
            self.body,
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" {}/>",
            size.width,
            size.height,
            paint_attrs("fill", color)
        );
    }

    fn line(&mut self, from: Point, to: Point, style: LineStyle) {
        let cap = if style.round_cap { "round" } else { "butt" };
        let _ = writeln!(
            self.body,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {} stroke-width=\"{}\" stroke-linecap=\"{cap}\"/>",
            from.x,
            from.y,
            to.x,
            to.y,
            paint_attrs("stroke", style.color),
            style.width
        );
    }

    fn halo(&mut self, center: Point, radius: f32, inner_radius: f32, fade_radius: f32, color: Rgba) {
        self.gradient_count += 1;
        let id = format!("halo{}", self.gradient_count);
        let inner_offset = if fade_radius > 0.0 {
            (inner_radius / fade_radius).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let hex = format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b);
        let opacity = f32::from(color.a) / 255.0;

        let _ = writeln!(
            self.body,
            "<defs><radialGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" cx=\"{x}\" cy=\"{y}\" r=\"{fade_radius}\">\
<stop offset=\"{inner_offset:.4}\" stop-color=\"{hex}\" stop-opacity=\"{opacity:.3}\"/>\
<stop offset=\"1\" stop-color=\"{hex}\" stop-opacity=\"0\"/></radialGradient></defs>",
            x = center.x,
            y = center.y,
        );
        let _ = writeln!(
            self.body,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{radius}\" fill=\"url(#{id})\"/>",
            center.x, center.y
        );
    }

    fn disc(&mut self, center: Point, radius: f32, fill: Rgba, border: LineStyle) {
        let _ = writeln!(
            self.body,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{radius}\" {} {} stroke-width=\"{}\"/>",
            center.x,
            center.y,
            paint_attrs("fill", fill),
            paint_attrs("stroke", border.color),
            border.width
        );
    }

    fn text(&mut self, anchor: Point, text: &str, style: TextStyle) {
        let family = match style.font {
            FontKind::Proportional => "Inter, system-ui, sans-serif",
            FontKind::Monospace => "monospace",
        };
        let weight = if style.bold { "600" } else { "400" };
        let _ = writeln!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-family=\"{family}\" font-size=\"{}\" font-weight=\"{weight}\" dominant-baseline=\"central\" {}>{}</text>",
            anchor.x,
            anchor.y,
            style.size,
            paint_attrs("fill", style.color),
            escape_xml(text)
        );
    }
}
