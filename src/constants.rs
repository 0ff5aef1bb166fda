//! Shared application-wide constants.
//! Centralizes tweakable values used across scene rendering and interactions.

// Surface
/// Default logical width of the drawing surface.
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
/// Default logical height of the drawing surface.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

// Solver service
/// Base URL of the solver API; the solve endpoint is `{base}/solve`.
pub const DEFAULT_SOLVER_URL: &str = "http://localhost:8080/api/steiner";
/// Overall request timeout for a solve call, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Minimum number of terminals required before a solve is dispatched.
pub const MIN_TERMINALS: usize = 2;

// Grid
/// Spacing between grid lines in logical units.
pub const GRID_SPACING: u32 = 50;
/// Grid line width in logical units.
pub const GRID_LINE_WIDTH: f32 = 1.0;

// Edges
/// Width of the solid edge stroke.
pub const EDGE_WIDTH: f32 = 2.0;
/// Extra width of the translucent glow stroke drawn beneath each edge.
pub const EDGE_GLOW_EXTRA_WIDTH: f32 = 6.0;
/// Alpha of the edge glow stroke (0x40).
pub const EDGE_GLOW_ALPHA: u8 = 0x40;

// Points
/// Radius of user-placed terminal points.
pub const TERMINAL_RADIUS: f32 = 8.0;
/// Radius of solver-produced Steiner points.
pub const STEINER_RADIUS: f32 = 6.0;
/// Halo extends this far beyond the point radius.
pub const HALO_EXTRA_RADIUS: f32 = 6.0;
/// Radius at which the halo gradient fades to transparent, beyond the point radius.
pub const HALO_FADE_RADIUS: f32 = 10.0;
/// Alpha at the inner stop of the halo gradient (0x50).
pub const HALO_ALPHA: u8 = 0x50;
/// Border stroke width around each point.
pub const POINT_BORDER_WIDTH: f32 = 1.5;
/// Horizontal gap between a point's edge and its label.
pub const LABEL_GAP: f32 = 6.0;
/// Vertical offset of the coordinate text below the label baseline.
pub const COORDINATE_TEXT_OFFSET: f32 = 13.0;
/// Font size of point labels.
pub const LABEL_FONT_SIZE: f32 = 11.0;
/// Font size of coordinate text.
pub const COORDINATE_FONT_SIZE: f32 = 10.0;

// Palette (RGBA)
/// Canvas background.
pub const BACKGROUND_COLOR: [u8; 4] = [0x0a, 0x0e, 0x17, 0xff];
/// Grid lines: slate at 8% opacity.
pub const GRID_COLOR: [u8; 4] = [148, 163, 184, 20];
/// Solution edges.
pub const EDGE_COLOR: [u8; 4] = [0x10, 0xb9, 0x81, 0xff];
/// Terminal points.
pub const TERMINAL_COLOR: [u8; 4] = [0x00, 0xbf, 0xff, 0xff];
/// Steiner points.
pub const STEINER_COLOR: [u8; 4] = [0xa8, 0x55, 0xf7, 0xff];
/// Point border: white at 30% opacity.
pub const POINT_BORDER_COLOR: [u8; 4] = [255, 255, 255, 77];
/// Label text.
pub const LABEL_COLOR: [u8; 4] = [0xf1, 0xf5, 0xf9, 0xff];
/// Secondary coordinate text.
pub const COORDINATE_COLOR: [u8; 4] = [0x64, 0x74, 0x8b, 0xff];

// Labels
/// Prefix of terminal point labels (`P1`, `P2`, ...).
pub const TERMINAL_LABEL_PREFIX: &str = "P";
/// Prefix of Steiner point labels (`S1`, `S2`, ...).
pub const STEINER_LABEL_PREFIX: &str = "S";
