//! # Steiner Tree Viewer
//!
//! An interactive viewer for Euclidean Steiner minimal trees. Users click on a
//! canvas to place terminal points, send them to an external solver and see
//! the returned tree drawn over the terminals.
//!
//! ## Features
//! - Click-to-place terminals with display-to-logical coordinate mapping
//! - Solve requests over HTTP with a fixed set of user-facing errors
//! - Deterministic scene rendering (grid, glowing edges, labelled points)
//! - Solution statistics and a per-edge length table
//! - SVG and PNG export of the current scene

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod gateway;
pub mod geometry;
pub mod render;
pub mod state;
pub mod types;
mod ui;

// Re-export public types and functions
pub use config::AppConfig;
pub use gateway::{HttpSolveGateway, SolveError, SolveGateway};
pub use geometry::{client_to_logical, LogicalSize, SurfaceRect};
pub use render::{render_scene, DrawingContext, PixmapCanvas, RenderError, SvgSurface};
pub use state::{RequestId, SolveStatus, SolverState};
pub use types::*;
pub use ui::{InteractionController, SteinerApp};

use std::cell::RefCell;
use std::rc::Rc;

/// Fatal errors that stop the viewer from starting.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The drawing surface could not be acquired.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The HTTP client for the solver could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    /// The async runtime could not be started.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    /// The window or its event loop failed.
    #[error("user interface error: {0}")]
    Ui(#[from] eframe::Error),
}

/// Runs the viewer window until it is closed.
///
/// Solve and export tasks are spawned on `runtime`; the window itself runs on
/// the calling thread.
///
/// # Returns
///
/// Returns `Ok(())` when the window closes normally, or an [`AppError`] if the
/// viewer could not start.
///
/// # Example
///
/// ```no_run
/// use steiner_viewer::run_app;
///
/// fn main() -> Result<(), steiner_viewer::AppError> {
///     let runtime = tokio::runtime::Runtime::new()?;
///     run_app(runtime.handle().clone())
/// }
/// ```
pub fn run_app(runtime: tokio::runtime::Handle) -> Result<(), AppError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Steiner Tree Solver")
            .with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    // The creator can only report a boxed error to eframe; the typed one is
    // kept here and returned in place of eframe's wrapper.
    let startup_error: Rc<RefCell<Option<AppError>>> = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&startup_error);

    let result = eframe::run_native(
        "Steiner Tree Solver",
        options,
        Box::new(move |cc| match SteinerApp::from_creation_context(cc, runtime) {
            Ok(app) => Ok(Box::new(app) as Box<dyn eframe::App>),
            Err(err) => {
                log::error!("Startup failed: {err}");
                let message = err.to_string();
                *slot.borrow_mut() = Some(err);
                Err(message.into())
            }
        }),
    );
    let startup_error = startup_error.borrow_mut().take();
    resolve_run_result(result, startup_error)
}

/// Prefers the typed startup failure over eframe's wrapper around it.
fn resolve_run_result(
    result: Result<(), eframe::Error>,
    startup_error: Option<AppError>,
) -> Result<(), AppError> {
    match (result, startup_error) {
        (_, Some(err)) => Err(err),
        (Err(err), None) => Err(AppError::Ui(err)),
        (Ok(()), None) => Ok(()),
    }
}
