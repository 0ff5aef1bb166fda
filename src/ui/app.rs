//! The main application structure and the messages it receives from
//! background tasks.

use super::canvas::InteractionController;
use crate::config::AppConfig;
use crate::gateway::{HttpSolveGateway, SolveError, SolveGateway};
use crate::render::PixmapCanvas;
use crate::state::{RequestId, SolverState};
use crate::types::Solution;
use crate::AppError;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Storage key under which the configuration is persisted.
pub const CONFIG_STORAGE_KEY: &str = "app_config";

/// Result of a solve task, sent back to the UI thread.
#[derive(Debug)]
pub struct SolveOutcome {
    /// Request the outcome belongs to
    pub request: RequestId,
    /// What the gateway returned
    pub outcome: Result<Solution, SolveError>,
}

/// The eframe application: owns the solving session, the drawing surface and
/// the channel solve tasks report back on.
pub struct SteinerApp {
    /// Active configuration
    pub config: AppConfig,
    /// Terminals, solution and solve lifecycle
    pub state: SolverState,
    /// Where solve requests go
    pub gateway: Arc<dyn SolveGateway>,
    /// Persistent pixel surface the scene is painted on
    pub canvas: PixmapCanvas,
    /// Host-controlled switch; when set, clicks never add points
    pub freeze_canvas: bool,
    /// Screen rectangle the canvas occupied on the last frame
    pub last_canvas_rect: Option<egui::Rect>,
    /// Editable copy of the solver URL shown in the settings section
    pub solver_url_edit: String,
    pub(super) texture: Option<egui::TextureHandle>,
    pub(super) runtime: tokio::runtime::Handle,
    pub(super) solve_sender: Sender<SolveOutcome>,
    pub(super) solve_receiver: Receiver<SolveOutcome>,
}

impl SteinerApp {
    /// Creates the application from already built collaborators.
    ///
    /// # Arguments
    ///
    /// * `config` - Active configuration
    /// * `gateway` - Solver adapter
    /// * `canvas` - Acquired drawing surface
    /// * `runtime` - Tokio runtime solve and export tasks are spawned on
    pub fn new(
        config: AppConfig,
        gateway: Arc<dyn SolveGateway>,
        canvas: PixmapCanvas,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let (solve_sender, solve_receiver) = channel();
        Self {
            solver_url_edit: config.solver_url.clone(),
            config,
            state: SolverState::new(),
            gateway,
            canvas,
            freeze_canvas: false,
            last_canvas_rect: None,
            texture: None,
            runtime,
            solve_sender,
            solve_receiver,
        }
    }

    /// Builds the application at startup: restores the persisted
    /// configuration, applies environment overrides, acquires the drawing
    /// surface and the HTTP gateway.
    ///
    /// # Returns
    ///
    /// The app, or the first fatal initialization error.
    pub fn from_creation_context(
        cc: &eframe::CreationContext<'_>,
        runtime: tokio::runtime::Handle,
    ) -> Result<Self, AppError> {
        let stored = cc
            .storage
            .and_then(|storage| storage.get_string(CONFIG_STORAGE_KEY))
            .and_then(|json| match AppConfig::from_json(&json) {
                Ok(config) => Some(config),
                Err(err) => {
                    log::warn!("Discarding unreadable stored configuration: {err}");
                    None
                }
            })
            .unwrap_or_default();
        let config = stored.with_env();

        let canvas = PixmapCanvas::new(config.logical_size())?;
        let gateway = HttpSolveGateway::new(&config)?;
        log::info!(
            "Solver endpoint {}, canvas {}x{}",
            gateway.endpoint(),
            config.canvas_width,
            config.canvas_height
        );

        Ok(Self::new(config, Arc::new(gateway), canvas, runtime))
    }

    /// Whether a click on the canvas would currently add a point.
    pub fn adding_enabled(&self) -> bool {
        !self.freeze_canvas && !self.state.is_loading()
    }

    /// The click-to-point controller for the current frame.
    pub fn interaction(&self) -> InteractionController {
        InteractionController::new(self.adding_enabled())
    }

    /// Label of the solve button for the current state.
    pub fn solve_button_text(&self) -> &'static str {
        if self.state.is_loading() {
            "Computing..."
        } else if self.has_drawn_solution() {
            "Solve Again"
        } else {
            "Solve Steiner Tree"
        }
    }

    /// Whether a solution with at least one edge is on screen.
    pub fn has_drawn_solution(&self) -> bool {
        self.state
            .solution()
            .is_some_and(|solution| !solution.edges.is_empty())
    }

    /// Points the gateway at a new solver URL, keeping the old one if the
    /// HTTP client cannot be rebuilt.
    pub fn apply_solver_url(&mut self, url: &str) {
        let candidate = AppConfig {
            solver_url: url.trim().trim_end_matches('/').to_string(),
            ..self.config.clone()
        };

        match HttpSolveGateway::new(&candidate) {
            Ok(gateway) => {
                log::info!("Solver endpoint changed to {}", gateway.endpoint());
                self.gateway = Arc::new(gateway);
                self.solver_url_edit = candidate.solver_url.clone();
                self.config = candidate;
            }
            Err(err) => log::error!("Keeping previous solver endpoint: {err}"),
        }
    }
}
