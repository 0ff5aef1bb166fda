//! Application configuration.
//!
//! Defaults come from [`crate::constants`]; environment variables override them
//! at startup and the result is remembered between sessions through eframe's
//! storage.

use crate::constants;
use crate::geometry::LogicalSize;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Overrides the solver base URL.
pub const ENV_SOLVER_URL: &str = "STEINER_SOLVER_URL";
/// Overrides the logical canvas width.
pub const ENV_CANVAS_WIDTH: &str = "STEINER_CANVAS_WIDTH";
/// Overrides the logical canvas height.
pub const ENV_CANVAS_HEIGHT: &str = "STEINER_CANVAS_HEIGHT";
/// Overrides the solve request timeout, in seconds.
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "STEINER_REQUEST_TIMEOUT_SECS";

/// Host-level settings for the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the solver API (without trailing slash)
    pub solver_url: String,
    /// Logical width of the drawing surface
    pub canvas_width: u32,
    /// Logical height of the drawing surface
    pub canvas_height: u32,
    /// Timeout for a single solve request
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            solver_url: constants::DEFAULT_SOLVER_URL.to_string(),
            canvas_width: constants::DEFAULT_CANVAS_WIDTH,
            canvas_height: constants::DEFAULT_CANVAS_HEIGHT,
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from the process environment.
    ///
    /// Optional:
    /// - `STEINER_SOLVER_URL`: default `http://localhost:8080/api/steiner`
    /// - `STEINER_CANVAS_WIDTH` / `STEINER_CANVAS_HEIGHT`: default 800 x 600
    /// - `STEINER_REQUEST_TIMEOUT_SECS`: default 30
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Applies environment overrides on top of `self`.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup on top of `self`.
    /// Missing or unparseable values keep the current setting.
    pub fn with_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let solver_url = lookup(ENV_SOLVER_URL)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(self.solver_url);

        Self {
            solver_url: normalize_url(&solver_url),
            canvas_width: parse_or(&lookup, ENV_CANVAS_WIDTH, self.canvas_width),
            canvas_height: parse_or(&lookup, ENV_CANVAS_HEIGHT, self.canvas_height),
            request_timeout_secs: parse_or(
                &lookup,
                ENV_REQUEST_TIMEOUT_SECS,
                self.request_timeout_secs,
            ),
        }
    }

    /// Full URL of the solve endpoint.
    pub fn solve_endpoint(&self) -> String {
        format!("{}/solve", normalize_url(&self.solver_url))
    }

    /// Logical resolution of the drawing surface.
    pub fn logical_size(&self) -> LogicalSize {
        LogicalSize::new(self.canvas_width, self.canvas_height)
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Ignoring unparseable {key}={raw:?}");
                default
            }
        },
        None => default,
    }
}
