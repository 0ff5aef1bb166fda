//! Adapter to the external Steiner tree solver.
//!
//! The solver is reached over HTTP: the terminal list is POSTed as a JSON array
//! of `{x, y}` objects and the reply carries the edges, the Steiner points and
//! the total length. Failures are collapsed into a handful of kinds, each with
//! one fixed user-facing message; transport details only reach the log.

use crate::config::AppConfig;
use crate::types::{Point, SolveResponse, Solution};
use futures::future::BoxFuture;
use futures::FutureExt;

/// Why a solve attempt did not produce a solution.
///
/// The `Display` text of each variant is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// Fewer than two terminals; detected locally, never sent to the solver.
    #[error("Please add at least 2 points to solve.")]
    Validation,
    /// The solver could not be reached at all.
    #[error("Unable to connect to the backend server. Please ensure the server is running.")]
    NetworkUnavailable,
    /// The solver rejected the request (HTTP 400).
    #[error("Invalid input: Please provide at least 2 points.")]
    InvalidInput,
    /// The solver failed while computing (HTTP 500).
    #[error("Server error: The computation failed. Please try again.")]
    ServerComputationFailed,
    /// Anything else: unexpected status, unreadable body, bad URL.
    #[error("An error occurred while computing the Steiner tree.")]
    Unknown,
}

impl SolveError {
    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => SolveError::InvalidInput,
            500 => SolveError::ServerComputationFailed,
            _ => SolveError::Unknown,
        }
    }

    /// Classifies a transport-level failure where no response was received.
    fn from_transport(err: &reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_status(status.as_u16());
        }
        if err.is_connect() || err.is_timeout() || err.is_request() {
            SolveError::NetworkUnavailable
        } else {
            SolveError::Unknown
        }
    }
}

/// Sends a terminal set to the solver and resolves with its answer.
///
/// One call yields exactly one response or one error: no retries and no
/// caching. The returned future owns everything it needs so it can be spawned.
pub trait SolveGateway: Send + Sync {
    /// Submits `terminals` for solving.
    fn solve(&self, terminals: Vec<Point>) -> BoxFuture<'static, Result<Solution, SolveError>>;
}

/// [`SolveGateway`] talking to the solver's REST API with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpSolveGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSolveGateway {
    /// Builds a gateway for the solve endpoint named by `config`.
    ///
    /// # Returns
    ///
    /// The gateway, or the `reqwest` error if the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            endpoint: config.solve_endpoint(),
        })
    }

    /// URL the gateway posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SolveGateway for HttpSolveGateway {
    fn solve(&self, terminals: Vec<Point>) -> BoxFuture<'static, Result<Solution, SolveError>> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();

        async move {
            let response = client
                .post(&endpoint)
                .json(&terminals)
                .send()
                .await
                .map_err(|err| {
                    let kind = SolveError::from_transport(&err);
                    log::error!("Steiner API error ({kind:?}) posting to {endpoint}: {err}");
                    kind
                })?;

            let status = response.status();
            if !status.is_success() {
                let kind = SolveError::from_status(status.as_u16());
                log::error!("Steiner API error ({kind:?}): {endpoint} answered {status}");
                return Err(kind);
            }

            let body: SolveResponse = response.json().await.map_err(|err| {
                log::error!("Steiner API error: unreadable response body: {err}");
                SolveError::Unknown
            })?;

            Ok(Solution::from(body))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Reads one HTTP request (headers plus `content-length` body) off the socket.
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
                let body_len = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Serves a single canned response and hands back the raw request it saw.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (format!("http://{addr}/api/steiner/"), handle)
    }

    fn gateway_for(base_url: String) -> HttpSolveGateway {
        let config = AppConfig {
            solver_url: base_url,
            request_timeout_secs: 5,
            ..AppConfig::default()
        };
        HttpSolveGateway::new(&config).unwrap()
    }

    fn two_terminals() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]
    }

    #[test]
    fn statuses_map_to_fixed_kinds() {
        assert_eq!(SolveError::from_status(400), SolveError::InvalidInput);
        assert_eq!(SolveError::from_status(500), SolveError::ServerComputationFailed);
        assert_eq!(SolveError::from_status(502), SolveError::Unknown);
        assert_eq!(SolveError::from_status(404), SolveError::Unknown);
    }

    #[test]
    fn messages_are_user_readable() {
        assert_eq!(
            SolveError::Validation.to_string(),
            "Please add at least 2 points to solve."
        );
        assert_eq!(
            SolveError::NetworkUnavailable.to_string(),
            "Unable to connect to the backend server. Please ensure the server is running."
        );
    }

    #[tokio::test]
    async fn successful_solve_posts_terminals_and_parses_result() {
        let body = r#"{"edges":[{"start":{"x":0,"y":0},"end":{"x":100,"y":0}}],"totalLength":100,"steinerPoints":[],"terminalPoints":[{"x":0,"y":0},{"x":100,"y":0}]}"#;
        let (url, server) = serve_once("200 OK", body).await;
        let gateway = gateway_for(url);
        assert!(gateway.endpoint().ends_with("/api/steiner/solve"));

        let solution = gateway.solve(two_terminals()).await.unwrap();
        assert_eq!(solution.total_length, 100.0);
        assert_eq!(solution.edges.len(), 1);
        assert!(solution.steiner_points.is_empty());

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/steiner/solve"));
        assert!(request.contains(r#"[{"x":0.0,"y":0.0},{"x":100.0,"y":0.0}]"#));
    }

    #[tokio::test]
    async fn bad_request_is_invalid_input() {
        let (url, _server) = serve_once("400 Bad Request", "").await;
        let result = gateway_for(url).solve(two_terminals()).await;
        assert_eq!(result, Err(SolveError::InvalidInput));
    }

    #[tokio::test]
    async fn internal_error_is_server_failure() {
        let (url, _server) = serve_once("500 Internal Server Error", "").await;
        let result = gateway_for(url).solve(two_terminals()).await;
        assert_eq!(result, Err(SolveError::ServerComputationFailed));
    }

    #[tokio::test]
    async fn other_statuses_are_unknown() {
        let (url, _server) = serve_once("503 Service Unavailable", "").await;
        let result = gateway_for(url).solve(two_terminals()).await;
        assert_eq!(result, Err(SolveError::Unknown));
    }

    #[tokio::test]
    async fn unreadable_body_is_unknown() {
        let (url, _server) = serve_once("200 OK", "not json").await;
        let result = gateway_for(url).solve(two_terminals()).await;
        assert_eq!(result, Err(SolveError::Unknown));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = gateway_for(format!("http://{addr}/api/steiner"))
            .solve(two_terminals())
            .await;
        assert_eq!(result, Err(SolveError::NetworkUnavailable));
    }
}
