//! Client-side state of a solving session.
//!
//! [`SolverState`] owns the terminal list, the current solution and the solve
//! lifecycle. It is mutated only through its transition methods, which keep
//! the following invariants:
//!
//! - a solution is only ever requested for two or more terminals;
//! - adding a terminal drops the current solution;
//! - at most one solve request is in flight;
//! - a new solve attempt clears the previous error.
//!
//! Every dispatched request is tagged with a [`RequestId`] and stays in flight
//! until its outcome comes back. Clearing or extending the terminal set while
//! it is in flight only marks it discarded: the status remains loading, no
//! second request can be dispatched, and the answer is dropped on arrival
//! instead of being attached to the wrong points.

use crate::constants::MIN_TERMINALS;
use crate::gateway::{SolveError, SolveGateway};
use crate::types::{Point, Solution};
use futures::future::BoxFuture;

/// Identifies one dispatched solve request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

/// Where the solve lifecycle currently stands.
///
/// The solution itself lives outside this enum because it must survive a
/// failed re-solve and stays on screen while a new request is loading.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SolveStatus {
    /// Nothing in flight and no error to show
    #[default]
    Idle,
    /// Waiting for the solver to answer `request`
    Loading {
        /// The request in flight
        request: RequestId,
        /// Set once the terminal set changed; the answer will be dropped
        discarded: bool,
    },
    /// The last attempt failed
    Failed(SolveError),
}

/// A dispatched request the host must drive to completion.
pub struct PendingSolve {
    /// Tag to hand back to [`SolverState::receive`]
    pub request: RequestId,
    /// The gateway call; resolves exactly once
    pub response: BoxFuture<'static, Result<Solution, SolveError>>,
}

impl std::fmt::Debug for PendingSolve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingSolve")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

/// Canonical state of the viewer: terminals, solution and solve status.
#[derive(Debug)]
pub struct SolverState {
    terminals: Vec<Point>,
    solution: Option<Solution>,
    status: SolveStatus,
    next_request: u64,
    scene_dirty: bool,
}

impl Default for SolverState {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverState {
    /// Creates an empty state. The scene starts dirty so the first frame paints.
    pub fn new() -> Self {
        Self {
            terminals: Vec::new(),
            solution: None,
            status: SolveStatus::Idle,
            next_request: 0,
            scene_dirty: true,
        }
    }

    /// Terminal points in insertion order.
    pub fn terminals(&self) -> &[Point] {
        &self.terminals
    }

    /// The current solution, if any.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> &SolveStatus {
        &self.status
    }

    /// Whether a solve request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.status, SolveStatus::Loading { .. })
    }

    /// The error to display, if any.
    pub fn error(&self) -> Option<&SolveError> {
        match &self.status {
            SolveStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Whether a solve could be dispatched right now.
    pub fn can_solve(&self) -> bool {
        self.terminals.len() >= MIN_TERMINALS && !self.is_loading()
    }

    /// Whether something drawn changed since the last successful paint.
    pub fn needs_repaint(&self) -> bool {
        self.scene_dirty
    }

    /// Clears the repaint flag once the scene has been painted successfully.
    pub fn mark_scene_painted(&mut self) {
        self.scene_dirty = false;
    }

    /// Appends a terminal and drops any solution, which no longer matches the
    /// terminal set. An error on display is kept.
    ///
    /// A request still in flight is discarded; its answer will be ignored.
    pub fn add_point(&mut self, point: Point) {
        self.terminals.push(point);
        self.solution = None;
        self.discard_in_flight();
        self.scene_dirty = true;
    }

    /// Starts a solve for the current terminals.
    ///
    /// With fewer than two terminals the attempt fails locally with
    /// [`SolveError::Validation`] and the gateway is never called. While a
    /// request is already in flight the call is ignored.
    ///
    /// # Returns
    ///
    /// The pending request to drive, or `None` if nothing was dispatched.
    pub fn request_solve(&mut self, gateway: &dyn SolveGateway) -> Option<PendingSolve> {
        if let SolveStatus::Loading { request, .. } = self.status {
            log::debug!("Ignoring solve request while {request:?} is in flight");
            return None;
        }
        if self.terminals.len() < MIN_TERMINALS {
            log::info!(
                "Refusing to solve with {} terminal(s)",
                self.terminals.len()
            );
            self.status = SolveStatus::Failed(SolveError::Validation);
            return None;
        }

        self.next_request += 1;
        let request = RequestId(self.next_request);
        self.status = SolveStatus::Loading {
            request,
            discarded: false,
        };
        log::info!(
            "Dispatching {request:?} with {} terminals",
            self.terminals.len()
        );

        Some(PendingSolve {
            request,
            response: gateway.solve(self.terminals.clone()),
        })
    }

    /// Routes a gateway outcome to the matching transition.
    ///
    /// # Returns
    ///
    /// `true` if the outcome was applied, `false` if it was stale.
    pub fn receive(&mut self, request: RequestId, outcome: Result<Solution, SolveError>) -> bool {
        match outcome {
            Ok(solution) => self.receive_solution(request, solution),
            Err(err) => self.receive_error(request, err),
        }
    }

    /// Installs a solution if `request` is the one in flight.
    pub fn receive_solution(&mut self, request: RequestId, solution: Solution) -> bool {
        if !self.settle(request) {
            log::warn!("Dropping stale solution for {request:?}");
            return false;
        }
        log::info!(
            "{request:?} solved: {} edges, {} Steiner points, total length {:.2}",
            solution.edges.len(),
            solution.steiner_points.len(),
            solution.total_length
        );
        self.solution = Some(solution);
        self.status = SolveStatus::Idle;
        self.scene_dirty = true;
        true
    }

    /// Records a failure if `request` is the one in flight. Any earlier
    /// solution stays in place.
    pub fn receive_error(&mut self, request: RequestId, err: SolveError) -> bool {
        if !self.settle(request) {
            log::warn!("Dropping stale error for {request:?}: {err}");
            return false;
        }
        self.status = SolveStatus::Failed(err);
        true
    }

    /// Removes every terminal, the solution and any error. A request in
    /// flight stays in flight but its answer will be ignored.
    pub fn clear_all(&mut self) {
        self.terminals.clear();
        self.solution = None;
        if self.is_loading() {
            self.discard_in_flight();
        } else {
            self.status = SolveStatus::Idle;
        }
        self.scene_dirty = true;
    }

    /// Removes only the solution; terminals and status are untouched.
    pub fn clear_solution(&mut self) {
        if self.solution.take().is_some() {
            self.scene_dirty = true;
        }
    }

    /// Hides the current error, if any.
    pub fn dismiss_error(&mut self) {
        if matches!(self.status, SolveStatus::Failed(_)) {
            self.status = SolveStatus::Idle;
        }
    }

    /// Ends the in-flight request if it is `request`.
    ///
    /// # Returns
    ///
    /// `true` if its outcome should be applied; `false` if it was discarded
    /// or is not the request in flight.
    fn settle(&mut self, request: RequestId) -> bool {
        match self.status {
            SolveStatus::Loading {
                request: current,
                discarded,
            } if current == request => {
                self.status = SolveStatus::Idle;
                !discarded
            }
            _ => false,
        }
    }

    fn discard_in_flight(&mut self) {
        if let SolveStatus::Loading { request, discarded } = &mut self.status {
            if !*discarded {
                log::info!("Discarding {request:?}: terminal set changed");
                *discarded = true;
            }
        }
    }
}
