//! Solve requests: dispatching them to the gateway off the UI thread and
//! applying their outcomes when they come back.

use super::app::{SolveOutcome, SteinerApp};
use eframe::egui;

impl SteinerApp {
    /// Starts a solve for the current terminals.
    ///
    /// Validation failures and ignored requests (already loading) are handled
    /// synchronously by the state; otherwise the gateway call is awaited on the
    /// tokio runtime and its outcome sent back over the channel.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context, repainted once the outcome arrives
    pub fn start_solve(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.state.request_solve(self.gateway.as_ref()) else {
            return;
        };

        let ctx = ctx.clone();
        let sender = self.solve_sender.clone();
        self.runtime.spawn(async move {
            let outcome = pending.response.await;
            let _ = sender.send(SolveOutcome {
                request: pending.request,
                outcome,
            });
            ctx.request_repaint();
        });
    }

    /// Applies every solve outcome that has arrived since the last frame.
    ///
    /// # Returns
    ///
    /// Number of outcomes that were accepted by the state (stale ones are not
    /// counted).
    pub fn handle_solve_outcomes(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(SolveOutcome { request, outcome }) = self.solve_receiver.try_recv() {
            if self.state.receive(request, outcome) {
                applied += 1;
            }
        }
        applied
    }
}
