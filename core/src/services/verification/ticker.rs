//! Countdown ticker for the resend limiter
//!
//! One background task advances both countdowns of a [`ResendState`] once per
//! period and publishes every change through a watch channel. The task ends
//! by itself once both countdowns reach zero, and is aborted when the ticker
//! is cancelled or dropped, so no update lands after the owning view is gone.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, trace};

use crate::domain::entities::resend_state::ResendState;

/// Handle to the countdown task
#[derive(Debug, Default)]
pub struct CountdownTicker {
    handle: Option<JoinHandle<()>>,
}

impl CountdownTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the countdown task is alive
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start the countdown task unless it is already running or there is
    /// nothing to count down.
    ///
    /// Must be called from within a tokio runtime.
    pub fn ensure_running(&mut self, state: Arc<watch::Sender<ResendState>>, period: Duration) {
        if self.is_running() || !state.borrow().is_counting_down() {
            return;
        }

        debug!(
            event = "countdown_started",
            period_ms = period.as_millis() as u64,
            "Starting resend countdown"
        );
        self.handle = Some(tokio::spawn(run_countdown(state, period)));
    }

    /// Replace any running countdown task with a fresh one.
    ///
    /// A task that has already seen both countdowns at zero may still look
    /// alive until it returns, so new countdowns always get their own task.
    /// Must be called from within a tokio runtime.
    pub fn restart(&mut self, state: Arc<watch::Sender<ResendState>>, period: Duration) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.ensure_running(state, period);
    }

    /// Abort the countdown task
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!(event = "countdown_cancelled", "Resend countdown cancelled");
        }
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_countdown(state: Arc<watch::Sender<ResendState>>, period: Duration) {
    // First tick one full period from now
    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;

        let mut counting = false;
        state.send_modify(|current| {
            *current = current.tick();
            counting = current.is_counting_down();
        });
        trace!(state = ?*state.borrow(), "Resend countdown tick");

        if !counting {
            debug!(event = "countdown_finished", "Resend countdown reached zero");
            break;
        }
    }
}
