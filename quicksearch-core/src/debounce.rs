//! Debounce Scheduler: holds the latest input until it has been quiet for a fixed delay.

use std::future;

use tokio::time::{sleep_until, Duration, Instant};
use tracing::debug;

use crate::model::Query;

/// What a quiet period produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    /// Non-blank input to hand to the Request Controller
    Query(Query),
    /// Input was blank after trimming; nothing to search
    Blank,
}

impl Settled {
    fn from_input(value: String) -> Self {
        match Query::parse(value) {
            Some(query) => Settled::Query(query),
            None => Settled::Blank,
        }
    }
}

#[derive(Debug)]
struct Pending {
    value: String,
    deadline: Instant,
}

/// Single pending-timer slot.
///
/// Each [`push`](Debouncer::push) replaces the pending value and restarts
/// the delay, so a burst of inputs settles exactly once, on its last value.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Pending>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record new input and restart the quiet period.
    pub fn push(&mut self, value: impl Into<String>) {
        let deadline = Instant::now() + self.delay;
        if let Some(previous) = self.pending.replace(Pending {
            value: value.into(),
            deadline,
        }) {
            debug!(superseded = %previous.value, "debounce timer restarted");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Drop the pending input without emitting it.
    pub fn cancel(&mut self) -> Option<String> {
        self.pending.take().map(|p| p.value)
    }

    /// Take the pending input if its quiet period has elapsed by `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<Settled> {
        match &self.pending {
            Some(pending) if pending.deadline <= now => {
                self.pending.take().map(|p| Settled::from_input(p.value))
            }
            _ => None,
        }
    }

    /// Wait for the pending input to settle.
    ///
    /// Never resolves while nothing is pending. Cancel-safe: dropping the
    /// future before it resolves leaves the pending input in place.
    pub async fn settled(&mut self) -> Settled {
        loop {
            let Some(deadline) = self.deadline() else {
                return future::pending().await;
            };
            sleep_until(deadline).await;
            if let Some(settled) = self.take_due(Instant::now()) {
                return settled;
            }
        }
    }
}
