//! Quiet-period debouncing for input values.
//!
//! At most one timer is armed at a time. Arming again replaces the pending
//! value and restarts the quiet period; only the value present when the
//! timer finally fires is released.

use std::future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep_until, Instant, Sleep};

struct Pending<T> {
    value: T,
    deadline: Pin<Box<Sleep>>,
}

/// Coalesces a stream of values into one value per quiet period.
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer with `value`, discarding any pending value.
    ///
    /// Returns true if a pending value was replaced.
    pub fn arm(&mut self, value: T) -> bool {
        let deadline = Instant::now() + self.delay;

        match self.pending.as_mut() {
            Some(pending) => {
                pending.value = value;
                pending.deadline.as_mut().reset(deadline);
                true
            }
            None => {
                self.pending = Some(Pending {
                    value,
                    deadline: Box::pin(sleep_until(deadline)),
                });
                false
            }
        }
    }

    /// Disarm the timer and return the value it was holding.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }

    /// Wait for the armed timer to fire and take its value.
    ///
    /// Never completes while disarmed. Cancel safe: dropping the future
    /// leaves the timer armed.
    pub async fn settled(&mut self) -> T {
        loop {
            match self.pending.as_mut() {
                Some(pending) => pending.deadline.as_mut().await,
                None => future::pending::<()>().await,
            }

            if let Some(pending) = self.pending.take() {
                return pending.value;
            }
        }
    }
}
