//! The interactive search session.
//!
//! One task owns all session state: the visible input, the single debounce
//! timer, the request sequence counter and the displayed results. Callers
//! talk to it through a [`SessionHandle`]: input values go in over a
//! channel, and every state change is published as a [`SearchView`] on a
//! watch channel.
//!
//! Each dispatched request carries a sequence number. Only a response for
//! the most recently issued sequence is applied; older ones are dropped, so
//! a slow response can never overwrite results for a newer query.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::debouncer::Debouncer;
use super::transport::{SearchTransport, TransportError};
use crate::corpus::Record;

/// Where the session is in the query lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing pending; results (possibly none) are settled
    Idle,
    /// Waiting for typing to pause
    Debouncing,
    /// The latest request is in flight
    Loading,
    /// The latest request failed
    Error,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "idle"),
            SessionPhase::Debouncing => write!(f, "debouncing"),
            SessionPhase::Loading => write!(f, "loading"),
            SessionPhase::Error => write!(f, "error"),
        }
    }
}

/// Everything a renderer needs to draw the search screen.
#[derive(Debug, Clone)]
pub struct SearchView {
    /// Current input value, updated on every event
    pub input: String,
    /// A quiet-period timer is armed
    pub debouncing: bool,
    /// The latest request has not answered yet
    pub loading: bool,
    /// Message for the alert region
    pub error: Option<String>,
    /// Displayed results, best match first
    pub results: Arc<[Record]>,
    /// The query `results` answer, if any request has completed
    pub results_query: Option<String>,
}

impl Default for SearchView {
    fn default() -> Self {
        Self {
            input: String::new(),
            debouncing: false,
            loading: false,
            error: None,
            results: empty_results(),
            results_query: None,
        }
    }
}

impl SearchView {
    pub fn phase(&self) -> SessionPhase {
        if self.debouncing {
            SessionPhase::Debouncing
        } else if self.loading {
            SessionPhase::Loading
        } else if self.error.is_some() {
            SessionPhase::Error
        } else {
            SessionPhase::Idle
        }
    }

    /// Message to show in place of the result list, if any.
    pub fn placeholder(&self) -> Option<String> {
        if self.input.trim().is_empty() {
            return Some("Start typing to search".to_string());
        }
        if self.loading || self.error.is_some() || !self.results.is_empty() {
            return None;
        }
        self.results_query
            .as_ref()
            .map(|query| format!("No results for '{}'", query.trim()))
    }
}

fn empty_results() -> Arc<[Record]> {
    Arc::from(Vec::new())
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Input events received
    pub inputs: usize,
    /// Requests dispatched after a quiet period
    pub requests_sent: usize,
    /// Responses applied to the view
    pub responses_applied: usize,
    /// Responses dropped because a newer request had been issued
    pub responses_discarded: usize,
}

#[derive(Debug, Error)]
#[error("Search session has shut down")]
pub struct SessionClosed;

/// Builder for a search session over a transport.
pub struct SearchSession<T> {
    transport: Arc<T>,
    debounce: Duration,
}

/// Messages from the handle to the session task, processed in send order.
enum Command {
    Input(String),
    Settle(oneshot::Sender<()>),
}

impl<T: SearchTransport> SearchSession<T> {
    pub fn new(transport: Arc<T>, debounce: Duration) -> Self {
        Self {
            transport,
            debounce,
        }
    }

    /// Start the session task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> SessionHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(SearchView::default());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task = SessionTask {
            transport: self.transport,
            debouncer: Debouncer::new(self.debounce),
            view: SearchView::default(),
            view_tx,
            latest_seq: 0,
            summary: SessionSummary::default(),
            settle_waiters: Vec::new(),
        };

        let join = tokio::spawn(task.run(command_rx, shutdown_rx));

        SessionHandle {
            command_tx,
            view_rx,
            shutdown_tx: Some(shutdown_tx),
            join: Some(join),
        }
    }
}

/// Caller side of a running session.
///
/// Dropping the handle shuts the session down; a pending timer never fires
/// after that.
pub struct SessionHandle {
    command_tx: mpsc::UnboundedSender<Command>,
    view_rx: watch::Receiver<SearchView>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    join: Option<JoinHandle<SessionSummary>>,
}

impl SessionHandle {
    /// Deliver one input event carrying the full current value.
    pub fn input(&self, value: impl Into<String>) -> Result<(), SessionClosed> {
        self.command_tx
            .send(Command::Input(value.into()))
            .map_err(|_| SessionClosed)
    }

    /// Wait until every input sent so far has been processed and the
    /// session is neither debouncing nor loading.
    ///
    /// A query still inside its quiet period is sent and answered before
    /// this returns.
    pub async fn settle(&self) -> Result<(), SessionClosed> {
        let (tx, rx) = oneshot::channel();
        self.command_tx
            .send(Command::Settle(tx))
            .map_err(|_| SessionClosed)?;
        rx.await.map_err(|_| SessionClosed)
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> SearchView {
        self.view_rx.borrow().clone()
    }

    /// Receiver notified on every view change.
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view_rx.clone()
    }

    /// Request shutdown. Pending timers are cancelled; in-flight requests
    /// are left to finish and their results ignored.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Shut down and wait for the session's final counters.
    pub async fn wait(mut self) -> Result<SessionSummary> {
        self.shutdown();
        match self.join.take() {
            Some(join) => join.await.with_context(|| "Search session task panicked"),
            None => Ok(SessionSummary::default()),
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct Completion {
    seq: u64,
    query: String,
    outcome: Result<Vec<Record>, TransportError>,
}

struct SessionTask<T> {
    transport: Arc<T>,
    debouncer: Debouncer<String>,
    view: SearchView,
    view_tx: watch::Sender<SearchView>,
    latest_seq: u64,
    summary: SessionSummary,
    settle_waiters: Vec<oneshot::Sender<()>>,
}

impl<T: SearchTransport> SessionTask<T> {
    async fn run(
        mut self,
        mut command_rx: mpsc::UnboundedReceiver<Command>,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) -> SessionSummary {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown_rx => {
                    debug!("Shutdown requested");
                    break;
                }

                command = command_rx.recv() => match command {
                    Some(Command::Input(value)) => self.on_input(value),
                    Some(Command::Settle(waiter)) => self.settle_waiters.push(waiter),
                    None => {
                        debug!("Input channel closed");
                        break;
                    }
                },

                query = self.debouncer.settled(), if self.debouncer.is_armed() => {
                    self.dispatch(query, &done_tx);
                }

                Some(done) = done_rx.recv() => self.on_completion(done),
            }

            self.publish();
            self.release_settled();
        }

        if let Some(value) = self.debouncer.cancel() {
            debug!(input = %value, "Dropped pending query on shutdown");
        }

        info!(
            inputs = self.summary.inputs,
            requests = self.summary.requests_sent,
            discarded = self.summary.responses_discarded,
            "Search session ended"
        );
        self.summary
    }

    fn on_input(&mut self, value: String) {
        self.summary.inputs += 1;
        self.view.input = value.clone();

        if value.trim().is_empty() {
            self.debouncer.cancel();
            // Anything still in flight now answers a stale query
            self.latest_seq += 1;
            self.view.debouncing = false;
            self.view.loading = false;
            self.view.error = None;
            self.view.results = empty_results();
            self.view.results_query = None;
            return;
        }

        self.debouncer.arm(value);
        self.view.debouncing = true;
    }

    fn dispatch(&mut self, query: String, done_tx: &mpsc::UnboundedSender<Completion>) {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        self.summary.requests_sent += 1;

        self.view.debouncing = false;
        self.view.loading = true;
        self.view.error = None;

        debug!(seq, query = %query, "Dispatching search");

        let transport = Arc::clone(&self.transport);
        let done_tx = done_tx.clone();
        tokio::spawn(async move {
            let outcome = transport.search(&query).await;
            // The session may be gone; its answer no longer matters then
            let _ = done_tx.send(Completion {
                seq,
                query,
                outcome,
            });
        });
    }

    fn on_completion(&mut self, done: Completion) {
        if done.seq != self.latest_seq {
            self.summary.responses_discarded += 1;
            debug!(
                seq = done.seq,
                latest = self.latest_seq,
                query = %done.query,
                "Discarding stale response"
            );
            return;
        }

        self.summary.responses_applied += 1;
        self.view.loading = false;

        match done.outcome {
            Ok(records) => {
                debug!(query = %done.query, results = records.len(), "Applied results");
                self.view.results = records.into();
                self.view.results_query = Some(done.query);
                self.view.error = None;
            }
            Err(e) => {
                warn!(query = %done.query, error = %e, "Search request failed");
                self.view.results = empty_results();
                self.view.results_query = None;
                self.view.error = Some(e.to_string());
            }
        }
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view.clone());
    }

    fn release_settled(&mut self) {
        if self.view.debouncing || self.view.loading || self.settle_waiters.is_empty() {
            return;
        }
        for waiter in self.settle_waiters.drain(..) {
            let _ = waiter.send(());
        }
    }
}
