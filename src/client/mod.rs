//! Client side of the search: debounced input, request lifecycle and the
//! figures shown next to the results.
//!
//! This module contains:
//! - `debouncer` - Single-timer quiet-period coalescing
//! - `session` - The session task and its handle and view
//! - `transport` - The `SearchTransport` trait and its HTTP implementation
//! - `stats` - Derived result statistics with identity-based memoization
//! - `mock` - In-process transport for tests and offline use

pub mod debouncer;
pub mod mock;
pub mod session;
pub mod stats;
pub mod transport;

pub use debouncer::Debouncer;
pub use mock::MockTransport;
pub use session::{SearchSession, SearchView, SessionHandle, SessionPhase, SessionSummary};
pub use stats::{SearchStats, StatsMemo};
pub use transport::{HttpTransport, SearchTransport, TransportError};
