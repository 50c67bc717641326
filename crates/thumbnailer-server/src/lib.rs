//! Thumbnailer HTTP transport binding
//!
//! Receives push deliveries of storage-object events, runs them through the
//! thumbnail pipeline and maps the typed result onto an HTTP status the
//! delivering platform understands (2xx ack, 503 redeliver, 4xx give up).

pub mod constants;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
