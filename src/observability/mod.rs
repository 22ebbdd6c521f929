//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! producer, consumer and run lifecycle produce:
//!     → logging.rs (structured log events, request ID as a field)
//!     → metrics.rs (counters)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
