//! HTTP transport for both ends of a run.
//!
//! # Data Flow
//! ```text
//! client.rs (GET /)
//!     → server.rs (Axum router, request ID + trace + timeout layers)
//!     → JSON ResponseEnvelope
//!     → client.rs (status check, body text)
//! ```

pub mod client;
pub mod request;
pub mod server;

pub use client::StyleClient;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{ServerHandle, StyleServer};
