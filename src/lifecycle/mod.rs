//! Run lifecycle.
//!
//! # Data Flow
//! ```text
//! Idle → ServerStarted → RequestSent → ResponseReceived → Checked → ServerStopped
//!
//! run.rs drives the transitions, state.rs records them,
//! shutdown.rs carries the stop signal to the producer task.
//! ```

pub mod run;
pub mod shutdown;
pub mod state;

pub use run::{consume, run, RunReport};
pub use shutdown::Shutdown;
pub use state::{RunState, RunTracker};
