//! Own-key versus reachable-key membership checks on decoded JSON.
//!
//! A local producer serves `{"styles":{"stroke":"white"}}`; the consumer
//! fetches it, decodes it into a generic object model and asks whether
//! `__proto__` is present. A reachability check says yes, because every
//! generic object exposes that name through its template. An own-key check
//! says no. `styles::StyleRecord` is the typed alternative whose lookups see
//! inserted entries only.

pub mod check;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod membership;
pub mod object;
pub mod observability;
pub mod styles;

pub use config::DemoConfig;
pub use error::{Error, Result};
pub use lifecycle::{run, RunReport};
pub use membership::{CheckMode, HasOwnProperty, InOperator, MembershipCheck};
pub use styles::{ResponseEnvelope, StyleKey, StyleRecord};
