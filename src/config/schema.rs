//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files, and
//! every section has defaults so an empty file is a valid configuration.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::membership::CheckMode;
use crate::styles::{ResponseEnvelope, StyleRecord};

/// Root configuration for a demonstration run.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DemoConfig {
    /// Producer settings (bind address, payload).
    pub server: ServerConfig,

    /// Consumer transport settings.
    pub client: ClientConfig,

    /// Which key to check and with which predicates.
    pub check: CheckConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Producer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:9000"). Port 0 picks a free port.
    pub bind_address: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Styles served under the `styles` field.
    pub styles: StyleRecord,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:9000".to_string(),
            request_timeout_secs: 30,
            styles: ResponseEnvelope::default().styles,
        }
    }
}

/// Consumer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Total request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

/// Existence check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Key looked up on the `styles` object.
    pub key: String,

    /// Predicates evaluated, in order, against the same response.
    pub modes: Vec<CheckMode>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            key: "__proto__".to_string(),
            modes: vec![CheckMode::Naive, CheckMode::Own],
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter directive (e.g. "info", "proto_check=debug").
    /// `RUST_LOG` takes precedence when set.
    pub log_level: String,

    /// Output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "proto_check=info,tower_http=info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
