//! One demonstration run, start to finish.
//!
//! # Responsibilities
//! - Bind and start the producer
//! - Fetch, decode and check the styles document
//! - Stop the producer exactly once
//!
//! # Design Decisions
//! - Fail fast: any error aborts the run, no retries
//! - The producer handle is scoped: an early return drops it, which
//!   releases the listener

use std::net::SocketAddr;

use serde::Deserialize;
use serde_json::Value;

use crate::check::{check, report, CheckOutcome};
use crate::config::DemoConfig;
use crate::error::Result;
use crate::http::{StyleClient, StyleServer};
use crate::lifecycle::state::{RunState, RunTracker};
use crate::object::JsObject;
use crate::styles::{ResponseEnvelope, StyleKey, StyleRecord};

/// Everything a completed run observed.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Address the producer was bound to.
    pub address: SocketAddr,
    pub key: String,
    /// The body decoded through the typed model.
    pub envelope: ResponseEnvelope,
    /// One outcome per configured predicate, in order.
    pub outcomes: Vec<CheckOutcome>,
    pub states: Vec<RunState>,
}

impl RunReport {
    /// Lookup of the checked key in the typed record. `None` when the key is
    /// not set or is not a style label at all.
    pub fn typed_value(&self) -> Option<&str> {
        let key: StyleKey = self.key.parse().ok()?;
        self.envelope.styles.get(key)
    }

    /// True when the predicates did not all agree.
    pub fn diverged(&self) -> bool {
        self.outcomes
            .windows(2)
            .any(|pair| pair[0].is_present() != pair[1].is_present())
    }
}

/// Execute a run with `config`.
pub async fn run(config: &DemoConfig) -> Result<RunReport> {
    let mut tracker = RunTracker::new();

    let listener = StyleServer::bind(&config.server).await?;
    let server = StyleServer::new(&config.server).spawn(listener)?;
    tracker.advance(RunState::ServerStarted);

    let (envelope, outcomes) = consume(config, &server.base_url(), &mut tracker).await?;

    let address = server.local_addr();
    server.stop().await?;
    tracker.advance(RunState::ServerStopped);

    Ok(RunReport {
        address,
        key: config.check.key.clone(),
        envelope,
        outcomes,
        states: tracker.visited().to_vec(),
    })
}

/// Consumer half of a run against the producer at `base_url`: fetch,
/// decode, check and report. Advances `tracker` from `ServerStarted` to
/// `Checked`.
pub async fn consume(
    config: &DemoConfig,
    base_url: &str,
    tracker: &mut RunTracker,
) -> Result<(ResponseEnvelope, Vec<CheckOutcome>)> {
    let client = StyleClient::new(base_url, &config.client)?;

    tracker.advance(RunState::RequestSent);
    let body = client.fetch().await?;
    tracker.advance(RunState::ResponseReceived);

    let root = JsObject::from_json(&body)?;
    let envelope = typed_envelope(&root)?;

    let outcomes = config
        .check
        .modes
        .iter()
        .map(|mode| {
            let outcome = check(&root, &config.check.key, *mode);
            report(&outcome);
            outcome
        })
        .collect();
    tracker.advance(RunState::Checked);

    Ok((envelope, outcomes))
}

/// Typed view of `root`. A missing or non-object `styles` yields an empty
/// record, matching the absent branch of the check; an object with labels
/// outside the closed set is a decode error.
fn typed_envelope(root: &JsObject) -> Result<ResponseEnvelope> {
    let styles = match root.own("styles") {
        Some(styles @ Value::Object(_)) => StyleRecord::deserialize(styles)?,
        _ => StyleRecord::new(),
    };
    Ok(ResponseEnvelope::new(styles))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_envelope_follows_styles_guard() {
        let root = JsObject::from_json(r#"{"styles":{"stroke":"white"}}"#).unwrap();
        assert_eq!(typed_envelope(&root).unwrap(), ResponseEnvelope::default());

        for body in [r#"{"other":1}"#, r#"{"styles":"nope"}"#, r#"{"styles":null}"#] {
            let root = JsObject::from_json(body).unwrap();
            assert!(typed_envelope(&root).unwrap().styles.is_empty(), "{body}");
        }
    }

    #[test]
    fn test_typed_envelope_rejects_unknown_label() {
        let root = JsObject::from_json(r#"{"styles":{"main":"x"}}"#).unwrap();
        assert!(matches!(typed_envelope(&root), Err(crate::Error::Decode(_))));
    }
}
