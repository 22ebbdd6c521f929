//! Existence check on the decoded `styles` object and its reporter.

use std::fmt;

use crate::membership::CheckMode;
use crate::object::{JsObject, PropertyValue};
use crate::observability;

/// Result of one predicate evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub mode: CheckMode,
    pub key: String,
    /// `None` when the absent branch was taken.
    pub found: Option<PropertyValue>,
}

impl CheckOutcome {
    pub fn is_present(&self) -> bool {
        self.found.is_some()
    }

    /// True when the present branch fired on a template placeholder.
    pub fn is_ambient_hit(&self) -> bool {
        matches!(self.found, Some(PropertyValue::Ambient(_)))
    }

    pub fn message(&self) -> String {
        match &self.found {
            Some(value) => describe_found(value),
            None => "no such key".to_string(),
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.mode, self.key, self.message())
    }
}

/// Evaluate `mode` for `key` on the `styles` entry of `root`.
///
/// A missing or non-object `styles` takes the absent branch.
pub fn check(root: &JsObject, key: &str, mode: CheckMode) -> CheckOutcome {
    let found = root
        .child("styles")
        .and_then(|styles| mode.predicate().find(&styles, key));

    observability::metrics::record_check(mode, found.is_some());

    CheckOutcome {
        mode,
        key: key.to_string(),
        found,
    }
}

/// Log the branch taken and return the line that was logged.
pub fn report(outcome: &CheckOutcome) -> String {
    match &outcome.found {
        Some(value) => print_is_proto(outcome, value),
        None => {
            tracing::info!(mode = %outcome.mode, key = %outcome.key, "no such key");
            outcome.to_string()
        }
    }
}

fn print_is_proto(outcome: &CheckOutcome, value: &PropertyValue) -> String {
    match value {
        PropertyValue::Ambient(ambient) => tracing::warn!(
            mode = %outcome.mode,
            key = %outcome.key,
            property = ambient.name(),
            placeholder = %ambient,
            "key matched the object template, not the payload"
        ),
        PropertyValue::Data(_) => tracing::info!(
            mode = %outcome.mode,
            key = %outcome.key,
            value = %value,
            "key present in payload"
        ),
    }
    outcome.to_string()
}

fn describe_found(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Ambient(_) => format!("This is actually object {value}, not data"),
        PropertyValue::Data(_) => format!("This is actually data: {value}"),
    }
}
