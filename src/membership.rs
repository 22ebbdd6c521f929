//! Membership predicates over the generic object model.
//!
//! `InOperator` answers "is the key reachable", which includes the ambient
//! template; `HasOwnProperty` answers "was the key set as data". For the
//! reserved label `__proto__` on a payload that never set it, the two
//! disagree.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::object::{JsObject, PropertyValue};

/// A `present(object, key)` predicate.
pub trait MembershipCheck: Send + Sync {
    /// Short name for logs and reports.
    fn name(&self) -> &'static str;

    /// The value the predicate considers present under `key`, if any.
    fn find(&self, object: &JsObject, key: &str) -> Option<PropertyValue>;

    fn contains(&self, object: &JsObject, key: &str) -> bool {
        self.find(object, key).is_some()
    }
}

/// Reachability test: own entries and the ambient template.
#[derive(Debug, Clone, Copy, Default)]
pub struct InOperator;

impl MembershipCheck for InOperator {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn find(&self, object: &JsObject, key: &str) -> Option<PropertyValue> {
        object.get(key)
    }
}

/// Own-entry test: only keys present in the payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasOwnProperty;

impl MembershipCheck for HasOwnProperty {
    fn name(&self) -> &'static str {
        "own"
    }

    fn find(&self, object: &JsObject, key: &str) -> Option<PropertyValue> {
        object.own(key).cloned().map(PropertyValue::Data)
    }
}

/// Predicate selection, from config or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// Reachability, like the `in` operator.
    Naive,
    /// Own entries only, like `hasOwnProperty`.
    Own,
}

impl CheckMode {
    pub fn predicate(self) -> &'static dyn MembershipCheck {
        match self {
            CheckMode::Naive => &InOperator,
            CheckMode::Own => &HasOwnProperty,
        }
    }
}

impl fmt::Display for CheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.predicate().name())
    }
}
