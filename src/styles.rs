//! Typed style payload shared by the producer and the consumer.
//!
//! `StyleRecord` is a plain ordered map from a closed set of labels to
//! values. Lookups only ever see entries that were explicitly inserted, so a
//! label like `__proto__` is present if and only if the payload carried it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A style label. `Proto` collides with the name of the ambient
/// prototype property every generic object exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleKey {
    Proto,
    Stroke,
    Effect,
    Grid,
    Text,
    Background,
}

impl StyleKey {
    pub const ALL: [StyleKey; 6] = [
        StyleKey::Proto,
        StyleKey::Stroke,
        StyleKey::Effect,
        StyleKey::Grid,
        StyleKey::Text,
        StyleKey::Background,
    ];

    /// Wire label of this key.
    pub fn as_str(self) -> &'static str {
        match self {
            StyleKey::Proto => "__proto__",
            StyleKey::Stroke => "stroke",
            StyleKey::Effect => "effect",
            StyleKey::Grid => "grid",
            StyleKey::Text => "text",
            StyleKey::Background => "background",
        }
    }

    /// True for labels that shadow an ambient object property.
    pub fn is_reserved(self) -> bool {
        matches!(self, StyleKey::Proto)
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label outside the closed set of style keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown style key '{0}'")]
pub struct UnknownStyleKey(pub String);

impl FromStr for StyleKey {
    type Err = UnknownStyleKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownStyleKey(s.to_string()))
    }
}

impl Serialize for StyleKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StyleKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Style values keyed by label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleRecord(BTreeMap<StyleKey, String>);

impl StyleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: StyleKey, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: StyleKey, value: impl Into<String>) -> Option<String> {
        self.0.insert(key, value.into())
    }

    pub fn get(&self, key: StyleKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: StyleKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Body served on `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub styles: StyleRecord,
}

impl ResponseEnvelope {
    pub fn new(styles: StyleRecord) -> Self {
        Self { styles }
    }
}

impl Default for ResponseEnvelope {
    /// `{"styles":{"stroke":"white"}}`
    fn default() -> Self {
        Self::new(StyleRecord::new().with(StyleKey::Stroke, "white"))
    }
}
