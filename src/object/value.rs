use std::fmt;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::object::prototype::AmbientProperty;

/// A decoded JSON object viewed through the generic object model: own
/// entries from the payload, with the ambient template behind them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsObject {
    own: Map<String, Value>,
}

impl JsObject {
    /// Decode `text`, requiring an object at the root.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(own) => Ok(Self { own }),
            other => Err(Error::NotAnObject(json_type(&other))),
        }
    }

    /// Own entry only.
    pub fn own(&self, key: &str) -> Option<&Value> {
        self.own.get(key)
    }

    /// Template entry only. The same for every object.
    pub fn ambient(&self, key: &str) -> Option<AmbientProperty> {
        AmbientProperty::lookup(key)
    }

    /// Property access: own entries shadow the template.
    pub fn get(&self, key: &str) -> Option<PropertyValue> {
        match self.own(key) {
            Some(value) => Some(PropertyValue::Data(value.clone())),
            None => self.ambient(key).map(PropertyValue::Ambient),
        }
    }

    /// Own entry `key` viewed as an object, if it is one.
    pub fn child(&self, key: &str) -> Option<JsObject> {
        match self.own(key)? {
            Value::Object(own) => Some(Self { own: own.clone() }),
            _ => None,
        }
    }

    pub fn own_keys(&self) -> impl Iterator<Item = &str> {
        self.own.keys().map(String::as_str)
    }
}

/// What a property lookup produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Payload data.
    Data(Value),
    /// Structural placeholder from the template.
    Ambient(AmbientProperty),
}

impl PropertyValue {
    pub fn is_data(&self) -> bool {
        matches!(self, PropertyValue::Data(_))
    }

    pub fn as_data(&self) -> Option<&Value> {
        match self {
            PropertyValue::Data(value) => Some(value),
            PropertyValue::Ambient(_) => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Data(Value::String(s)) => f.write_str(s),
            PropertyValue::Data(value) => write!(f, "{value}"),
            PropertyValue::Ambient(ambient) => write!(f, "{ambient}"),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
