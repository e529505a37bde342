//! Filter values
//!
//! Dynamically-typed values carried by filter descriptors and returned as
//! bound parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A scalar (or pre-split list) value attached to a filter descriptor.
///
/// Deserializes through [`serde_json::Value`], so JSON input and
/// `From<Value>` agree on every shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "Value")]
pub enum FilterValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl FilterValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FilterValue::Null)
    }

    /// String form used by `CONTAINS` wrapping and list splitting
    pub fn as_text(&self) -> String {
        match self {
            FilterValue::Null => String::new(),
            FilterValue::Bool(b) => b.to_string(),
            FilterValue::Int(i) => i.to_string(),
            FilterValue::Float(f) => f.to_string(),
            FilterValue::Text(s) => s.clone(),
            FilterValue::List(items) => items.join(","),
        }
    }

    /// Items for `IN` / `NOT IN`, trimmed, in order.
    ///
    /// Text is split on `,`. A value that is blank after trimming has no items.
    pub fn list_items(&self) -> Vec<String> {
        match self {
            FilterValue::Null => Vec::new(),
            FilterValue::List(items) => items
                .iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
            other => {
                let text = other.as_text();
                if text.trim().is_empty() {
                    return Vec::new();
                }
                text.split(',').map(|item| item.trim().to_string()).collect()
            }
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Null => write!(f, "NULL"),
            other => write!(f, "{}", other.as_text()),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Int(i64::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Float(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        FilterValue::List(value)
    }
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FilterValue::Null,
            Value::Bool(b) => FilterValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FilterValue::Int(i)
                } else if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
                    FilterValue::Float(f)
                } else {
                    // Integers past i64 keep their exact digits
                    FilterValue::Text(n.to_string())
                }
            }
            Value::String(s) => FilterValue::Text(s),
            Value::Array(items) => FilterValue::List(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            // Objects have no scalar form; keep their JSON text
            object @ Value::Object(_) => FilterValue::Text(object.to_string()),
        }
    }
}
