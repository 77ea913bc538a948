//! Tagged-union value model for configuration data.
//!
//! Decoders hand the ingestion engine a [`Value`] tree; the store only ever
//! holds terminal variants. Mappings are insertion-ordered (`IndexMap`) so
//! flattening visits entries deterministically.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// An insertion-ordered mapping of segment names to values.
pub type Mapping = IndexMap<String, Value>;

/// A configuration value.
///
/// Every variant except a non-empty `Mapping` is terminal: the ingestion
/// engine stores it whole instead of decomposing it further.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Timestamp(DateTime<Utc>),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// True for the variants the ingestion engine stores verbatim under a
    /// namespace: sequences, strings, timestamps, and empty containers.
    pub fn is_verbatim_terminal(&self) -> bool {
        match self {
            Value::Sequence(_) | Value::String(_) | Value::Timestamp(_) => true,
            Value::Mapping(entries) => entries.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Recursive merge where `new` leaves win on conflict.
    ///
    /// Two mappings merge entry by entry, keeping the position of keys that
    /// already exist in `old` and appending fresh ones. Any other pairing
    /// resolves to `new`.
    pub fn deep_merge(old: Value, new: Value) -> Value {
        match (old, new) {
            (Value::Mapping(mut merged), Value::Mapping(incoming)) => {
                for (segment, new_value) in incoming {
                    if let Some(slot) = merged.get_mut(&segment) {
                        let old_value = std::mem::replace(slot, Value::Null);
                        *slot = Value::deep_merge(old_value, new_value);
                    } else {
                        merged.insert(segment, new_value);
                    }
                }
                Value::Mapping(merged)
            }
            (_, new) => new,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Value::Timestamp(ts)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(entries: Mapping) -> Self {
        Value::Mapping(entries)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    n.as_f64().map(Value::Float).unwrap_or(Value::Null)
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(yaml: serde_yaml::Value) -> Self {
        match yaml {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    n.as_f64().map(Value::Float).unwrap_or(Value::Null)
                }
            }
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_yaml::Value::Mapping(entries) => Value::Mapping(
                entries
                    .into_iter()
                    .filter_map(|(k, v)| yaml_key(k).map(|k| (k, Value::from(v))))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

/// Render a YAML mapping key as a segment. Non-scalar keys are dropped;
/// keys here become path segments and have no structural meaning.
fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Null => Some("null".to_string()),
        _ => None,
    }
}

impl From<toml::Value> for Value {
    fn from(toml: toml::Value) -> Self {
        match toml {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(n) => Value::Integer(n),
            toml::Value::Float(n) => Value::Float(n),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => {
                // Offset datetimes carry enough information for a real
                // timestamp; local dates and times stay strings.
                let raw = dt.to_string();
                match DateTime::parse_from_rfc3339(&raw) {
                    Ok(parsed) => Value::Timestamp(parsed.with_timezone(&Utc)),
                    Err(_) => Value::String(raw),
                }
            }
            toml::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            toml::Value::Table(entries) => Value::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
