//! Structured log state: ordered key/value pairs plus message templates
//!
//! This module provides:
//! - `FieldValue`: a small closed set of value kinds
//! - `LogState`: the ordered (key, value) sequence carried by records and
//!   scope frames
//! - `{Name}` message-template parsing and rendering

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved state key holding the original unformatted template string.
///
/// Scope-aware sinks exclude this pair when flattening scope state into
/// output.
pub const ORIGINAL_FORMAT_KEY: &str = "{OriginalFormat}";

/// Value type for structured logging fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Timestamp(t) => {
                write!(f, "{}", t.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(t: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(t)
    }
}

/// Ordered sequence of (key, value) pairs carried by a record or scope frame.
///
/// Order is part of the contract: sinks print pairs in insertion order, and
/// template rendering binds placeholders positionally. Duplicate keys are
/// allowed and preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogState {
    pairs: Vec<(String, FieldValue)>,
}

impl LogState {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Add a field, builder style
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Add a field in place
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.pairs.push((key.into(), value.into()));
    }

    /// Build state from a `{Name}` message template and positional values.
    ///
    /// Placeholders are bound to `values` in order of appearance; a
    /// placeholder without a matching value binds to `Null`. The original
    /// template is appended under [`ORIGINAL_FORMAT_KEY`].
    pub fn from_template(template: &str, values: &[FieldValue]) -> Self {
        let mut state = Self::new();
        for (idx, name) in parse_placeholders(template).into_iter().enumerate() {
            let value = values.get(idx).cloned().unwrap_or(FieldValue::Null);
            state.pairs.push((name, value));
        }
        state
            .pairs
            .push((ORIGINAL_FORMAT_KEY.to_string(), template.into()));
        state
    }

    /// Build state for an unstructured scope value: only the reserved
    /// template pair, so scope-aware sinks have nothing to flatten.
    pub fn opaque(value: impl Into<String>) -> Self {
        let value: String = value.into();
        Self {
            pairs: vec![(ORIGINAL_FORMAT_KEY.to_string(), FieldValue::String(value))],
        }
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The original template string, if this state carries one
    pub fn template(&self) -> Option<&str> {
        match self.get(ORIGINAL_FORMAT_KEY) {
            Some(FieldValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Render the template with each placeholder replaced by its bound
    /// value. Falls back to `key=value` pairs when no template is present.
    pub fn render_message(&self) -> String {
        match self.template() {
            Some(template) => {
                let mut message = template.to_string();
                for (key, value) in self.iter() {
                    if key == ORIGINAL_FORMAT_KEY {
                        continue;
                    }
                    let placeholder = format!("{{{}}}", key);
                    message = message.replacen(&placeholder, &value.to_string(), 1);
                }
                message
            }
            None => self.format_fields(),
        }
    }

    /// Iterate pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &(String, FieldValue)> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Format fields as `key=value` pairs, insertion order
    pub fn format_fields(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for LogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl FromIterator<(String, FieldValue)> for LogState {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// Extract `{Name}` placeholder names in order of appearance.
///
/// Doubled braces (`{{`, `}}`) are literals and produce no placeholder.
fn parse_placeholders(template: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '{' {
            continue;
        }
        if chars.peek() == Some(&'{') {
            chars.next();
            continue;
        }
        let mut name = String::new();
        for inner in chars.by_ref() {
            if inner == '}' {
                if !name.is_empty() {
                    names.push(name);
                }
                break;
            }
            name.push(inner);
        }
    }

    names
}
