//! Core data types for sipflow-rs
//!
//! This module contains the fundamental data structures shared by the
//! pipeline, the panel state and the host notifications.
//!
//! # Main Types
//!
//! - [`FieldValue`] - A loosely typed dataset cell (null, bool, number, string)
//! - [`FlowMessage`] - One normalized, enriched message between two endpoints
//! - [`ArrowDirection`] - Which way a message arrow points in the diagram
//!
//! # Record Shape
//!
//! Datasets carry arbitrary columns. The columns the flow diagram understands
//! (`source`, `destination`, `method`, `callid`, `timestamp`, `response_code`)
//! are lifted into typed fields on [`FlowMessage`]; every other column is kept
//! in [`FlowMessage::extra`] so nothing the query returned is lost.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Column names lifted into typed [`FlowMessage`] fields.
pub const WELL_KNOWN_FIELDS: &[&str] = &[
    "hash",
    "source",
    "destination",
    "method",
    "callid",
    "timestamp",
    "response_code",
];

/// Wire names of the fields the pipeline computes; dataset columns with these
/// names are not passed through.
pub const COMPUTED_FIELDS: &[&str] = &["messageID", "sourcePosition", "destinationPosition"];

/// A single dataset cell.
///
/// Serialized untagged so it reads and writes as a plain JSON scalar.
/// Objects and arrays are kept verbatim in [`FieldValue::Other`] rather than
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Display form of the value, `None` for null.
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Number(n) => Some(number_text(n)),
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Other(v) => Some(v.to_string()),
        }
    }
}

// Integral floats print without a trailing `.0`, the way a JavaScript host
// stringifies them.
fn number_text(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                return (f as i64).to_string();
            }
        }
    }
    n.to_string()
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n)
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

/// Direction of the arrow drawn for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    /// Source header sits left of the destination header
    Right,
    /// Source header sits right of the destination header
    Left,
    /// Source and destination share a position
    Bidirectional,
}

/// One message in the flow diagram.
///
/// Built once per render cycle by the pipeline and never mutated afterwards.
/// Serializes with the field names the host dashboard expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowMessage {
    /// Zero-based row index in the dataset
    #[serde(rename = "messageID")]
    pub message_id: usize,

    /// Tracking key, unique within a render cycle
    pub hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    /// Rank of `source` among all endpoints (0 when unranked)
    #[serde(rename = "sourcePosition")]
    pub source_position: usize,

    /// Rank of `destination` among all endpoints (0 when unranked)
    #[serde(rename = "destinationPosition")]
    pub destination_position: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_code: Option<String>,

    /// Every other column, passed through unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, FieldValue>,
}

impl FlowMessage {
    /// Create an empty message for the given row.
    pub fn new(message_id: usize, hash: impl Into<String>) -> Self {
        Self {
            message_id,
            hash: hash.into(),
            source: None,
            destination: None,
            source_position: 0,
            destination_position: 0,
            method: None,
            callid: None,
            timestamp: None,
            response_code: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn arrow_direction(&self) -> ArrowDirection {
        use std::cmp::Ordering;
        match self.source_position.cmp(&self.destination_position) {
            Ordering::Less => ArrowDirection::Right,
            Ordering::Greater => ArrowDirection::Left,
            Ordering::Equal => ArrowDirection::Bidirectional,
        }
    }

    /// Numeric response code, 0 when absent or not a number.
    ///
    /// Reads the leading integer like a lenient `parseInt`: `"404 Not Found"`
    /// gives 404, `"abc"` gives 0.
    pub fn response_code_value(&self) -> i64 {
        self.response_code
            .as_deref()
            .map(parse_leading_int)
            .unwrap_or(0)
    }

    /// Look up any attribute by column name, typed or passthrough.
    pub fn attribute(&self, key: &str) -> Option<String> {
        match key {
            "hash" => Some(self.hash.clone()),
            "source" => self.source.clone(),
            "destination" => self.destination.clone(),
            "method" => self.method.clone(),
            "callid" => self.callid.clone(),
            "timestamp" => self.timestamp.clone(),
            "response_code" => self.response_code.clone(),
            _ => self.extra.get(key).and_then(FieldValue::to_text),
        }
    }

    /// All present attributes as `(name, text)` pairs, well-known columns first.
    pub fn attributes(&self) -> Vec<(String, String)> {
        let typed = [
            ("source", &self.source),
            ("destination", &self.destination),
            ("method", &self.method),
            ("callid", &self.callid),
            ("timestamp", &self.timestamp),
            ("response_code", &self.response_code),
        ];
        typed
            .into_iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.to_string(), v.clone())))
            .chain(
                self.extra
                    .iter()
                    .filter_map(|(k, v)| v.to_text().map(|t| (k.clone(), t))),
            )
            .collect()
    }
}

fn parse_leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(0)
}
