//! Detail view entries for an inspected message.
//!
//! Each attribute becomes one [`DetailEntry`]. The kind tells the host
//! how to lay it out: JSON documents get a tree viewer, long or multi-line
//! values a preformatted block, everything else a label/value row.

use crate::display::timestamp::{parse_timestamp, to_iso};
use crate::types::FlowMessage;
use serde::Serialize;

/// Values longer than this render as a block.
pub const INLINE_MAX_LEN: usize = 50;

/// Keys longer than this are shortened in the label.
pub const LABEL_MAX_LEN: usize = 15;

const LABEL_KEEP: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailKind {
    Inline,
    MultiLine,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailEntry {
    /// Full attribute name
    pub key: String,
    /// Possibly shortened name for the label
    pub label: String,
    /// Value as displayed
    pub value: String,
    pub kind: DetailKind,
}

impl DetailEntry {
    /// Classify one attribute; `None` for empty values.
    pub fn new(key: &str, raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        let value = match parse_timestamp(raw) {
            Some(dt) => format!("{} | {}", to_iso(&dt), raw),
            None => raw.to_string(),
        };

        let kind = if is_json_document(&value) {
            DetailKind::Json
        } else if value.contains('\n') || value.chars().count() > INLINE_MAX_LEN {
            DetailKind::MultiLine
        } else {
            DetailKind::Inline
        };

        Some(Self {
            key: key.to_string(),
            label: short_label(key),
            value,
            kind,
        })
    }
}

fn is_json_document(value: &str) -> bool {
    matches!(
        serde_json::from_str::<serde_json::Value>(value),
        Ok(serde_json::Value::Object(_)) | Ok(serde_json::Value::Array(_))
    )
}

fn short_label(key: &str) -> String {
    if key.chars().count() > LABEL_MAX_LEN {
        let kept: String = key.chars().take(LABEL_KEEP).collect();
        format!("{}...", kept)
    } else {
        key.to_string()
    }
}

/// Detail entries for every present attribute of `msg`.
pub fn detail_entries(msg: &FlowMessage) -> Vec<DetailEntry> {
    msg.attributes()
        .iter()
        .filter_map(|(k, v)| DetailEntry::new(k, v))
        .collect()
}
