//! Columnar datasets as delivered by the host dashboard.
//!
//! The host hands over a query result shaped like
//! `{"series": [{"fields": [{"name": "source", "values": [...]}, ...]}]}`.
//! Every part of that shape is optional on the wire: missing series, fields,
//! names or values deserialize to empty/absent instead of failing, so a
//! half-formed result still yields a (possibly empty) flow.

use crate::error::{FlowError, Result};
use crate::types::FieldValue;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// A query result: zero or more series. Only the first series is rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDataset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub series: Vec<Series>,
}

/// One table of equally long columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<Field>,
}

/// One named column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<FieldValue>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Field {
    pub fn new(name: impl Into<String>, values: Vec<FieldValue>) -> Self {
        Self {
            name: Some(name.into()),
            values,
        }
    }

    /// Column name, if present and not blank.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

impl RawDataset {
    /// Dataset with no series at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Single-series dataset built from `(name, values)` columns.
    pub fn from_fields<I, N>(fields: I) -> Self
    where
        I: IntoIterator<Item = (N, Vec<FieldValue>)>,
        N: Into<String>,
    {
        Self {
            series: vec![Series {
                name: None,
                fields: fields
                    .into_iter()
                    .map(|(name, values)| Field::new(name, values))
                    .collect(),
            }],
        }
    }

    /// Single-series dataset where every cell is a string.
    pub fn from_string_columns(columns: &[(&str, &[&str])]) -> Self {
        Self::from_fields(columns.iter().map(|(name, values)| {
            (
                name.to_string(),
                values.iter().map(|v| FieldValue::from(*v)).collect(),
            )
        }))
    }

    /// The series that gets rendered.
    pub fn primary(&self) -> Option<&Series> {
        self.series.first()
    }

    /// Row count of the rendered series: the longest column's length.
    pub fn row_count(&self) -> usize {
        self.primary()
            .map(|s| s.fields.iter().map(|f| f.values.len()).max().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Whether the columns of the rendered series disagree on length.
    pub fn is_ragged(&self) -> bool {
        self.primary().is_some_and(|s| {
            let mut lens = s.fields.iter().map(|f| f.values.len());
            match lens.next() {
                Some(first) => lens.any(|l| l != first),
                None => false,
            }
        })
    }

    /// Parse a dataset from the host's JSON shape.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| FlowError::Dataset(format!("Failed to parse dataset: {}", e)))
    }

    /// Load a dataset JSON file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FlowError::Dataset(format!("Failed to read dataset file {:?}: {}", path, e))
        })?;
        Self::from_json(&content)
    }
}
