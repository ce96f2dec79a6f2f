//! Row normalizer: columnar dataset to one record per row.

use crate::dataset::RawDataset;
use crate::types::FieldValue;

/// One dataset row as `(column, value)` pairs in dataset field order.
///
/// A later column with the same name overwrites the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    /// Row index in the dataset
    pub row: usize,
    fields: Vec<(String, FieldValue)>,
}

impl RawRecord {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            fields: Vec::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Text of a column, `None` when missing, null or empty.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name)
            .and_then(FieldValue::to_text)
            .filter(|s| !s.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_fields(self) -> Vec<(String, FieldValue)> {
        self.fields
    }
}

/// Flatten the dataset's first series into one record per row index.
///
/// Blank column names fall back to `field_<index>`. A column shorter than
/// the longest one simply contributes nothing to the rows it lacks.
pub fn normalize_rows(dataset: &RawDataset) -> Vec<RawRecord> {
    let Some(series) = dataset.primary() else {
        tracing::debug!("Dataset has no series, nothing to normalize");
        return Vec::new();
    };

    if dataset.is_ragged() {
        tracing::warn!("Dataset columns have mismatched lengths, using longest");
    }

    let mut records: Vec<RawRecord> = (0..dataset.row_count()).map(RawRecord::new).collect();

    for (index, field) in series.fields.iter().enumerate() {
        let name = field
            .display_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("field_{}", index));
        for (row, value) in field.values.iter().enumerate() {
            records[row].insert(name.clone(), value.clone());
        }
    }

    records
}
