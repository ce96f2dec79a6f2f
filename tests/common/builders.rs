//! Test data builders for creating datasets row by row

use sipflow_rs::{FieldValue, RawDataset};

/// Builder for single-series datasets, one message per `row` call.
///
/// Columns are fixed up front; missing cells in a row become null.
pub struct DatasetBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<FieldValue>>,
}

impl DatasetBuilder {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Standard SIP columns: source, destination, method, callid, response_code, timestamp
    pub fn sip() -> Self {
        Self::new(&[
            "source",
            "destination",
            "method",
            "callid",
            "response_code",
            "timestamp",
        ])
    }

    pub fn row(mut self, cells: &[&str]) -> Self {
        let mut row: Vec<FieldValue> = cells
            .iter()
            .map(|c| {
                if c.is_empty() {
                    FieldValue::Null
                } else {
                    FieldValue::from(*c)
                }
            })
            .collect();
        row.resize(self.columns.len(), FieldValue::Null);
        self.rows.push(row);
        self
    }

    pub fn build(self) -> RawDataset {
        let columns = self.columns.iter().enumerate().map(|(i, name)| {
            let values = self.rows.iter().map(|r| r[i].clone()).collect();
            (name.clone(), values)
        });
        RawDataset::from_fields(columns.collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_builder() {
        let ds = DatasetBuilder::new(&["source", "method"])
            .row(&["A", "INVITE"])
            .row(&["B"])
            .build();

        assert_eq!(ds.row_count(), 2);
        let fields = &ds.primary().unwrap().fields;
        assert_eq!(fields[1].values[1], FieldValue::Null);
    }
}
