//! Endpoint position resolver.
//!
//! Every distinct endpoint name seen as a source or destination gets an
//! ordinal equal to its index in the lexicographically sorted name list.
//! The result depends only on the set of names, never on row order.

use crate::pipeline::normalize::RawRecord;
use std::collections::{BTreeSet, HashMap};

/// Sorted endpoint names and their positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointPositions {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl EndpointPositions {
    /// Rank names drawn from any iterator (duplicates collapse).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|n| !n.is_empty())
            .collect();
        let names: Vec<String> = sorted.into_iter().collect();
        let positions = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        Self { names, positions }
    }

    /// Rank all sources and destinations of the given records.
    pub fn resolve(records: &[RawRecord]) -> Self {
        Self::from_names(
            records
                .iter()
                .flat_map(|r| [r.text("source"), r.text("destination")])
                .flatten(),
        )
    }

    /// Position of a name, `None` when it was never seen.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Position of an optional name, 0 when absent or unranked.
    pub fn position_or_zero(&self, name: Option<&str>) -> usize {
        name.and_then(|n| self.get(n)).unwrap_or(0)
    }

    /// Sorted endpoint names; index equals position.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
