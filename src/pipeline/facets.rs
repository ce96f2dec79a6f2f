//! Facet extractor: filter choices offered to the user.
//!
//! Always computed from the unfiltered message set so the choices never
//! shrink while a filter is active.

use crate::types::FlowMessage;
use serde::Serialize;
use std::collections::BTreeSet;

/// Distinct endpoints and methods, each sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub endpoints: Vec<String>,
    pub methods: Vec<String>,
}

impl Facets {
    pub fn extract(messages: &[FlowMessage]) -> Self {
        let mut endpoints = BTreeSet::new();
        let mut methods = BTreeSet::new();

        for msg in messages {
            for name in [&msg.source, &msg.destination].into_iter().flatten() {
                if !name.is_empty() {
                    endpoints.insert(name.as_str());
                }
            }
            if let Some(method) = msg.method.as_deref().filter(|m| !m.is_empty()) {
                methods.insert(method);
            }
        }

        Self {
            endpoints: endpoints.into_iter().map(str::to_string).collect(),
            methods: methods.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty() && self.methods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_sorted_distinct() {
        let mut a = FlowMessage::new(0, "a");
        a.source = Some("proxy".to_string());
        a.destination = Some("alice".to_string());
        a.method = Some("INVITE".to_string());
        let mut b = FlowMessage::new(1, "b");
        b.source = Some("alice".to_string());
        b.method = Some("ACK".to_string());
        let c = FlowMessage::new(2, "c");

        let facets = Facets::extract(&[a, b, c]);
        assert_eq!(facets.endpoints, vec!["alice", "proxy"]);
        assert_eq!(facets.methods, vec!["ACK", "INVITE"]);
    }

    #[test]
    fn test_empty_input() {
        let facets = Facets::extract(&[]);
        assert!(facets.is_empty());
    }
}
