//! Filter evaluator: narrows the message list to what the user asked for.
//!
//! Every dimension of [`FilterSpec`] is a predicate; a message is visible
//! only when all of them hold. An empty string, empty set or `false` places
//! no constraint on its dimension, so `FilterSpec::default()` is the
//! identity filter.

use crate::types::FlowMessage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Response codes at or above this value count as errors.
pub const ERROR_RESPONSE_THRESHOLD: i64 = 400;

/// User-chosen narrowing predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    /// Case-insensitive substring over method, source, destination and callid
    pub search_term: String,
    /// Allowed methods (exact match)
    pub method_filter: BTreeSet<String>,
    /// Required source (exact match)
    pub source_filter: String,
    /// Required destination (exact match)
    pub destination_filter: String,
    /// Case-sensitive substring of the callid
    pub callid_filter: String,
    /// Keep only responses with code >= 400
    pub show_only_errors: bool,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.method_filter = methods.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_filter = source.into();
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination_filter = destination.into();
        self
    }

    pub fn with_callid(mut self, callid: impl Into<String>) -> Self {
        self.callid_filter = callid.into();
        self
    }

    pub fn with_only_errors(mut self, only_errors: bool) -> Self {
        self.show_only_errors = only_errors;
        self
    }

    /// Add or remove a method from the method filter.
    pub fn toggle_method(&mut self, method: &str, checked: bool) {
        if checked {
            self.method_filter.insert(method.to_string());
        } else {
            self.method_filter.remove(method);
        }
    }

    /// Reset every dimension to its identity value.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True iff any dimension differs from its identity value.
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty()
            || !self.method_filter.is_empty()
            || !self.source_filter.is_empty()
            || !self.destination_filter.is_empty()
            || !self.callid_filter.is_empty()
            || self.show_only_errors
    }

    /// Whether a single message passes every active predicate.
    pub fn matches(&self, msg: &FlowMessage) -> bool {
        self.matches_search(msg)
            && self.matches_method(msg)
            && exact(&self.source_filter, msg.source.as_deref())
            && exact(&self.destination_filter, msg.destination.as_deref())
            && self.matches_callid(msg)
            && self.matches_errors(msg)
    }

    fn matches_search(&self, msg: &FlowMessage) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let haystack = format!(
            "{} {} {} {}",
            msg.method.as_deref().unwrap_or(""),
            msg.source.as_deref().unwrap_or(""),
            msg.destination.as_deref().unwrap_or(""),
            msg.callid.as_deref().unwrap_or(""),
        )
        .to_lowercase();
        haystack.contains(&self.search_term.to_lowercase())
    }

    fn matches_method(&self, msg: &FlowMessage) -> bool {
        self.method_filter.is_empty()
            || msg
                .method
                .as_ref()
                .is_some_and(|m| self.method_filter.contains(m))
    }

    fn matches_callid(&self, msg: &FlowMessage) -> bool {
        self.callid_filter.is_empty()
            || msg
                .callid
                .as_deref()
                .is_some_and(|c| c.contains(self.callid_filter.as_str()))
    }

    fn matches_errors(&self, msg: &FlowMessage) -> bool {
        !self.show_only_errors || msg.response_code_value() >= ERROR_RESPONSE_THRESHOLD
    }
}

fn exact(filter: &str, value: Option<&str>) -> bool {
    filter.is_empty() || value == Some(filter)
}

/// Visible subset of `messages` under `spec`, in original order.
pub fn evaluate(messages: &[FlowMessage], spec: &FilterSpec) -> Vec<FlowMessage> {
    if !spec.is_active() {
        return messages.to_vec();
    }
    let visible: Vec<FlowMessage> = messages
        .iter()
        .filter(|m| spec.matches(m))
        .cloned()
        .collect();
    tracing::trace!(
        total = messages.len(),
        visible = visible.len(),
        "Evaluated filters"
    );
    visible
}
