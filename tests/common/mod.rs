//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use sipflow_rs::FlowMessage;
use std::path::PathBuf;

/// Path to a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Row indices of a message list
pub fn message_ids(messages: &[FlowMessage]) -> Vec<usize> {
    messages.iter().map(|m| m.message_id).collect()
}
