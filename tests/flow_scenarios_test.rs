//! Integration tests for the dataset-to-flow pipeline
//!
//! These tests drive the public pipeline API with concrete datasets and
//! check positions, filters and facets end to end.

mod common;

use common::builders::DatasetBuilder;
use common::{fixture_path, message_ids};
use sipflow_rs::pipeline::{CycleCounter, CycleId, HashSource};
use sipflow_rs::{evaluate, ArrowDirection, FieldValue, FilterSpec, FlowEvent, FlowModel, RawDataset};

fn two_message_dataset() -> RawDataset {
    RawDataset::from_string_columns(&[
        ("source", &["A", "B"]),
        ("destination", &["B", "A"]),
        ("method", &["INVITE", "200"]),
    ])
}

#[test]
fn test_two_endpoint_positions_and_arrows() {
    let model = FlowModel::build(&two_message_dataset(), &mut CycleCounter::new());

    assert_eq!(model.messages.len(), 2);
    assert_eq!(model.endpoints.get("A"), Some(0));
    assert_eq!(model.endpoints.get("B"), Some(1));

    let first = &model.messages[0];
    assert_eq!((first.source_position, first.destination_position), (0, 1));
    assert_eq!(first.arrow_direction(), ArrowDirection::Right);

    let second = &model.messages[1];
    assert_eq!((second.source_position, second.destination_position), (1, 0));
    assert_eq!(second.arrow_direction(), ArrowDirection::Left);
}

#[test]
fn test_method_filter_selects_invite() {
    let model = FlowModel::build(&two_message_dataset(), &mut CycleCounter::new());
    let spec = FilterSpec::new().with_methods(["INVITE"]);
    assert_eq!(message_ids(&evaluate(&model.messages, &spec)), vec![0]);
}

#[test]
fn test_only_errors_keeps_404() {
    let ds = DatasetBuilder::new(&["method", "response_code"])
        .row(&["200", "200"])
        .row(&["404", "404"])
        .build();
    let model = FlowModel::build(&ds, &mut CycleCounter::new());
    let visible = model.filtered(&FilterSpec::new().with_only_errors(true));
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].response_code.as_deref(), Some("404"));
}

#[test]
fn test_callid_filter_excludes_missing_callid() {
    let ds = DatasetBuilder::new(&["source", "method"])
        .row(&["A", "OPTIONS"])
        .build();
    let model = FlowModel::build(&ds, &mut CycleCounter::new());
    assert!(model
        .filtered(&FilterSpec::new().with_callid("xyz"))
        .is_empty());
}

#[test]
fn test_empty_series_yields_nothing() {
    let ds = RawDataset::from_json(r#"{"series": []}"#).unwrap();
    let model = FlowModel::build(&ds, &mut CycleCounter::new());
    assert!(model.messages.is_empty());
    assert!(model.facets.endpoints.is_empty());
    assert!(model.facets.methods.is_empty());
}

#[test]
fn test_fixture_call() {
    let ds = RawDataset::load(fixture_path("call.json")).unwrap();
    let model = FlowModel::build(&ds, &mut CycleCounter::new());

    assert_eq!(model.messages.len(), 7);
    assert_eq!(model.hosts(), &["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
    assert_eq!(
        model.facets.methods,
        vec!["100", "180", "200", "ACK", "BYE", "INVITE", "REGISTER"]
    );

    // unnamed column keeps its value under a synthetic name
    assert_eq!(
        model.messages[4].attribute("field_6").as_deref(),
        Some("tcp")
    );
    assert_eq!(model.messages[4].arrow_direction(), ArrowDirection::Left);

    let call = model.filtered(&FilterSpec::new().with_callid("a84b4c76"));
    assert_eq!(message_ids(&call), vec![0, 1, 2, 3, 5, 6]);

    let errors = model.filtered(&FilterSpec::new().with_only_errors(true));
    assert_eq!(message_ids(&errors), vec![4]);

    let search = model.filtered(&FilterSpec::new().with_search_term("10.0.0.3"));
    assert_eq!(message_ids(&search), vec![4]);
}

#[test]
fn test_hash_uniqueness_within_and_across_cycles() {
    let ds = DatasetBuilder::sip()
        .row(&["A", "B", "INVITE"])
        .row(&["B", "A", "200"])
        .row(&["A", "B", "ACK"])
        .build();
    let mut counter = CycleCounter::new();
    let first = FlowModel::build(&ds, &mut counter);
    let second = FlowModel::build(&ds, &mut counter);

    let mut hashes: Vec<&str> = first
        .messages
        .iter()
        .chain(second.messages.iter())
        .map(|m| m.hash.as_str())
        .collect();
    hashes.sort_unstable();
    hashes.dedup();
    assert_eq!(hashes.len(), 6);
}

/// Hash source that tags every cycle with a fixed token.
struct FixedToken;

impl HashSource for FixedToken {
    fn next_cycle(&mut self) -> CycleId {
        CycleId(77)
    }

    fn message_hash(&self, cycle: CycleId, message_id: usize) -> String {
        format!("row-{}-{}", message_id, cycle)
    }
}

#[test]
fn test_custom_hash_source() {
    let model = FlowModel::build(&two_message_dataset(), &mut FixedToken);
    assert_eq!(model.cycle, CycleId(77));
    assert_eq!(model.messages[1].hash, "row-1-77");
}

#[test]
fn test_click_payload_reports_computed_identity() {
    let ds = RawDataset::from_fields([
        ("source", vec![FieldValue::from("B"), FieldValue::from("A")]),
        ("destination", vec![FieldValue::from("A"), FieldValue::from("B")]),
        ("sourcePosition", vec![FieldValue::from("bogus"), FieldValue::Null]),
        ("messageID", vec![FieldValue::from(99i64), FieldValue::from(98i64)]),
    ]);
    let model = FlowModel::build(&ds, &mut CycleCounter::new());

    for (row, msg) in model.messages.iter().enumerate() {
        let payload = FlowEvent::item_click(msg).payload().unwrap();
        assert_eq!(payload["item"]["messageID"], row);
        assert_eq!(payload["item"]["sourcePosition"], msg.source_position);
        assert_eq!(payload["item"]["destinationPosition"], msg.destination_position);
    }
}
