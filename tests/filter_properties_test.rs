//! Property-based tests for the pipeline's algebraic laws
//!
//! Row counts, endpoint ranking, filter identity/idempotence and facet
//! independence must hold for arbitrary datasets and filter selections.

mod common;

use common::builders::DatasetBuilder;
use proptest::prelude::*;
use sipflow_rs::pipeline::{normalize_rows, CycleCounter, EndpointPositions, Facets};
use sipflow_rs::bridge::NullObserver;
use sipflow_rs::{evaluate, FilterSpec, FlowModel, FlowPanel, PanelOptions, RawDataset};

const HOSTS: &[&str] = &["alice", "bob", "proxy", "10.0.0.1", ""];
const METHODS: &[&str] = &["INVITE", "ACK", "BYE", "200", "486", ""];
const CALLIDS: &[&str] = &["call-1", "call-2", "xyz-3", ""];
const CODES: &[&str] = &["", "100", "200", "404", "503", "abc"];

fn pick(options: &'static [&'static str]) -> impl Strategy<Value = &'static str> {
    prop::sample::select(options)
}

fn row_strategy() -> impl Strategy<Value = [&'static str; 5]> {
    (pick(HOSTS), pick(HOSTS), pick(METHODS), pick(CALLIDS), pick(CODES))
        .prop_map(|(s, d, m, c, r)| [s, d, m, c, r])
}

fn dataset_strategy() -> impl Strategy<Value = Vec<[&'static str; 5]>> {
    prop::collection::vec(row_strategy(), 0..40)
}

fn build_dataset(rows: &[[&str; 5]]) -> RawDataset {
    rows.iter()
        .fold(
            DatasetBuilder::new(&["source", "destination", "method", "callid", "response_code"]),
            |b, row| b.row(row),
        )
        .build()
}

fn filter_strategy() -> impl Strategy<Value = FilterSpec> {
    (
        prop_oneof![Just(""), Just("a"), Just("INV"), Just("proxy"), Just("CALL")],
        prop::collection::btree_set(pick(&["INVITE", "ACK", "200"]), 0..3),
        pick(&["", "alice", "proxy"]),
        pick(&["", "bob", "proxy"]),
        pick(&["", "call", "xyz"]),
        any::<bool>(),
    )
        .prop_map(|(search, methods, src, dst, callid, errors)| {
            FilterSpec::new()
                .with_search_term(search)
                .with_methods(methods)
                .with_source(src)
                .with_destination(dst)
                .with_callid(callid)
                .with_only_errors(errors)
        })
}

proptest! {
    #[test]
    fn test_normalizer_emits_one_record_per_row(rows in dataset_strategy()) {
        let ds = build_dataset(&rows);
        prop_assert_eq!(normalize_rows(&ds).len(), rows.len());
    }

    #[test]
    fn test_positions_are_sorted_bijection(rows in dataset_strategy()) {
        let records = normalize_rows(&build_dataset(&rows));
        let positions = EndpointPositions::resolve(&records);
        let names = positions.names();

        // Property: names strictly ascending, position == index
        for (i, name) in names.iter().enumerate() {
            prop_assert_eq!(positions.get(name), Some(i));
            if i > 0 {
                prop_assert!(names[i - 1] < *name);
            }
        }
    }

    #[test]
    fn test_positions_ignore_row_order(rows in dataset_strategy()) {
        let mut reversed = rows.clone();
        reversed.reverse();
        let forward = EndpointPositions::resolve(&normalize_rows(&build_dataset(&rows)));
        let backward = EndpointPositions::resolve(&normalize_rows(&build_dataset(&reversed)));
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn test_identity_filter_returns_input(rows in dataset_strategy()) {
        let model = FlowModel::build(&build_dataset(&rows), &mut CycleCounter::new());
        prop_assert_eq!(evaluate(&model.messages, &FilterSpec::default()), model.messages.clone());
    }

    #[test]
    fn test_filter_is_idempotent(rows in dataset_strategy(), spec in filter_strategy()) {
        let model = FlowModel::build(&build_dataset(&rows), &mut CycleCounter::new());
        let once = evaluate(&model.messages, &spec);
        let twice = evaluate(&once, &spec);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_preserves_order(rows in dataset_strategy(), spec in filter_strategy()) {
        let model = FlowModel::build(&build_dataset(&rows), &mut CycleCounter::new());
        let ids: Vec<usize> = evaluate(&model.messages, &spec).iter().map(|m| m.message_id).collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_facets_independent_of_filters(
        rows in dataset_strategy(),
        a in filter_strategy(),
        b in filter_strategy()
    ) {
        let mut panel = FlowPanel::new(PanelOptions::default(), NullObserver);
        panel.set_data(&build_dataset(&rows));

        panel.set_filters(a);
        let under_a = panel.facets().clone();
        panel.set_filters(b);
        let under_b = panel.facets().clone();
        prop_assert_eq!(&under_a, &under_b);
        prop_assert_eq!(&under_a, &Facets::extract(&panel.model().messages));
    }

    #[test]
    fn test_cleared_filter_is_inactive(spec in filter_strategy()) {
        let mut spec = spec;
        spec.clear();
        prop_assert!(!spec.is_active());
        prop_assert_eq!(spec, FilterSpec::default());
    }
}
