//! Dataset-to-flow transformation pipeline.
//!
//! A host dataset flows through a fixed chain of pure stages:
//!
//! ```text
//! [RawDataset] ──► normalize ──► positions ──► enrich ──► [FlowModel]
//!                                                            ├──► filter ──► visible list
//!                                                            └──► facets ──► filter choices
//! ```
//!
//! # Design
//!
//! - Every dataset refresh produces a fresh [`FlowModel`]; messages are not
//!   mutated after creation.
//! - [`evaluate`] is order-preserving and idempotent and reruns on every
//!   filter change.
//! - Synthesized hashes come from a [`HashSource`] owned by the caller
//!   instead of the wall clock.
//! - Malformed input yields an empty or partial model, never an error.

pub mod enrich;
pub mod facets;
pub mod filter;
pub mod id;
pub mod normalize;
pub mod positions;

pub use enrich::enrich_records;
pub use facets::Facets;
pub use filter::{evaluate, FilterSpec, ERROR_RESPONSE_THRESHOLD};
pub use id::{CycleCounter, CycleId, HashSource};
pub use normalize::{normalize_rows, RawRecord};
pub use positions::EndpointPositions;

use crate::dataset::RawDataset;
use crate::types::FlowMessage;

/// Everything derived from one dataset refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowModel {
    /// Render cycle this model was built in
    pub cycle: CycleId,
    /// Enriched messages in row order
    pub messages: Vec<FlowMessage>,
    /// Endpoint ranking; `names()` is the header order
    pub endpoints: EndpointPositions,
    /// Filter choices from the unfiltered messages
    pub facets: Facets,
}

impl FlowModel {
    /// Run the full pipeline over `dataset` in a fresh render cycle.
    pub fn build<H: HashSource + ?Sized>(dataset: &RawDataset, hashes: &mut H) -> Self {
        let cycle = hashes.next_cycle();
        let records = normalize_rows(dataset);
        let endpoints = EndpointPositions::resolve(&records);
        let messages = enrich_records(records, &endpoints, hashes, cycle);
        let facets = Facets::extract(&messages);

        tracing::debug!(
            ?cycle,
            messages = messages.len(),
            endpoints = endpoints.len(),
            methods = facets.methods.len(),
            "Built flow model"
        );

        Self {
            cycle,
            messages,
            endpoints,
            facets,
        }
    }

    /// Visible messages under `spec`, in row order.
    pub fn filtered(&self, spec: &FilterSpec) -> Vec<FlowMessage> {
        evaluate(&self.messages, spec)
    }

    /// Sorted endpoint names used as diagram headers.
    pub fn hosts(&self) -> &[String] {
        self.endpoints.names()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
