//! Message enricher: raw records to [`FlowMessage`]s.
//!
//! Lifts the well-known columns into typed fields, attaches endpoint
//! positions and assigns each message its row index and tracking hash.

use crate::pipeline::id::{CycleId, HashSource};
use crate::pipeline::normalize::RawRecord;
use crate::pipeline::positions::EndpointPositions;
use crate::types::{FlowMessage, COMPUTED_FIELDS};
use std::collections::HashSet;

/// Build flow messages for one render cycle.
///
/// Records without any column are dropped. A non-empty `hash` column is
/// kept as the message hash unless an earlier message already uses it;
/// otherwise one is synthesized from `cycle`. Hashes are unique across the
/// returned messages.
pub fn enrich_records<H: HashSource + ?Sized>(
    records: Vec<RawRecord>,
    positions: &EndpointPositions,
    hashes: &H,
    cycle: CycleId,
) -> Vec<FlowMessage> {
    let total = records.len();
    let mut seen = HashSet::with_capacity(total);
    let messages: Vec<FlowMessage> = records
        .into_iter()
        .filter(|r| {
            if r.is_empty() {
                tracing::trace!(row = r.row, "Dropping record with no attributes");
            }
            !r.is_empty()
        })
        .map(|r| enrich_record(r, positions, hashes, cycle, &mut seen))
        .collect();

    if messages.len() != total {
        tracing::debug!(
            kept = messages.len(),
            dropped = total - messages.len(),
            "Dropped empty records"
        );
    }
    messages
}

fn enrich_record<H: HashSource + ?Sized>(
    record: RawRecord,
    positions: &EndpointPositions,
    hashes: &H,
    cycle: CycleId,
    seen: &mut HashSet<String>,
) -> FlowMessage {
    let message_id = record.row;
    let mut msg = FlowMessage::new(message_id, String::new());
    let mut carried_hash = None;

    for (name, value) in record.into_fields() {
        let slot = match name.as_str() {
            "hash" => &mut carried_hash,
            "source" => &mut msg.source,
            "destination" => &mut msg.destination,
            "method" => &mut msg.method,
            "callid" => &mut msg.callid,
            "timestamp" => &mut msg.timestamp,
            "response_code" => &mut msg.response_code,
            computed if COMPUTED_FIELDS.contains(&computed) => {
                tracing::trace!(
                    row = message_id,
                    column = computed,
                    "Ignoring column shadowing a computed field"
                );
                continue;
            }
            _ => {
                msg.extra.insert(name, value);
                continue;
            }
        };
        *slot = value.to_text();
    }

    msg.source_position = positions.position_or_zero(msg.source.as_deref());
    msg.destination_position = positions.position_or_zero(msg.destination.as_deref());
    msg.hash = unique_hash(carried_hash, message_id, hashes, cycle, seen);
    msg
}

fn unique_hash<H: HashSource + ?Sized>(
    carried: Option<String>,
    message_id: usize,
    hashes: &H,
    cycle: CycleId,
    seen: &mut HashSet<String>,
) -> String {
    if let Some(hash) = carried.filter(|h| !h.is_empty()) {
        if seen.insert(hash.clone()) {
            return hash;
        }
        tracing::debug!(row = message_id, %hash, "Duplicate carried hash, synthesizing");
    }

    let base = hashes.message_hash(cycle, message_id);
    let mut hash = base.clone();
    let mut n = 1;
    while !seen.insert(hash.clone()) {
        hash = format!("{}_{}", base, n);
        n += 1;
    }
    hash
}
