//! Display ordering of the visible messages.

use crate::config::SortOption;
use crate::display::timestamp::parse_timestamp;
use crate::types::FlowMessage;
use std::cmp::Ordering;

/// Reorder messages for display.
///
/// Stable: equal or unparseable timestamps keep their relative order, and
/// messages without a usable timestamp always go last.
pub fn sort_messages(messages: &mut [FlowMessage], option: SortOption) {
    if option == SortOption::None {
        return;
    }

    let mut keyed: Vec<_> = messages
        .iter()
        .map(|m| m.timestamp.as_deref().and_then(parse_timestamp))
        .zip(messages.iter().cloned())
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => match option {
            SortOption::TimeNew => b.cmp(a),
            _ => a.cmp(b),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    for (slot, (_, msg)) in messages.iter_mut().zip(keyed) {
        *slot = msg;
    }
}
