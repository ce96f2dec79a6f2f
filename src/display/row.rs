//! One rendered diagram row.
//!
//! A [`FlowRow`] carries exactly what a row shows: index, endpoints, arrow,
//! method badge and, unless the panel is simplified, time and Call-ID.

use crate::display::timestamp::format_time_of_day;
use crate::display::tone::MethodTone;
use crate::types::{ArrowDirection, FlowMessage};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowRow {
    /// 1-based position in the visible list
    pub index: usize,
    pub hash: String,
    pub source: String,
    pub destination: String,
    pub arrow: ArrowDirection,
    pub method: Option<String>,
    pub tone: MethodTone,
    pub time: Option<String>,
    pub callid: Option<String>,
}

impl FlowRow {
    /// Row for the message at `position` (0-based) in the visible list.
    pub fn new(position: usize, msg: &FlowMessage, simplify: bool) -> Self {
        let detail = |v: &Option<String>| {
            if simplify {
                None
            } else {
                v.clone().filter(|s| !s.is_empty())
            }
        };
        Self {
            index: position + 1,
            hash: msg.hash.clone(),
            source: msg.source.clone().unwrap_or_default(),
            destination: msg.destination.clone().unwrap_or_default(),
            arrow: msg.arrow_direction(),
            method: msg.method.clone().filter(|m| !m.is_empty()),
            tone: MethodTone::for_method(msg.method.as_deref().unwrap_or("")),
            time: detail(&msg.timestamp).map(|t| format_time_of_day(&t)),
            callid: detail(&msg.callid),
        }
    }
}

impl fmt::Display for FlowRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.arrow {
            ArrowDirection::Right => "──►",
            ArrowDirection::Left => "◄──",
            ArrowDirection::Bidirectional => "◄─►",
        };
        write!(
            f,
            "#{:<4} {:>16} {} {:<16} {}",
            self.index,
            self.source,
            arrow,
            self.destination,
            self.method.as_deref().unwrap_or("")
        )?;
        if let Some(time) = &self.time {
            write!(f, "  {}", time)?;
        }
        if let Some(callid) = &self.callid {
            write!(f, "  Call-ID: {}", callid)?;
        }
        Ok(())
    }
}

/// Rows for a visible message list.
pub fn rows(messages: &[FlowMessage], simplify: bool) -> Vec<FlowRow> {
    messages
        .iter()
        .enumerate()
        .map(|(i, m)| FlowRow::new(i, m, simplify))
        .collect()
}
