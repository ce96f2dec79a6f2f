//! Boundary between the flow panel and the host dashboard.
//!
//! User interactions leave the panel as [`FlowEvent`]s handed to an injected
//! [`FlowObserver`]. Delivery is fire-and-forget: nothing is returned,
//! nothing is retried, and the pipeline never reads anything back.
//!
//! [`FlowBridge`] is the channel-backed observer: the panel keeps the
//! sending half and the host drains the receiver.

use crate::error::{FlowError, Result};
use crate::types::FlowMessage;
use crossbeam_channel::{unbounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

/// Event name emitted when a message is clicked.
pub const FLOW_ITEM_CLICK: &str = "flow-item-click";

/// Prefix of export event names; the format is appended.
pub const EXPORT_EVENT_PREFIX: &str = "export-flow-as-";

/// Export formats the host knows how to encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Txt,
    Pcap,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Txt, ExportFormat::Pcap];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Txt => "txt",
            ExportFormat::Pcap => "pcap",
        }
    }

    /// Host event name, e.g. `export-flow-as-pcap`.
    pub fn event_name(&self) -> String {
        format!("{}{}", EXPORT_EVENT_PREFIX, self.as_str())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "txt" => Ok(ExportFormat::Txt),
            "pcap" => Ok(ExportFormat::Pcap),
            other => Err(FlowError::Config(format!("Unknown export format: {}", other))),
        }
    }
}

/// Outward notification from the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    /// A message was clicked for inspection.
    ItemClick { hash: String, item: FlowMessage },

    /// An export was requested; `data` is the visible list at request time.
    Export {
        format: ExportFormat,
        data: Vec<FlowMessage>,
    },
}

impl FlowEvent {
    pub fn item_click(item: &FlowMessage) -> Self {
        FlowEvent::ItemClick {
            hash: item.hash.clone(),
            item: item.clone(),
        }
    }

    /// Export event holding an owned copy of `visible`.
    pub fn export(format: ExportFormat, visible: &[FlowMessage]) -> Self {
        FlowEvent::Export {
            format,
            data: visible.to_vec(),
        }
    }

    /// Host event name.
    pub fn name(&self) -> String {
        match self {
            FlowEvent::ItemClick { .. } => FLOW_ITEM_CLICK.to_string(),
            FlowEvent::Export { format, .. } => format.event_name(),
        }
    }

    /// Event detail in the host's JSON shape.
    pub fn payload(&self) -> Result<serde_json::Value> {
        Ok(match self {
            FlowEvent::ItemClick { hash, item } => {
                let item = serde_json::to_value(item)?;
                json!({ "hash": hash, "item": item })
            }
            FlowEvent::Export { data, .. } => {
                let data = serde_json::to_value(data)?;
                json!({ "data": data })
            }
        })
    }

    /// `{"event": <name>, "detail": <payload>}` envelope.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let detail = self.payload()?;
        Ok(json!({ "event": self.name(), "detail": detail }))
    }
}

/// Receives panel notifications.
pub trait FlowObserver {
    fn notify(&self, event: FlowEvent);
}

impl<T: FlowObserver + ?Sized> FlowObserver for &T {
    fn notify(&self, event: FlowEvent) {
        (**self).notify(event)
    }
}

impl<T: FlowObserver + ?Sized> FlowObserver for Box<T> {
    fn notify(&self, event: FlowEvent) {
        (**self).notify(event)
    }
}

/// Observer that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl FlowObserver for NullObserver {
    fn notify(&self, _event: FlowEvent) {}
}

/// Observer that keeps every event in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: std::cell::RefCell<Vec<FlowEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FlowEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<FlowEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl FlowObserver for RecordingObserver {
    fn notify(&self, event: FlowEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Channel-backed observer.
///
/// Never blocks the panel: a full or disconnected channel drops the event
/// with a warning.
#[derive(Debug, Clone)]
pub struct FlowBridge {
    tx: Sender<FlowEvent>,
}

impl FlowBridge {
    /// Create a bridge over an unbounded channel.
    pub fn new() -> (Self, Receiver<FlowEvent>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }

    /// Wrap an existing sender (bounded channels drop when full).
    pub fn from_sender(tx: Sender<FlowEvent>) -> Self {
        Self { tx }
    }

    /// Send without blocking, reporting why delivery failed.
    pub fn try_notify(&self, event: FlowEvent) -> Result<()> {
        self.tx.try_send(event).map_err(|e| match e {
            TrySendError::Full(ev) => {
                FlowError::Channel(format!("channel full, dropped {}", ev.name()))
            }
            TrySendError::Disconnected(ev) => {
                FlowError::Channel(format!("receiver gone, dropped {}", ev.name()))
            }
        })
    }
}

impl FlowObserver for FlowBridge {
    fn notify(&self, event: FlowEvent) {
        if let Err(e) = self.try_notify(event) {
            tracing::warn!("Failed to deliver flow event: {}", e);
        }
    }
}
