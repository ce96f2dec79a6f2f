//! # sipflow-rs: SIP Message Flow Model
//!
//! Turns a tabular query result (one row per SIP message) into the data
//! behind a sequence-diagram panel: named endpoints as columns, messages as
//! arrows between them, plus the filtering, inspection and export hooks the
//! panel offers the user.
//!
//! ## Architecture
//!
//! - **Dataset**: the host's columnar result set ([`RawDataset`])
//! - **Pipeline**: normalize rows → rank endpoints → enrich messages →
//!   filter / facet ([`pipeline`])
//! - **Panel**: per-panel state driven by data refreshes and filter changes
//!   ([`FlowPanel`])
//! - **Bridge**: click and export notifications leave through an injected
//!   observer, typically a crossbeam channel ([`bridge`])
//! - **Display**: ordering, rows, method tones and detail entries ([`display`])
//!
//! ## Configuration
//!
//! Panel options are read from JSON or TOML; the CLI falls back to
//! `options.toml` in the platform config directory under
//! `dev.sipflow.sipflow-rs`.
//!
//! ## Example
//!
//! ```ignore
//! use sipflow_rs::{FlowBridge, FlowPanel, PanelOptions, RawDataset};
//!
//! let (bridge, events) = FlowBridge::new();
//! let mut panel = FlowPanel::new(PanelOptions::default(), bridge);
//!
//! panel.set_data(&RawDataset::load("capture.json")?);
//! panel.set_callid_filter("a84b4c76e66710");
//! for row in panel.rows() {
//!     println!("{}", row);
//! }
//!
//! panel.request_export(sipflow_rs::ExportFormat::Pcap);
//! let event = events.recv()?;
//! ```

pub mod bridge;
pub mod config;
pub mod dataset;
pub mod display;
pub mod error;
pub mod panel;
pub mod pipeline;
pub mod types;

// Re-export commonly used types
pub use bridge::{ExportFormat, FlowBridge, FlowEvent, FlowObserver};
pub use config::{PanelOptions, RuntimeSettings, SortOption};
pub use dataset::RawDataset;
pub use error::{FlowError, Result};
pub use panel::{EmptyState, FlowPanel, FlowStats};
pub use pipeline::{evaluate, Facets, FilterSpec, FlowModel};
pub use types::{ArrowDirection, FieldValue, FlowMessage};
