//! Flow panel state.
//!
//! [`FlowPanel`] owns everything one dashboard panel needs between host
//! events: the latest [`FlowModel`], the user's filter selection, the panel
//! options and the observer that receives click/export notifications.
//!
//! Two events drive it:
//! - a dataset refresh ([`FlowPanel::set_data`]) rebuilds the model in a new
//!   render cycle;
//! - a filter change (any setter) recomputes the visible list.
//!
//! Both recompute synchronously; the visible list is always consistent with
//! the latest dataset and filters.

use crate::bridge::{ExportFormat, FlowEvent, FlowObserver};
use crate::config::{PanelOptions, RuntimeSettings};
use crate::dataset::RawDataset;
use crate::display::{self, FlowRow};
use crate::pipeline::{CycleCounter, Facets, FilterSpec, FlowModel, HashSource};
use crate::types::FlowMessage;
use serde::Serialize;
use std::fmt;

/// Visible vs. total message count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowStats {
    pub visible: usize,
    pub total: usize,
}

impl fmt::Display for FlowStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} of {} messages)", self.visible, self.total)
    }
}

/// Why nothing is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmptyState {
    /// The query returned no messages
    NoData,
    /// Messages exist but every one is filtered out
    AllFiltered,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoData => "No data received from query",
            EmptyState::AllFiltered => "All messages filtered out",
        }
    }
}

impl fmt::Display for EmptyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// State of one flow panel.
pub struct FlowPanel<O: FlowObserver, H: HashSource = CycleCounter> {
    options: PanelOptions,
    settings: RuntimeSettings,
    hashes: H,
    observer: O,
    model: FlowModel,
    visible: Vec<FlowMessage>,
}

impl<O: FlowObserver> FlowPanel<O> {
    /// Panel with a fresh cycle counter.
    pub fn new(options: PanelOptions, observer: O) -> Self {
        Self::with_hash_source(options, observer, CycleCounter::new())
    }
}

impl<O: FlowObserver, H: HashSource> FlowPanel<O, H> {
    /// Panel with a caller-provided hash source.
    pub fn with_hash_source(options: PanelOptions, observer: O, hashes: H) -> Self {
        Self {
            options,
            settings: RuntimeSettings::default(),
            hashes,
            observer,
            model: FlowModel::default(),
            visible: Vec::new(),
        }
    }

    // ==================== Host events ====================

    /// Rebuild the model from a fresh dataset.
    pub fn set_data(&mut self, dataset: &RawDataset) {
        self.model = FlowModel::build(dataset, &mut self.hashes);
        self.recompute();
    }

    /// Replace the panel options; only the display order can change.
    pub fn set_options(&mut self, options: PanelOptions) {
        self.options = options;
        self.recompute();
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    // ==================== Filter UI ====================

    pub fn filters(&self) -> &FilterSpec {
        &self.settings.filters
    }

    pub fn set_filters(&mut self, spec: FilterSpec) {
        if spec != self.settings.filters {
            self.settings.filters = spec;
            self.recompute();
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.update_filters(|f| f.search_term = term.into());
    }

    pub fn toggle_method(&mut self, method: &str, checked: bool) {
        self.update_filters(|f| f.toggle_method(method, checked));
    }

    pub fn set_source_filter(&mut self, source: impl Into<String>) {
        self.update_filters(|f| f.source_filter = source.into());
    }

    pub fn set_destination_filter(&mut self, destination: impl Into<String>) {
        self.update_filters(|f| f.destination_filter = destination.into());
    }

    pub fn set_callid_filter(&mut self, callid: impl Into<String>) {
        self.update_filters(|f| f.callid_filter = callid.into());
    }

    pub fn set_show_only_errors(&mut self, only_errors: bool) {
        self.update_filters(|f| f.show_only_errors = only_errors);
    }

    /// Reset every filter to its identity value.
    pub fn clear_filters(&mut self) {
        if self.settings.has_active_filters() {
            self.settings.clear_filters();
            self.recompute();
        }
    }

    pub fn has_active_filters(&self) -> bool {
        self.settings.has_active_filters()
    }

    pub fn toggle_filters_visible(&mut self) {
        self.settings.toggle_filters_visible();
    }

    pub fn filters_visible(&self) -> bool {
        self.settings.filters_visible
    }

    pub fn settings(&self) -> &RuntimeSettings {
        &self.settings
    }

    fn update_filters(&mut self, f: impl FnOnce(&mut FilterSpec)) {
        let mut spec = self.settings.filters.clone();
        f(&mut spec);
        self.set_filters(spec);
    }

    // ==================== Views ====================

    pub fn model(&self) -> &FlowModel {
        &self.model
    }

    /// Visible messages in display order.
    pub fn visible(&self) -> &[FlowMessage] {
        &self.visible
    }

    /// Sorted endpoint names for the diagram header.
    pub fn hosts(&self) -> &[String] {
        self.model.hosts()
    }

    /// Filter choices, independent of the active filters.
    pub fn facets(&self) -> &Facets {
        &self.model.facets
    }

    pub fn stats(&self) -> FlowStats {
        FlowStats {
            visible: self.visible.len(),
            total: self.model.len(),
        }
    }

    /// `None` while at least one message is visible.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.visible.is_empty() {
            None
        } else if self.model.is_empty() {
            Some(EmptyState::NoData)
        } else {
            Some(EmptyState::AllFiltered)
        }
    }

    /// Diagram rows for the visible messages.
    pub fn rows(&self) -> Vec<FlowRow> {
        display::rows(&self.visible, self.options.is_simplify)
    }

    pub fn find_visible(&self, hash: &str) -> Option<&FlowMessage> {
        self.visible.iter().find(|m| m.hash == hash)
    }

    // ==================== Interactions ====================

    /// Notify that a visible message was clicked. Unknown hashes are ignored.
    pub fn select(&self, hash: &str) -> bool {
        match self.find_visible(hash) {
            Some(msg) => {
                self.notify_message_selected(msg);
                true
            }
            None => {
                tracing::debug!(hash, "Ignoring click on unknown message");
                false
            }
        }
    }

    pub fn notify_message_selected(&self, msg: &FlowMessage) {
        tracing::debug!(hash = %msg.hash, "Message selected");
        self.observer.notify(FlowEvent::item_click(msg));
    }

    /// Notify that an export of the current visible list was requested.
    pub fn request_export(&self, format: ExportFormat) {
        tracing::info!(%format, messages = self.visible.len(), "Export requested");
        self.observer
            .notify(FlowEvent::export(format, &self.visible));
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    fn recompute(&mut self) {
        let mut visible = self.model.filtered(&self.settings.filters);
        display::sort_messages(&mut visible, self.options.sortoption);
        self.visible = visible;
    }
}

impl<O: FlowObserver + fmt::Debug, H: HashSource> fmt::Debug for FlowPanel<O, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowPanel")
            .field("options", &self.options)
            .field("settings", &self.settings)
            .field("observer", &self.observer)
            .field("stats", &self.stats())
            .finish()
    }
}
