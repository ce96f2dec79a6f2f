//! Runtime settings that change while the panel is open
//!
//! Unlike [`PanelOptions`](super::PanelOptions), which the settings editor
//! owns, these belong to the user's current session: the active filters and
//! whether the filter panel is expanded. Nothing here is persisted by the
//! panel itself.

use crate::pipeline::FilterSpec;
use serde::{Deserialize, Serialize};

/// Session state of the filter UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeSettings {
    /// Whether the filter panel is expanded
    pub filters_visible: bool,

    /// Current filter selection
    pub filters: FilterSpec,
}

impl RuntimeSettings {
    /// Create new runtime settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand or collapse the filter panel
    pub fn toggle_filters_visible(&mut self) {
        self.filters_visible = !self.filters_visible;
    }

    /// Reset every filter to its identity value
    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Whether any filter is narrowing the view
    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active()
    }

    /// Label for the collapsed filter panel
    pub fn collapsed_label(&self) -> &'static str {
        if self.has_active_filters() {
            "Filters (Active)"
        } else {
            "Filters"
        }
    }

    /// Status line under the filter controls
    pub fn status_label(&self) -> &'static str {
        if self.has_active_filters() {
            "Filters Active"
        } else {
            "No Filters Applied"
        }
    }
}
