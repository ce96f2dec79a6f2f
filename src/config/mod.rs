//! Configuration module for sipflow-rs
//!
//! This module handles the panel options the dashboard's settings editor
//! writes and the panel reads:
//! - Labels and templates carried through for presentation
//! - Display ordering of the visible messages (`sortoption`)
//! - Display density (`isSimplify`)
//! - Runtime settings that change while the panel is open
//!
//! # Files
//!
//! Options are stored as JSON (the host's native form) or TOML, picked by
//! file extension. The CLI looks for a default options file in the
//! platform-appropriate config location:
//! - **Linux**: `~/.config/dev.sipflow.sipflow-rs/options.toml`
//! - **macOS**: `~/Library/Application Support/dev.sipflow.sipflow-rs/options.toml`
//! - **Windows**: `%APPDATA%\dev.sipflow.sipflow-rs\options.toml`
//!
//! # Example
//!
//! ```ignore
//! use sipflow_rs::config::{PanelOptions, SortOption};
//!
//! let mut options = PanelOptions::load_or_default("panel.json");
//! options.sortoption = SortOption::TimeNew;
//! options.save("panel.toml")?;
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{FlowError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Application identifier for config directories
pub const APP_ID: &str = "dev.sipflow.sipflow-rs";

/// Default options filename
pub const OPTIONS_FILE: &str = "options.toml";

/// Get the config directory for this application
pub fn app_config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Get the path to the default options file
pub fn default_options_path() -> Option<PathBuf> {
    app_config_dir().map(|p| p.join(OPTIONS_FILE))
}

// ==================== Option Values ====================

/// An option that the settings editor stores either as one string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Single(String),
    Multiple(Vec<String>),
}

impl Default for OptionValue {
    fn default() -> Self {
        OptionValue::Single(String::new())
    }
}

impl OptionValue {
    /// All values, empty strings dropped.
    pub fn values(&self) -> Vec<&str> {
        let all: Vec<&str> = match self {
            OptionValue::Single(s) => vec![s.as_str()],
            OptionValue::Multiple(v) => v.iter().map(String::as_str).collect(),
        };
        all.into_iter().filter(|s| !s.is_empty()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// First non-empty value.
    pub fn first(&self) -> Option<&str> {
        self.values().into_iter().next()
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Single(s.to_string())
    }
}

/// Display ordering of the visible messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Keep dataset row order
    #[default]
    None,
    /// Oldest timestamp first
    TimeOld,
    /// Newest timestamp first
    TimeNew,
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOption::None => write!(f, "none"),
            SortOption::TimeOld => write!(f, "time_old"),
            SortOption::TimeNew => write!(f, "time_new"),
        }
    }
}

impl FromStr for SortOption {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" | "" => Ok(SortOption::None),
            "time_old" => Ok(SortOption::TimeOld),
            "time_new" => Ok(SortOption::TimeNew),
            other => Err(FlowError::Config(format!("Unknown sort option: {}", other))),
        }
    }
}

// ==================== Panel Options ====================

/// Options of one flow panel, as written by the settings editor.
///
/// Only `sortoption` changes which messages come out and in what order;
/// the rest is carried for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelOptions {
    /// Diagram title template
    pub title: OptionValue,

    /// Label template drawn above each arrow
    pub above_arrow: OptionValue,

    /// Label template drawn below each arrow
    pub below_arrow: OptionValue,

    /// Columns shown in the detail view
    pub details: OptionValue,

    /// Label template for the source endpoint
    pub source_label: OptionValue,

    /// Label template for the destination endpoint
    pub destination_label: OptionValue,

    /// Column holding the source endpoint
    pub source: OptionValue,

    /// Column holding the destination endpoint
    pub destination: OptionValue,

    /// Display ordering
    #[serde(rename = "sortoption")]
    pub sortoption: SortOption,

    /// Column or template used to pick message colors
    pub color_generator: OptionValue,

    /// Show message bodies in the detail view
    #[serde(rename = "showbody")]
    pub showbody: bool,

    /// Compact rows without timestamp and callid
    pub is_simplify: bool,
}

impl PanelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| FlowError::Config(format!("Failed to parse panel options: {}", e)))
    }

    /// Parse options from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| FlowError::Config(format!("Failed to parse panel options: {}", e)))
    }

    /// Load options from disk; `.toml` files are TOML, everything else JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FlowError::Config(format!("Failed to read options file {:?}: {}", path, e))
        })?;

        if is_toml(path) {
            Self::from_toml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    /// Load options, returning defaults if any error occurs
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!("Using default panel options: {}", e);
                Self::default()
            }
        }
    }

    /// Save options to disk in the format implied by the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(FlowError::from)
                .with_context(|| format!("Failed to create options directory {:?}", parent))?;
        }

        let content = if is_toml(path) {
            toml::to_string_pretty(self)
                .map_err(|e| FlowError::Config(format!("Failed to serialize options: {}", e)))?
        } else {
            serde_json::to_string_pretty(self)
                .map_err(|e| FlowError::Config(format!("Failed to serialize options: {}", e)))?
        };

        std::fs::write(path, content)
            .map_err(FlowError::from)
            .with_context(|| format!("Failed to write options file {:?}", path))
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"))
}
