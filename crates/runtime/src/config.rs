//! Runtime configuration
//!
//! Loaded from a TOML file; every field has a default so an empty file
//! (or no file at all) yields a working configuration.

use chrono::format::{Item, StrftimeItems};
use screenwright_core::{ScreenError, ScreenResult, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for the screen runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Text shown for missing or unrenderable values
    pub placeholder: String,

    /// Prefix for currency cells
    pub currency_symbol: String,

    /// `chrono` format string for date cells
    pub date_format: String,

    /// Page size for list data sources that declare none
    pub default_page_size: u32,

    /// Where wizard drafts are kept
    pub draft_store: DraftStoreConfig,

    /// Whether successful mutations publish their success message
    pub toast_on_success: bool,

    /// Custom options
    pub options: BTreeMap<String, String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            placeholder: "—".to_string(),
            currency_symbol: "$".to_string(),
            date_format: "%b %d, %Y".to_string(),
            default_page_size: 25,
            draft_store: DraftStoreConfig::Memory,
            toast_on_success: true,
            options: BTreeMap::new(),
        }
    }
}

impl RuntimeConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> ScreenResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> ScreenResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ScreenError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "Loaded runtime config");
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> ScreenResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn with_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size;
        self
    }

    /// Keep drafts in a JSON file
    pub fn with_file_drafts(mut self, path: impl Into<PathBuf>) -> Self {
        self.draft_store = DraftStoreConfig::File { path: path.into() };
        self
    }

    /// Do not publish success toasts after mutations
    pub fn without_success_toasts(mut self) -> Self {
        self.toast_on_success = false;
        self
    }

    /// Set a custom option
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

impl Validatable for RuntimeConfig {
    fn validate(&self) -> ScreenResult<()> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ScreenError::InvalidConfig(format!(
                "date_format '{}' is not a valid chrono format",
                self.date_format
            )));
        }
        Ok(())
    }
}

/// Draft store backend selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DraftStoreConfig {
    #[default]
    Memory,
    File {
        path: PathBuf,
    },
}

// ============================================================================
// Tests
// ============================================================================
