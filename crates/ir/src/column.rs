//! Column definitions for tables and info cards
//!
//! A `ColumnConfig` names a value in a record, how to label it, and how to
//! turn the raw value into display text. The same type describes table
//! columns, list-view columns, and info-card fields.

use heck::ToTitleCase;
use screenwright_core::{ScreenError, ScreenResult, Tone, Validatable};
use serde::{Deserialize, Serialize};

// ============================================================================
// ColumnConfig
// ============================================================================

/// One displayable value of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    /// Column key, unique within a table
    pub key: String,

    /// Header / field label
    pub label: String,

    /// Path into the record; defaults to `key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// How the raw value is rendered
    #[serde(default)]
    pub format: ColumnFormat,

    /// Badge mapping for `badge` columns
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<BadgeOption>,

    #[serde(default)]
    pub sortable: bool,

    #[serde(default)]
    pub align: Align,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

impl ColumnConfig {
    /// Create a text column; the label is derived from the key
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let label = key.to_title_case();
        Self {
            key,
            label,
            path: None,
            format: ColumnFormat::Text,
            options: Vec::new(),
            sortable: false,
            align: Align::Left,
            width: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_format(mut self, format: ColumnFormat) -> Self {
        if matches!(
            format,
            ColumnFormat::Currency | ColumnFormat::Number | ColumnFormat::Percentage
        ) {
            self.align = Align::Right;
        }
        self.format = format;
        self
    }

    /// Render through a named custom renderer
    pub fn rendered_by(self, renderer: impl Into<String>) -> Self {
        self.with_format(ColumnFormat::Custom {
            renderer: renderer.into(),
        })
    }

    /// Badge column with the given value → label/tone mapping
    pub fn badge(mut self, options: Vec<BadgeOption>) -> Self {
        self.format = ColumnFormat::Badge;
        self.options = options;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Path used to read the value from a record
    pub fn value_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.key)
    }

    /// Badge option for a raw value, if one is declared
    pub fn option_for(&self, raw: &str) -> Option<&BadgeOption> {
        self.options.iter().find(|o| o.value == raw)
    }
}

impl Validatable for ColumnConfig {
    fn validate(&self) -> ScreenResult<()> {
        if self.key.trim().is_empty() {
            return Err(ScreenError::validation("Column key cannot be empty"));
        }
        if self.format == ColumnFormat::Badge && self.options.is_empty() {
            return Err(ScreenError::validation(format!(
                "Badge column '{}' declares no options",
                self.key
            )));
        }
        if let ColumnFormat::Custom { renderer } = &self.format {
            if renderer.trim().is_empty() {
                return Err(ScreenError::validation(format!(
                    "Column '{}' has an empty renderer name",
                    self.key
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// ColumnFormat
// ============================================================================

/// Rendering rule for a raw value
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnFormat {
    #[default]
    Text,
    Number,
    Currency,
    Percentage,
    Date,
    Boolean,
    /// Uses the owning entity's status configuration
    Status,
    /// Uses the column's own `options`
    Badge,
    /// Delegates to a renderer registered by name
    Custom { renderer: String },
}

// ============================================================================
// BadgeOption
// ============================================================================

/// Mapping from a raw enum value to a label and tone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub tone: Tone,
}

impl BadgeOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, tone: Tone) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            tone,
        }
    }
}

// ============================================================================
// Align
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_derived_from_key() {
        let column = ColumnConfig::new("positions_available");
        assert_eq!(column.label, "Positions Available");
        assert_eq!(column.value_path(), "positions_available");
    }

    #[test]
    fn test_path_override() {
        let column = ColumnConfig::new("account").with_path("account.name");
        assert_eq!(column.value_path(), "account.name");
    }

    #[test]
    fn test_numeric_formats_align_right() {
        let column = ColumnConfig::new("billing_rate").with_format(ColumnFormat::Currency);
        assert_eq!(column.align, Align::Right);
        let column = ColumnConfig::new("title").with_format(ColumnFormat::Date);
        assert_eq!(column.align, Align::Left);
    }

    #[test]
    fn test_badge_options() {
        let column = ColumnConfig::new("priority").badge(vec![
            BadgeOption::new("high", "High", Tone::Amber),
            BadgeOption::new("urgent", "Urgent", Tone::Red),
        ]);
        assert_eq!(column.option_for("urgent").map(|o| o.tone), Some(Tone::Red));
        assert!(column.option_for("low").is_none());
        assert!(column.is_valid());
    }

    #[test]
    fn test_validation() {
        assert!(!ColumnConfig::new("  ").is_valid());
        assert!(!ColumnConfig::new("kind").badge(vec![]).is_valid());
        assert!(!ColumnConfig::new("x").rendered_by("").is_valid());
        assert!(ColumnConfig::new("x").rendered_by("salary-range").is_valid());
    }

    #[test]
    fn test_format_serde_shapes() {
        let json = serde_json::to_string(&ColumnFormat::Currency).unwrap();
        assert_eq!(json, "\"currency\"");

        let custom: ColumnFormat =
            serde_json::from_str(r#"{"custom":{"renderer":"salary-range"}}"#).unwrap();
        assert_eq!(
            custom,
            ColumnFormat::Custom {
                renderer: "salary-range".to_string()
            }
        );

        let column: ColumnConfig =
            serde_json::from_str(r#"{"key":"status","label":"Status","format":"status"}"#)
                .unwrap();
        assert_eq!(column.format, ColumnFormat::Status);
        assert!(!column.sortable);
    }
}
