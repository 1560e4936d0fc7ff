//! Cell formatting
//!
//! Turns raw record values into display cells. Nothing here fails: a
//! value that is missing or cannot be shown in the column's format
//! becomes the configured placeholder.

use crate::config::RuntimeConfig;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use screenwright_core::{Tone, path};
use screenwright_ir::{ColumnConfig, ColumnFormat, EntityConfig};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::sync::Arc;
use tracing::warn;

// ============================================================================
// Cell
// ============================================================================

/// One rendered value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone: Some(tone),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ============================================================================
// CellRenderers
// ============================================================================

/// Renderer for `custom` columns: receives the cell value and its row
pub type CellRenderFn = Arc<dyn Fn(&Value, &Value) -> Option<Cell> + Send + Sync>;

/// Named renderers for `custom { renderer }` columns
#[derive(Clone, Default)]
pub struct CellRenderers {
    renderers: BTreeMap<String, CellRenderFn>,
}

impl CellRenderers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the stock `tag-list` renderer
    pub fn with_defaults() -> Self {
        Self::new().with_renderer("tag-list", |value, _row| {
            let Value::Array(items) = value else {
                return path::display_scalar(value).map(Cell::text);
            };
            let tags: Vec<String> = items
                .iter()
                .filter_map(|item| path::display_scalar(item).or_else(|| item.get("name").and_then(path::display_scalar)))
                .collect();
            (!tags.is_empty()).then(|| Cell::text(tags.join(", ")))
        })
    }

    pub fn with_renderer<F>(mut self, name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&Value, &Value) -> Option<Cell> + Send + Sync + 'static,
    {
        self.renderers.insert(name.into(), Arc::new(render));
        self
    }

    pub fn get(&self, name: &str) -> Option<&CellRenderFn> {
        self.renderers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }
}

impl fmt::Debug for CellRenderers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellRenderers")
            .field("renderers", &self.renderers.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// CellFormatter
// ============================================================================

/// Formats values per `ColumnFormat`
#[derive(Debug, Clone)]
pub struct CellFormatter {
    placeholder: String,
    currency_symbol: String,
    date_format: String,
    renderers: CellRenderers,
}

impl Default for CellFormatter {
    fn default() -> Self {
        Self::from_config(&RuntimeConfig::default())
    }
}

impl CellFormatter {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            placeholder: config.placeholder.clone(),
            currency_symbol: config.currency_symbol.clone(),
            date_format: config.date_format.clone(),
            renderers: CellRenderers::with_defaults(),
        }
    }

    pub fn with_renderers(mut self, renderers: CellRenderers) -> Self {
        self.renderers = renderers;
        self
    }

    pub fn placeholder(&self) -> Cell {
        Cell::text(&self.placeholder)
    }

    /// Format the column's value read from `row`
    ///
    /// `entity` supplies status styles for `status` columns.
    pub fn column_cell(&self, column: &ColumnConfig, row: &Value, entity: &EntityConfig) -> Cell {
        let value = path::lookup(row, column.value_path()).filter(|v| !v.is_null());
        let Some(value) = value else {
            return self.placeholder();
        };

        let cell = match &column.format {
            ColumnFormat::Status => path::display_scalar(value).map(|code| {
                let style = entity.status_style(&code);
                Cell::toned(style.label, style.tone)
            }),
            ColumnFormat::Badge => path::display_scalar(value).map(|raw| match column.option_for(&raw) {
                Some(option) => Cell::toned(&option.label, option.tone),
                None => Cell::toned(raw, Tone::Neutral),
            }),
            ColumnFormat::Custom { renderer } => match self.renderers.get(renderer) {
                Some(render) => render(value, row),
                None => {
                    warn!(renderer = %renderer, column = %column.key, "No cell renderer registered");
                    None
                }
            },
            format => self.format_value(format, value).map(Cell::text),
        };
        cell.unwrap_or_else(|| self.placeholder())
    }

    /// Plain-text formatting; `None` when the value cannot be shown
    pub fn format_value(&self, format: &ColumnFormat, value: &Value) -> Option<String> {
        match format {
            ColumnFormat::Text | ColumnFormat::Status | ColumnFormat::Badge | ColumnFormat::Custom { .. } => {
                path::display_scalar(value)
            }
            ColumnFormat::Number => path::as_f64(value).map(format_number),
            ColumnFormat::Currency => path::as_f64(value).map(|n| self.format_currency(n)),
            ColumnFormat::Percentage => path::as_f64(value).map(format_percentage),
            ColumnFormat::Date => value.as_str().and_then(|s| self.format_date(s)),
            ColumnFormat::Boolean => value.as_bool().map(|b| if b { "Yes" } else { "No" }.to_string()),
        }
    }

    /// Format text or the placeholder
    pub fn format_or_placeholder(&self, format: &ColumnFormat, value: Option<&Value>) -> String {
        value
            .and_then(|v| self.format_value(format, v))
            .unwrap_or_else(|| self.placeholder.clone())
    }

    fn format_currency(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        format!("{}{}{}", sign, self.currency_symbol, group_digits(amount.abs(), 2))
    }

    /// RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS`, or `YYYY-MM-DD`
    pub fn format_date(&self, text: &str) -> Option<String> {
        let text = text.trim();
        let date = DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
            .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
            .ok()?;
        let mut out = String::new();
        match write!(out, "{}", date.format(&self.date_format)) {
            Ok(()) => Some(out),
            Err(_) => {
                warn!(format = %self.date_format, "Invalid date format");
                None
            }
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        group_digits(n, 0)
    } else {
        group_digits(n, 2)
    }
}

fn format_percentage(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.0}%", n)
    } else {
        format!("{:.1}%", n)
    }
}

/// Thousands separators on the integer part
fn group_digits(n: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if n < 0.0 { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use screenwright_ir::BadgeOption;
    use screenwright_ir::builtin::entities;
    use serde_json::json;

    fn formatter() -> CellFormatter {
        CellFormatter::default()
    }

    #[test]
    fn test_missing_value_is_placeholder() {
        let column = ColumnConfig::new("billRate").with_format(ColumnFormat::Currency);
        let job = entities::job();
        let f = formatter();

        assert_eq!(f.column_cell(&column, &json!({}), &job).text, "—");
        assert_eq!(f.column_cell(&column, &json!({ "billRate": null }), &job).text, "—");
        assert_eq!(f.column_cell(&column, &json!({ "billRate": "lots" }), &job).text, "—");
        assert_eq!(f.column_cell(&column, &json!("not an object"), &job).text, "—");
    }

    #[test]
    fn test_invalid_date_format_is_placeholder() {
        let f = CellFormatter::from_config(&RuntimeConfig::default().with_date_format("%Q"));
        assert_eq!(f.format_value(&ColumnFormat::Date, &json!("2024-03-05")), None);

        let column = ColumnConfig::new("createdAt").with_format(ColumnFormat::Date);
        let job = entities::job();
        assert_eq!(f.column_cell(&column, &json!({ "createdAt": "2024-03-05" }), &job).text, "—");
    }

    #[test]
    fn test_numeric_formats() {
        let f = formatter();
        assert_eq!(f.format_value(&ColumnFormat::Currency, &json!(1234.5)).unwrap(), "$1,234.50");
        assert_eq!(f.format_value(&ColumnFormat::Currency, &json!(-95)).unwrap(), "-$95.00");
        assert_eq!(f.format_value(&ColumnFormat::Number, &json!(1250000)).unwrap(), "1,250,000");
        assert_eq!(f.format_value(&ColumnFormat::Number, &json!("1234.5")).unwrap(), "1,234.50");
        assert_eq!(f.format_value(&ColumnFormat::Percentage, &json!(85)).unwrap(), "85%");
        assert_eq!(f.format_value(&ColumnFormat::Percentage, &json!(12.5)).unwrap(), "12.5%");
    }

    #[test]
    fn test_dates_and_booleans() {
        let f = formatter();
        assert_eq!(f.format_value(&ColumnFormat::Date, &json!("2024-03-05")).unwrap(), "Mar 05, 2024");
        assert_eq!(
            f.format_value(&ColumnFormat::Date, &json!("2024-03-05T14:30:00Z")).unwrap(),
            "Mar 05, 2024"
        );
        assert_eq!(f.format_value(&ColumnFormat::Date, &json!("yesterday")), None);
        assert_eq!(f.format_value(&ColumnFormat::Boolean, &json!(true)).unwrap(), "Yes");
        assert_eq!(f.format_value(&ColumnFormat::Boolean, &json!("true")), None);
    }

    #[test]
    fn test_badge_unmapped_value_is_verbatim_and_neutral() {
        let column = ColumnConfig::new("status").badge(vec![BadgeOption::new("placed", "Placed", Tone::Green)]);
        let job = entities::job();
        let f = formatter();

        assert_eq!(
            f.column_cell(&column, &json!({ "status": "placed" }), &job),
            Cell::toned("Placed", Tone::Green)
        );
        assert_eq!(
            f.column_cell(&column, &json!({ "status": "withdrawn" }), &job),
            Cell::toned("withdrawn", Tone::Neutral)
        );
    }

    #[test]
    fn test_status_uses_entity_config_with_fallback() {
        let column = ColumnConfig::new("status").with_format(ColumnFormat::Status);
        let job = entities::job();
        let f = formatter();

        let open = f.column_cell(&column, &json!({ "status": "open" }), &job);
        assert_eq!(open, Cell::toned("Open", Tone::Blue));

        let unknown = f.column_cell(&column, &json!({ "status": "on_ice" }), &job);
        assert_eq!(unknown, Cell::toned("On Ice", Tone::Neutral));
    }

    #[test]
    fn test_custom_renderers() {
        let job = entities::job();
        let tags = ColumnConfig::new("skills").rendered_by("tag-list");
        let unknown = ColumnConfig::new("skills").rendered_by("sparkline");
        let f = formatter();
        let row = json!({ "skills": ["Java", { "name": "Kotlin" }, 3] });

        assert_eq!(f.column_cell(&tags, &row, &job).text, "Java, Kotlin, 3");
        assert_eq!(f.column_cell(&unknown, &row, &job).text, "—");

        let f = formatter().with_renderers(
            CellRenderers::new().with_renderer("sparkline", |v, _| Some(Cell::text(format!("{} pts", v.as_array()?.len())))),
        );
        assert_eq!(f.column_cell(&unknown, &row, &job).text, "3 pts");
    }

    #[test]
    fn test_configured_placeholder() {
        let f = CellFormatter::from_config(&RuntimeConfig::default().with_placeholder("n/a"));
        assert_eq!(f.format_or_placeholder(&ColumnFormat::Text, None), "n/a");
        assert_eq!(f.format_or_placeholder(&ColumnFormat::Text, Some(&json!("x"))), "x");
    }
}
