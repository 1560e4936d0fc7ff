//! Layout trees
//!
//! A screen's layout is a small tree: a layout variant holding tabs and
//! sections, where each section is one widget kind (table, metrics grid,
//! timeline, info card, or an opaque custom component).

use crate::action::ActionDescriptor;
use crate::binding::Binding;
use crate::column::{ColumnConfig, ColumnFormat};
use crate::condition::Visibility;
use crate::data_source::DataSource;
use screenwright_core::{Identifiable, Tone};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Layout
// ============================================================================

/// Top-level arrangement of a screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Layout {
    SingleColumn { sections: Vec<Section> },
    SidebarMain { sidebar: Box<Section>, tabs: Vec<Tab> },
    Tabs { tabs: Vec<Tab> },
}

impl Layout {
    /// All sections in document order, including those inside tabs
    pub fn sections(&self) -> Vec<&Section> {
        match self {
            Layout::SingleColumn { sections } => sections.iter().collect(),
            Layout::SidebarMain { sidebar, tabs } => std::iter::once(sidebar.as_ref())
                .chain(tabs.iter().flat_map(|t| t.sections.iter()))
                .collect(),
            Layout::Tabs { tabs } => tabs.iter().flat_map(|t| t.sections.iter()).collect(),
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        match self {
            Layout::SingleColumn { .. } => &[],
            Layout::SidebarMain { tabs, .. } | Layout::Tabs { tabs } => tabs,
        }
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections().into_iter().find(|s| s.id == id)
    }
}

// ============================================================================
// Tab
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<Visibility>,
}

impl Tab {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            sections: Vec::new(),
            actions: Vec::new(),
            visible: None,
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_action(mut self, action: ActionDescriptor) -> Self {
        self.actions.push(action);
        self
    }

    pub fn visible_when(mut self, rule: Visibility) -> Self {
        self.visible = Some(rule);
        self
    }
}

impl Identifiable for Tab {
    fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// Section
// ============================================================================

/// One widget in the layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub kind: SectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionDescriptor>,
    #[serde(default)]
    pub collapsible: bool,
}

impl Section {
    pub fn new(id: impl Into<String>, kind: SectionKind) -> Self {
        Self {
            id: id.into(),
            title: None,
            kind,
            visible: None,
            data_source: None,
            actions: Vec::new(),
            collapsible: false,
        }
    }

    pub fn table(id: impl Into<String>, columns: Vec<ColumnConfig>) -> Self {
        Self::new(
            id,
            SectionKind::Table {
                columns,
                empty_message: None,
            },
        )
    }

    pub fn metrics(id: impl Into<String>, metrics: Vec<MetricConfig>) -> Self {
        Self::new(id, SectionKind::MetricsGrid { metrics })
    }

    pub fn info_card(id: impl Into<String>, fields: Vec<ColumnConfig>) -> Self {
        Self::new(id, SectionKind::InfoCard { fields })
    }

    pub fn timeline(
        id: impl Into<String>,
        title_path: impl Into<String>,
        timestamp_path: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            SectionKind::Timeline {
                title_path: title_path.into(),
                timestamp_path: timestamp_path.into(),
                description_path: None,
            },
        )
    }

    pub fn custom(id: impl Into<String>, component: impl Into<String>, props: Value) -> Self {
        Self::new(
            id,
            SectionKind::Custom {
                component: component.into(),
                props,
            },
        )
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn visible_when(mut self, rule: Visibility) -> Self {
        self.visible = Some(rule);
        self
    }

    pub fn from_source(mut self, source: DataSource) -> Self {
        self.data_source = Some(source);
        self
    }

    pub fn with_action(mut self, action: ActionDescriptor) -> Self {
        self.actions.push(action);
        self
    }

    pub fn collapsible(mut self) -> Self {
        self.collapsible = true;
        self
    }

    /// Message shown by an empty table
    pub fn when_empty(mut self, message: impl Into<String>) -> Self {
        if let SectionKind::Table { empty_message, .. } = &mut self.kind {
            *empty_message = Some(message.into());
        }
        self
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }
}

impl Identifiable for Section {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Widget kind and its configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum SectionKind {
    Table {
        columns: Vec<ColumnConfig>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        empty_message: Option<String>,
    },
    MetricsGrid {
        metrics: Vec<MetricConfig>,
    },
    Timeline {
        title_path: String,
        timestamp_path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description_path: Option<String>,
    },
    InfoCard {
        fields: Vec<ColumnConfig>,
    },
    Custom {
        component: String,
        #[serde(default)]
        props: Value,
    },
}

impl SectionKind {
    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Table { .. } => "table",
            SectionKind::MetricsGrid { .. } => "metrics-grid",
            SectionKind::Timeline { .. } => "timeline",
            SectionKind::InfoCard { .. } => "info-card",
            SectionKind::Custom { .. } => "custom",
        }
    }
}

// ============================================================================
// Metrics
// ============================================================================

/// One tile of a metrics grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricConfig {
    pub id: String,
    pub label: String,
    pub current: Binding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Binding>,
    #[serde(default)]
    pub format: ColumnFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Thresholds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl MetricConfig {
    /// Metric reading `<path>.current` and `<path>.target`
    pub fn progress(id: impl Into<String>, label: impl Into<String>, path: &str) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            current: Binding::field(format!("{}.current", path)),
            target: Some(Binding::field(format!("{}.target", path))),
            format: ColumnFormat::Number,
            thresholds: Some(Thresholds::default()),
            icon: None,
        }
    }

    /// Metric with a single value and no target
    pub fn value(id: impl Into<String>, label: impl Into<String>, path: &str) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            current: Binding::field(path),
            target: None,
            format: ColumnFormat::Number,
            thresholds: None,
            icon: None,
        }
    }

    pub fn with_format(mut self, format: ColumnFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_thresholds(mut self, green: f64, yellow: f64) -> Self {
        self.thresholds = Some(Thresholds { green, yellow });
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Percent-of-target bands for coloring a metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub green: f64,
    pub yellow: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            green: 100.0,
            yellow: 50.0,
        }
    }
}

impl Thresholds {
    /// Tone for a percent-of-target
    pub fn tone(&self, percent: f64) -> Tone {
        if percent >= self.green {
            Tone::Green
        } else if percent >= self.yellow {
            Tone::Amber
        } else {
            Tone::Red
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail_layout() -> Layout {
        Layout::SidebarMain {
            sidebar: Box::new(Section::info_card("overview", vec![ColumnConfig::new("status")])),
            tabs: vec![
                Tab::new("summary", "Summary")
                    .with_section(Section::metrics("kpis", vec![MetricConfig::value("days", "Days", "daysOnBench")])),
                Tab::new("submissions", "Submissions").with_section(
                    Section::table("history", vec![ColumnConfig::new("vendor")])
                        .from_source(DataSource::related("submissions")),
                ),
            ],
        }
    }

    #[test]
    fn test_sections_in_document_order() {
        let layout = detail_layout();
        let ids: Vec<&str> = layout.sections().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["overview", "kpis", "history"]);
        assert_eq!(layout.tabs().len(), 2);
        assert!(layout.section("history").is_some());
        assert!(layout.section("nope").is_none());
    }

    #[test]
    fn test_threshold_tones() {
        let thresholds = Thresholds {
            green: 100.0,
            yellow: 70.0,
        };
        assert_eq!(thresholds.tone(120.0), Tone::Green);
        assert_eq!(thresholds.tone(75.0), Tone::Amber);
        assert_eq!(thresholds.tone(10.0), Tone::Red);
    }

    #[test]
    fn test_when_empty_only_for_tables() {
        let table = Section::table("t", vec![]).when_empty("No submissions yet");
        assert!(matches!(
            table.kind,
            SectionKind::Table { empty_message: Some(ref m), .. } if m == "No submissions yet"
        ));
        let card = Section::info_card("c", vec![]).when_empty("ignored");
        assert_eq!(card.kind_name(), "info-card");
    }

    #[test]
    fn test_section_serde_shape() {
        let section: Section = serde_json::from_str(
            r#"{
                "id": "immigration-case",
                "type": "custom",
                "title": "Immigration Case",
                "component": "ImmigrationCaseCard",
                "props": { "showTimeline": true },
                "visible": { "type": "condition", "condition": { "field": "immigrationCase", "operator": "exists" } }
            }"#,
        )
        .unwrap();
        assert_eq!(section.kind_name(), "custom");
        assert!(section.visible.is_some());

        let json = serde_json::to_value(&detail_layout()).unwrap();
        assert_eq!(json["type"], "sidebar-main");
        assert_eq!(json["tabs"][1]["sections"][0]["dataSource"]["type"], "related");
        assert_eq!(json["sidebar"]["type"], json!("info-card"));
    }
}
