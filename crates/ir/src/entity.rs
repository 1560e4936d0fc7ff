//! Entity configuration
//!
//! An `EntityConfig` is the static description of one kind of business
//! record: its list columns, status styles, filters, and the sections of
//! its detail view.

use crate::column::ColumnConfig;
use heck::ToTitleCase;
use screenwright_core::{
    EntityType, Identifiable, ScreenError, ScreenResult, SortSpec, Tone, Validatable, duplicate_ids,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entity type used by the generic fallback configuration
pub const UNKNOWN_ENTITY: &str = "unknown";

// ============================================================================
// EntityConfig
// ============================================================================

/// Static configuration for one entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityConfig {
    /// Unique tag for this entity type
    pub entity_type: EntityType,

    /// Singular / plural display names
    pub name: EntityName,

    /// Route prefix for list and detail pages
    #[serde(default)]
    pub base_route: String,

    /// Ordered list-view columns
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,

    /// Record field that carries the status code
    #[serde(default = "default_status_field")]
    pub status_field: String,

    /// Status code → display style
    #[serde(default)]
    pub status_config: BTreeMap<String, StatusStyle>,

    /// List filters
    #[serde(default)]
    pub filters: Vec<FilterConfig>,

    /// Detail-view navigation sections
    #[serde(default)]
    pub sections: Vec<SectionDefinition>,

    /// Ordering used by list data sources that declare none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortSpec>,
}

fn default_status_field() -> String {
    "status".to_string()
}

impl EntityConfig {
    /// Create an empty configuration for an entity type
    pub fn new(entity_type: impl Into<EntityType>) -> Self {
        let entity_type = entity_type.into();
        let singular = entity_type.as_str().to_title_case();
        Self {
            name: EntityName {
                plural: format!("{}s", singular),
                singular,
            },
            entity_type,
            base_route: String::new(),
            columns: Vec::new(),
            status_field: default_status_field(),
            status_config: BTreeMap::new(),
            filters: Vec::new(),
            sections: Vec::new(),
            default_sort: None,
        }
    }

    /// Generic configuration rendered for unregistered entity types
    pub fn fallback() -> Self {
        Self::new(UNKNOWN_ENTITY)
            .with_names("Record", "Records")
            .with_column(ColumnConfig::new("id").with_label("ID"))
            .with_column(ColumnConfig::new("name"))
            .with_column(ColumnConfig::new("status").with_format(crate::ColumnFormat::Status))
    }

    /// True for the generic fallback configuration
    pub fn is_fallback(&self) -> bool {
        self.entity_type.as_str() == UNKNOWN_ENTITY
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn with_names(mut self, singular: impl Into<String>, plural: impl Into<String>) -> Self {
        self.name = EntityName {
            singular: singular.into(),
            plural: plural.into(),
        };
        self
    }

    pub fn with_base_route(mut self, route: impl Into<String>) -> Self {
        self.base_route = route.into();
        self
    }

    pub fn with_column(mut self, column: ColumnConfig) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_status(
        mut self,
        code: impl Into<String>,
        label: impl Into<String>,
        tone: Tone,
    ) -> Self {
        self.status_config
            .insert(code.into(), StatusStyle::new(label, tone));
        self
    }

    pub fn with_status_field(mut self, field: impl Into<String>) -> Self {
        self.status_field = field.into();
        self
    }

    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_section(mut self, section: SectionDefinition) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = Some(sort);
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Style for a status code; unknown codes get a neutral style labelled
    /// with the title-cased code
    pub fn status_style(&self, code: &str) -> StatusStyle {
        self.status_config
            .get(code)
            .cloned()
            .unwrap_or_else(|| StatusStyle::fallback(code))
    }

    /// Whether a status code has an explicit entry
    pub fn has_status(&self, code: &str) -> bool {
        self.status_config.contains_key(code)
    }

    /// Whether list data sources should forward this filter key
    pub fn recognizes_filter(&self, key: &str) -> bool {
        self.filters.iter().any(|f| f.key == key)
    }

    pub fn column(&self, key: &str) -> Option<&ColumnConfig> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn section(&self, id: &str) -> Option<&SectionDefinition> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Detail sections organized for sidebar navigation
    pub fn sections_by_group(&self) -> SectionGroups<'_> {
        let mut groups = SectionGroups::default();
        for section in &self.sections {
            if section.is_overview {
                if groups.overview.is_none() {
                    groups.overview = Some(section);
                }
                continue;
            }
            match section.group {
                SectionGroup::Main => groups.main.push(section),
                SectionGroup::Related => groups.related.push(section),
                SectionGroup::Tools => groups.tools.push(section),
                SectionGroup::Settings | SectionGroup::Automation => groups.other.push(section),
            }
        }
        groups
    }
}

impl Validatable for EntityConfig {
    fn validate(&self) -> ScreenResult<()> {
        if self.entity_type.as_str().trim().is_empty() {
            return Err(ScreenError::validation("Entity type cannot be empty"));
        }
        for column in &self.columns {
            column.validate()?;
        }
        let duplicates = duplicate_ids(self.sections.iter());
        if !duplicates.is_empty() {
            return Err(ScreenError::validation(format!(
                "Entity '{}' has duplicate sections: {}",
                self.entity_type,
                duplicates.join(", ")
            )));
        }
        Ok(())
    }
}

/// Singular and plural display names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityName {
    pub singular: String,
    pub plural: String,
}

// ============================================================================
// StatusStyle
// ============================================================================

/// Display style for one status code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusStyle {
    pub label: String,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl StatusStyle {
    pub fn new(label: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            tone,
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Neutral style for a code with no configuration
    pub fn fallback(code: &str) -> Self {
        let label = if code.trim().is_empty() {
            "Unknown".to_string()
        } else {
            code.to_title_case()
        };
        Self::new(label, Tone::Neutral)
    }
}

// ============================================================================
// Filters
// ============================================================================

/// One list filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub key: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FilterKind,
}

impl FilterConfig {
    pub fn search(key: impl Into<String>, placeholder: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: key.to_title_case(),
            key,
            kind: FilterKind::Search {
                placeholder: placeholder.into(),
            },
        }
    }

    pub fn select(key: impl Into<String>, options: Vec<FilterOption>) -> Self {
        let key = key.into();
        Self {
            label: key.to_title_case(),
            key,
            kind: FilterKind::Select { options },
        }
    }

    pub fn toggle(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: key.to_title_case(),
            key,
            kind: FilterKind::Toggle,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Filter widget and its options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FilterKind {
    Search { placeholder: String },
    Select { options: Vec<FilterOption> },
    Toggle,
    DateRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// `all` plus one option per configured status
    pub fn from_statuses(config: &EntityConfig, all_label: &str) -> Vec<FilterOption> {
        std::iter::once(FilterOption::new("all", all_label))
            .chain(
                config
                    .status_config
                    .iter()
                    .map(|(code, style)| FilterOption::new(code.clone(), style.label.clone())),
            )
            .collect()
    }
}

// ============================================================================
// Sections
// ============================================================================

/// A navigable section of an entity's detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDefinition {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub group: SectionGroup,
    #[serde(default)]
    pub show_count: bool,
    #[serde(default)]
    pub alert_on_count: bool,
    #[serde(default)]
    pub is_overview: bool,
}

impl SectionDefinition {
    pub fn new(id: impl Into<String>, label: impl Into<String>, group: SectionGroup) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            group,
            show_count: false,
            alert_on_count: false,
            is_overview: false,
        }
    }

    pub fn overview(id: impl Into<String>, label: impl Into<String>) -> Self {
        let mut section = Self::new(id, label, SectionGroup::Main);
        section.is_overview = true;
        section
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn counted(mut self) -> Self {
        self.show_count = true;
        self
    }

    pub fn alerting(mut self) -> Self {
        self.show_count = true;
        self.alert_on_count = true;
        self
    }
}

impl Identifiable for SectionDefinition {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Sidebar group of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionGroup {
    #[default]
    Main,
    Related,
    Tools,
    Settings,
    Automation,
}

/// Sections split by sidebar group
#[derive(Debug, Default)]
pub struct SectionGroups<'a> {
    pub overview: Option<&'a SectionDefinition>,
    pub main: Vec<&'a SectionDefinition>,
    pub related: Vec<&'a SectionDefinition>,
    pub tools: Vec<&'a SectionDefinition>,
    pub other: Vec<&'a SectionDefinition>,
}

// ============================================================================
// Tests
// ============================================================================
