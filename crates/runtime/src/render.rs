//! Layout and section rendering
//!
//! Walks a screen's layout tree against a `ResolvedContext` and produces a
//! `RenderTree`. Rendering never fails: hidden nodes are left out entirely,
//! broken sections become `misconfigured` nodes, and unrenderable values
//! become the configured placeholder.

use crate::config::RuntimeConfig;
use crate::context::{RequestScope, ResolvedContext};
use crate::dispatch::resolve_route;
use crate::format::{Cell, CellFormatter, CellRenderers};
use crate::resolver::resolve_related;
use screenwright_core::{ScreenError, Tone, Variant, path};
use screenwright_ir::{
    ActionDescriptor, ActionKind, Align, Catalog, ColumnConfig, ColumnFormat, EntityConfig, Layout,
    MetricConfig, Section, SectionKind, ScreenDefinition, Tab, is_visible,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

// ============================================================================
// Render tree
// ============================================================================

/// Rendered screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTree {
    pub screen_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breadcrumbs: Vec<Crumb>,
    pub actions: Vec<ActionButton>,
    pub body: Vec<RenderNode>,
}

impl RenderTree {
    /// Every node in document order, tabs expanded
    pub fn nodes(&self) -> Vec<&RenderNode> {
        let mut out = Vec::new();
        for node in &self.body {
            node.collect(&mut out);
        }
        out
    }

    /// Node rendered for a section id
    pub fn find(&self, section_id: &str) -> Option<&RenderNode> {
        self.nodes().into_iter().find(|n| n.id() == Some(section_id))
    }

    /// True when the tree is an error state rather than content
    pub fn is_error(&self) -> bool {
        matches!(
            self.body.as_slice(),
            [RenderNode::Misconfigured { .. }] | [RenderNode::FetchError { .. }]
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

/// A visible action rendered as a button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionButton {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub variant: Variant,
    pub kind: String,
    /// Resolved route for navigate actions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub confirm: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub key: String,
    pub label: String,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTile {
    pub id: String,
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Current as a percentage of target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub title: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoField {
    pub key: String,
    pub label: String,
    pub value: Cell,
}

/// One node of the rendered body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RenderNode {
    Tab {
        id: String,
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        actions: Vec<ActionButton>,
        children: Vec<RenderNode>,
    },
    Table {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        headers: Vec<Header>,
        rows: Vec<Vec<Cell>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        empty_message: Option<String>,
        actions: Vec<ActionButton>,
    },
    MetricsGrid {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        metrics: Vec<MetricTile>,
        actions: Vec<ActionButton>,
    },
    Timeline {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        entries: Vec<TimelineEntry>,
        actions: Vec<ActionButton>,
    },
    InfoCard {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        fields: Vec<InfoField>,
        actions: Vec<ActionButton>,
    },
    Custom {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        component: String,
        props: Value,
        actions: Vec<ActionButton>,
    },
    /// A section (or the whole screen) whose configuration is broken
    Misconfigured {
        #[serde(skip_serializing_if = "Option::is_none")]
        section_id: Option<String>,
        message: String,
    },
    /// Data could not be loaded
    FetchError { message: String, retryable: bool },
}

impl RenderNode {
    /// Section or tab id, if the node has one
    pub fn id(&self) -> Option<&str> {
        match self {
            RenderNode::Tab { id, .. }
            | RenderNode::Table { id, .. }
            | RenderNode::MetricsGrid { id, .. }
            | RenderNode::Timeline { id, .. }
            | RenderNode::InfoCard { id, .. }
            | RenderNode::Custom { id, .. } => Some(id),
            RenderNode::Misconfigured { section_id, .. } => section_id.as_deref(),
            RenderNode::FetchError { .. } => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            RenderNode::Tab { .. } => "tab",
            RenderNode::Table { .. } => "table",
            RenderNode::MetricsGrid { .. } => "metrics-grid",
            RenderNode::Timeline { .. } => "timeline",
            RenderNode::InfoCard { .. } => "info-card",
            RenderNode::Custom { .. } => "custom",
            RenderNode::Misconfigured { .. } => "misconfigured",
            RenderNode::FetchError { .. } => "fetch-error",
        }
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a RenderNode>) {
        out.push(self);
        if let RenderNode::Tab { children, .. } = self {
            for child in children {
                child.collect(out);
            }
        }
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Renders screen definitions against resolved data
#[derive(Debug, Clone)]
pub struct Renderer {
    catalog: Arc<Catalog>,
    formatter: CellFormatter,
}

impl Renderer {
    pub fn new(catalog: Arc<Catalog>, config: &RuntimeConfig) -> Self {
        Self {
            catalog,
            formatter: CellFormatter::from_config(config),
        }
    }

    pub fn with_renderers(mut self, renderers: CellRenderers) -> Self {
        self.formatter = self.formatter.with_renderers(renderers);
        self
    }

    pub fn formatter(&self) -> &CellFormatter {
        &self.formatter
    }

    /// Render a screen against its resolved context
    pub fn render_screen(
        &self,
        screen: &ScreenDefinition,
        ctx: &ResolvedContext,
        scope: &RequestScope,
    ) -> RenderTree {
        let data = ctx.as_value();
        let sources = scope.sources(data);
        let entity = self.entity_for(screen);
        let text = |binding: &screenwright_ir::Binding| binding.resolve_text(&sources);

        let body = match &screen.layout {
            Layout::SingleColumn { sections } => self.render_sections(sections, ctx, entity),
            Layout::SidebarMain { sidebar, tabs } => {
                let mut body = self.render_sections(std::slice::from_ref(sidebar.as_ref()), ctx, entity);
                body.extend(self.render_tabs(tabs, ctx, entity));
                body
            }
            Layout::Tabs { tabs } => self.render_tabs(tabs, ctx, entity),
        };

        debug!(screen = %screen.id, nodes = body.len(), "Rendered screen");
        RenderTree {
            screen_id: screen.id.clone(),
            title: text(&screen.title).unwrap_or_else(|| self.formatter.placeholder().text),
            subtitle: screen.subtitle.as_ref().and_then(text),
            icon: screen.icon.clone(),
            breadcrumbs: screen
                .breadcrumbs
                .iter()
                .map(|crumb| Crumb {
                    label: text(&crumb.label).unwrap_or_else(|| self.formatter.placeholder().text),
                    route: crumb.route.clone(),
                })
                .collect(),
            actions: self.buttons(&screen.actions, data),
            body,
        }
    }

    /// Render an entity list using the entity's own columns
    pub fn render_list(&self, config: &EntityConfig, rows: &[Value]) -> RenderNode {
        RenderNode::Table {
            id: config.entity_type.to_string(),
            title: Some(config.name.plural.clone()),
            headers: headers(&config.columns),
            rows: self.rows(&config.columns, rows, config),
            empty_message: Some(format!("No {} found", config.name.plural.to_lowercase())),
            actions: Vec::new(),
        }
    }

    /// Convert an error caught at the render boundary into a node
    ///
    /// Configuration errors become `misconfigured`; data fetch errors are
    /// retryable.
    pub fn render_fetch_error(&self, err: &ScreenError) -> RenderNode {
        if err.is_configuration() {
            RenderNode::Misconfigured {
                section_id: None,
                message: err.to_string(),
            }
        } else {
            RenderNode::FetchError {
                message: err.to_string(),
                retryable: err.is_data_fetch(),
            }
        }
    }

    /// Tree for a screen that could not be rendered at all
    pub fn render_failure(&self, screen_id: &str, title: Option<String>, err: &ScreenError) -> RenderTree {
        warn!(screen = %screen_id, error = %err, "Rendering error state");
        RenderTree {
            screen_id: screen_id.to_string(),
            title: title.unwrap_or_else(|| screen_id.to_string()),
            subtitle: None,
            icon: None,
            breadcrumbs: Vec::new(),
            actions: Vec::new(),
            body: vec![self.render_fetch_error(err)],
        }
    }

    // ========================================================================
    // Layout
    // ========================================================================

    fn entity_for(&self, screen: &ScreenDefinition) -> &EntityConfig {
        let entity_type = screen.data_source.entity_type().map_or("", |t| t.as_str());
        self.catalog.entities.config_or_fallback(entity_type)
    }

    fn render_tabs(&self, tabs: &[Tab], ctx: &ResolvedContext, entity: &EntityConfig) -> Vec<RenderNode> {
        tabs.iter()
            .filter(|tab| is_visible(tab.visible.as_ref(), ctx.as_value()))
            .map(|tab| RenderNode::Tab {
                id: tab.id.clone(),
                label: tab.label.clone(),
                icon: tab.icon.clone(),
                actions: self.buttons(&tab.actions, ctx.as_value()),
                children: self.render_sections(&tab.sections, ctx, entity),
            })
            .collect()
    }

    fn render_sections(&self, sections: &[Section], ctx: &ResolvedContext, entity: &EntityConfig) -> Vec<RenderNode> {
        sections
            .iter()
            .filter(|section| is_visible(section.visible.as_ref(), ctx.as_value()))
            .map(|section| self.render_section(section, ctx, entity))
            .collect()
    }

    fn render_section(&self, section: &Section, ctx: &ResolvedContext, entity: &EntityConfig) -> RenderNode {
        let data = ctx.as_value();
        let id = section.id.clone();
        let title = section.title.clone();
        let actions = self.buttons(&section.actions, data);

        match &section.kind {
            SectionKind::Table { columns, empty_message } => match self.section_rows(section, ctx) {
                Ok(rows) => RenderNode::Table {
                    id,
                    title,
                    headers: headers(columns),
                    rows: self.rows(columns, &rows, entity),
                    empty_message: empty_message.clone(),
                    actions,
                },
                Err(err) => misconfigured(section, &err),
            },
            SectionKind::Timeline {
                title_path,
                timestamp_path,
                description_path,
            } => match self.section_rows(section, ctx) {
                Ok(rows) => RenderNode::Timeline {
                    id,
                    title,
                    entries: rows
                        .iter()
                        .map(|row| TimelineEntry {
                            title: path::lookup(row, title_path)
                                .and_then(path::display_scalar)
                                .unwrap_or_else(|| self.formatter.placeholder().text),
                            timestamp: self
                                .formatter
                                .format_or_placeholder(&ColumnFormat::Date, path::lookup(row, timestamp_path)),
                            description: description_path
                                .as_deref()
                                .and_then(|p| path::lookup(row, p))
                                .and_then(path::display_scalar),
                        })
                        .collect(),
                    actions,
                },
                Err(err) => misconfigured(section, &err),
            },
            SectionKind::InfoCard { fields } => {
                let record = match &section.data_source {
                    None => Ok(data.clone()),
                    Some(source) => resolve_related(source, ctx).map(|rows| rows.into_iter().next().unwrap_or(Value::Null)),
                };
                match record {
                    Ok(record) => RenderNode::InfoCard {
                        id,
                        title,
                        fields: fields
                            .iter()
                            .map(|field| InfoField {
                                key: field.key.clone(),
                                label: field.label.clone(),
                                value: self.formatter.column_cell(field, &record, entity),
                            })
                            .collect(),
                        actions,
                    },
                    Err(err) => misconfigured(section, &err),
                }
            }
            SectionKind::MetricsGrid { metrics } => RenderNode::MetricsGrid {
                id,
                title,
                metrics: metrics.iter().map(|m| self.metric(m, data)).collect(),
                actions,
            },
            SectionKind::Custom { component, props } => RenderNode::Custom {
                id,
                title,
                component: component.clone(),
                props: props.clone(),
                actions,
            },
        }
    }

    /// Rows for a table or timeline; these sections need a data source
    fn section_rows(&self, section: &Section, ctx: &ResolvedContext) -> Result<Vec<Value>, ScreenError> {
        let source = section.data_source.as_ref().ok_or_else(|| {
            ScreenError::InvalidConfig(format!("{} section has no data source", section.kind_name()))
        })?;
        resolve_related(source, ctx)
    }

    fn rows(&self, columns: &[ColumnConfig], rows: &[Value], entity: &EntityConfig) -> Vec<Vec<Cell>> {
        rows.iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| self.formatter.column_cell(column, row, entity))
                    .collect()
            })
            .collect()
    }

    fn metric(&self, metric: &MetricConfig, data: &Value) -> MetricTile {
        let empty = Value::Null;
        let sources = screenwright_ir::BindingSources::new(data, &empty, &empty);
        let current = metric.current.resolve(&sources);
        let target = metric.target.as_ref().and_then(|t| t.resolve(&sources));

        let percent = match (current.as_ref().and_then(path::as_f64), target.as_ref().and_then(path::as_f64)) {
            (Some(c), Some(t)) if t > 0.0 => Some((c / t * 1000.0).round() / 10.0),
            _ => None,
        };

        MetricTile {
            id: metric.id.clone(),
            label: metric.label.clone(),
            value: self.formatter.format_or_placeholder(&metric.format, current.as_ref()),
            target: target.as_ref().and_then(|t| self.formatter.format_value(&metric.format, t)),
            percent,
            tone: percent.and_then(|p| metric.thresholds.map(|t| t.tone(p))),
            icon: metric.icon.clone(),
        }
    }

    // ========================================================================
    // Actions
    // ========================================================================

    fn buttons(&self, actions: &[ActionDescriptor], data: &Value) -> Vec<ActionButton> {
        actions
            .iter()
            .filter(|action| is_visible(action.visible.as_ref(), data))
            .map(|action| ActionButton {
                id: action.id.clone(),
                label: action.label.clone(),
                icon: action.icon.clone(),
                variant: action.variant,
                kind: action.kind_name().to_string(),
                href: match &action.kind {
                    ActionKind::Navigate { route } => resolve_route(route, data).ok(),
                    _ => None,
                },
                confirm: action.confirm.is_some(),
            })
            .collect()
    }
}

fn headers(columns: &[ColumnConfig]) -> Vec<Header> {
    columns
        .iter()
        .map(|c| Header {
            key: c.key.clone(),
            label: c.label.clone(),
            align: c.align,
        })
        .collect()
}

fn misconfigured(section: &Section, err: &ScreenError) -> RenderNode {
    warn!(section = %section.id, error = %err, "Section is misconfigured");
    RenderNode::Misconfigured {
        section_id: Some(section.id.clone()),
        message: err.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use screenwright_ir::builtin::reference_catalog;
    use screenwright_ir::{Binding, DataSource, Operator, ScreenKind, Visibility};
    use serde_json::json;

    fn renderer() -> Renderer {
        Renderer::new(Arc::new(reference_catalog().unwrap()), &RuntimeConfig::default())
    }

    fn job() -> ResolvedContext {
        ResolvedContext::new(json!({
            "id": "j-1",
            "title": "ICU Nurse",
            "status": "open",
            "location": "Austin, TX",
            "billRate": 95,
            "isRemote": false,
            "account": { "name": "St. Mary's" },
            "submissions": [
                { "candidate": { "fullName": "Ana Ruiz" }, "status": "submitted", "submittedRate": 80, "submittedAt": "2024-05-01" },
                { "candidate": { "fullName": "Li Wei" }, "status": "ghosted", "submittedAt": "2024-05-03" }
            ],
            "activities": [
                { "subject": "Intake call", "createdAt": "2024-04-28T10:00:00Z" }
            ]
        }))
    }

    fn scope() -> RequestScope {
        RequestScope::new().with_param("id", "j-1")
    }

    #[test]
    fn test_job_detail_tree() {
        let catalog = reference_catalog().unwrap();
        let screen = catalog.screen("job-detail").unwrap();
        let tree = renderer().render_screen(screen, &job(), &scope());

        assert_eq!(tree.title, "ICU Nurse");
        assert_eq!(tree.subtitle.as_deref(), Some("St. Mary's"));
        assert!(!tree.is_error());

        let edit = tree.actions.iter().find(|a| a.id == "edit").unwrap();
        assert_eq!(edit.href.as_deref(), Some("/employee/recruiting/jobs/j-1/edit"));
        assert!(tree.actions.iter().any(|a| a.id == "close" && a.confirm));

        let Some(RenderNode::Table { rows, .. }) = tree.find("submissions") else {
            panic!("submissions table missing");
        };
        // sorted by submittedAt desc
        assert_eq!(rows[0][0].text, "Li Wei");
        assert_eq!(rows[0][1], Cell::toned("ghosted", Tone::Neutral));
        assert_eq!(rows[0][2].text, "—");
        assert_eq!(rows[1][2].text, "$80.00");

        let Some(RenderNode::Timeline { entries, .. }) = tree.find("activity-timeline") else {
            panic!("timeline missing");
        };
        assert_eq!(entries[0].title, "Intake call");
        assert_eq!(entries[0].timestamp, "Apr 28, 2024");
    }

    #[test]
    fn test_hidden_actions_are_omitted_for_terminal_status() {
        let catalog = reference_catalog().unwrap();
        let screen = catalog.screen("job-detail").unwrap();
        let mut data = job().into_value();
        data["status"] = json!("filled");

        let tree = renderer().render_screen(screen, &ResolvedContext::new(data), &scope());
        let ids: Vec<&str> = tree.actions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["log-activity"]);
    }

    #[test]
    fn test_hidden_section_contributes_no_nodes() {
        let catalog = reference_catalog().unwrap();
        let screen = catalog.screen("consultant-detail").unwrap();
        let ctx = ResolvedContext::new(json!({ "id": "c-1", "fullName": "Ravi K", "status": "bench" }));

        let tree = renderer().render_screen(screen, &ctx, &RequestScope::new());
        assert!(tree.find("immigration-case").is_none());
        assert!(tree.find("visa-status").is_some());

        let with_case = ResolvedContext::new(json!({ "id": "c-1", "immigrationCase": { "id": 9 } }));
        let tree = renderer().render_screen(screen, &with_case, &RequestScope::new());
        assert!(tree.find("immigration-case").is_some());
    }

    #[test]
    fn test_table_without_source_is_misconfigured() {
        let catalog = Arc::new(reference_catalog().unwrap());
        let screen = ScreenDefinition::new(
            "broken",
            ScreenKind::Detail,
            "Broken",
            DataSource::entity("job"),
            Layout::SingleColumn {
                sections: vec![
                    Section::table("orphans", vec![ColumnConfig::new("id")]),
                    Section::table("wrong-kind", vec![ColumnConfig::new("id")]).from_source(DataSource::list("job")),
                    Section::info_card("ok", vec![ColumnConfig::new("id")]),
                ],
            },
        );
        let tree = Renderer::new(catalog, &RuntimeConfig::default()).render_screen(
            &screen,
            &ResolvedContext::new(json!({ "id": 1 })),
            &RequestScope::new(),
        );

        let kinds: Vec<&str> = tree.body.iter().map(RenderNode::kind_name).collect();
        assert_eq!(kinds, vec!["misconfigured", "misconfigured", "info-card"]);
        assert_eq!(tree.body[0].id(), Some("orphans"));
    }

    #[test]
    fn test_dashboard_metrics() {
        let catalog = reference_catalog().unwrap();
        let screen = catalog.screen("recruiter-dashboard").unwrap();
        let ctx = ResolvedContext::new(json!({
            "sprintMetrics": {
                "placements": { "current": 1, "target": 2 },
                "revenue": { "current": 45000, "target": 50000 },
                "submissions": { "current": 12, "target": 10 },
                "interviews": { "current": 0, "target": 0 }
            },
            "recentWins": []
        }));
        let scope = RequestScope::new().with_context("user.fullName", "Dana Reyes");
        let tree = renderer().render_screen(screen, &ctx, &scope);

        assert_eq!(tree.title, "My Dashboard");
        assert_eq!(tree.subtitle.as_deref(), Some("Dana Reyes"));

        let Some(RenderNode::MetricsGrid { metrics, .. }) = tree.find("sprint-progress") else {
            panic!("metrics grid missing");
        };
        let by_id = |id: &str| metrics.iter().find(|m| m.id == id).unwrap();
        assert_eq!(by_id("placements").percent, Some(50.0));
        assert_eq!(by_id("placements").tone, Some(Tone::Amber));
        assert_eq!(by_id("revenue").value, "$45,000.00");
        assert_eq!(by_id("revenue").tone, Some(Tone::Amber));
        assert_eq!(by_id("submissions").tone, Some(Tone::Green));
        assert_eq!(by_id("interviews").percent, None);
        assert_eq!(by_id("jobFill").value, "—");

        let Some(RenderNode::Table { rows, empty_message, .. }) = tree.find("recent-wins") else {
            panic!("recent wins missing");
        };
        assert!(rows.is_empty());
        assert_eq!(empty_message.as_deref(), Some("No placements this sprint yet"));
    }

    #[test]
    fn test_tab_visibility() {
        let catalog = Arc::new(reference_catalog().unwrap());
        let screen = ScreenDefinition::new(
            "tabs",
            ScreenKind::Detail,
            Binding::field("name"),
            DataSource::entity("account"),
            Layout::Tabs {
                tabs: vec![
                    Tab::new("main", "Main"),
                    Tab::new("billing", "Billing").visible_when(Visibility::when("status", Operator::Eq, "active")),
                ],
            },
        );
        let renderer = Renderer::new(catalog, &RuntimeConfig::default());

        let prospect = ResolvedContext::new(json!({ "name": "Acme", "status": "prospect" }));
        let tree = renderer.render_screen(&screen, &prospect, &RequestScope::new());
        assert_eq!(tree.body.len(), 1);

        let active = ResolvedContext::new(json!({ "name": "Acme", "status": "active" }));
        let tree = renderer.render_screen(&screen, &active, &RequestScope::new());
        assert_eq!(tree.body.len(), 2);
    }

    #[test]
    fn test_render_list_uses_entity_columns() {
        let catalog = reference_catalog().unwrap();
        let config = catalog.entities.get_config("job").unwrap();
        let node = renderer().render_list(config, &[json!({ "title": "Welder", "status": "on_hold" })]);

        let RenderNode::Table { headers, rows, .. } = node else {
            panic!("expected a table");
        };
        assert_eq!(headers.len(), config.columns.len());
        let status_index = headers.iter().position(|h| h.key == "status").unwrap();
        assert_eq!(rows[0][status_index], Cell::toned("On Hold", Tone::Amber));
    }

    #[test]
    fn test_error_nodes() {
        let r = renderer();
        let fetch = r.render_fetch_error(&ScreenError::AggregateFailed {
            key: "tasks".into(),
            message: "timeout".into(),
        });
        assert!(matches!(fetch, RenderNode::FetchError { retryable: true, .. }));

        let config = r.render_fetch_error(&ScreenError::UnknownEntityType("invoice".into()));
        assert!(matches!(config, RenderNode::Misconfigured { section_id: None, .. }));

        let tree = r.render_failure("nope", None, &ScreenError::UnknownScreen("nope".into()));
        assert!(tree.is_error());
        assert_eq!(tree.title, "nope");
    }

    #[test]
    fn test_tree_serializes_with_type_tags() {
        let catalog = reference_catalog().unwrap();
        let screen = catalog.screen("job-detail").unwrap();
        let tree = renderer().render_screen(screen, &job(), &scope());
        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(json["screenId"], "job-detail");
        assert_eq!(json["body"][0]["type"], "info-card");
        assert_eq!(json["body"][1]["type"], "tab");
    }
}
