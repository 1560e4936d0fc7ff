//! Screen definitions
//!
//! A `ScreenDefinition` is the complete declarative document for one
//! page: header, data source, layout tree, and header actions.

use crate::action::ActionDescriptor;
use crate::binding::Binding;
use crate::data_source::DataSource;
use crate::layout::{Layout, SectionKind};
use screenwright_core::{
    Identifiable, ScreenError, ScreenResult, Validatable, duplicate_ids,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// ScreenDefinition
// ============================================================================

/// Declarative document for one screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ScreenKind,
    pub title: Binding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<Binding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub data_source: DataSource,
    pub layout: Layout,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breadcrumbs: Vec<Breadcrumb>,
}

impl ScreenDefinition {
    pub fn new(
        id: impl Into<String>,
        kind: ScreenKind,
        title: impl Into<Binding>,
        data_source: DataSource,
        layout: Layout,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            subtitle: None,
            icon: None,
            data_source,
            layout,
            actions: Vec::new(),
            breadcrumbs: Vec::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn with_subtitle(mut self, subtitle: impl Into<Binding>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_action(mut self, action: ActionDescriptor) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_breadcrumb(mut self, crumb: Breadcrumb) -> Self {
        self.breadcrumbs.push(crumb);
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Header, tab, and section actions in document order
    pub fn all_actions(&self) -> Vec<&ActionDescriptor> {
        let mut actions: Vec<&ActionDescriptor> = self.actions.iter().collect();
        for tab in self.layout.tabs() {
            actions.extend(tab.actions.iter());
        }
        for section in self.layout.sections() {
            actions.extend(section.actions.iter());
        }
        actions
    }

    /// Find an action anywhere in the screen
    pub fn action(&self, id: &str) -> Option<&ActionDescriptor> {
        self.all_actions().into_iter().find(|a| a.id == id)
    }

    /// Every procedure the screen's data sources and actions may call
    pub fn procedures(&self) -> Vec<String> {
        let mut names = self.data_source.procedures();
        for action in self.all_actions() {
            match &action.kind {
                crate::ActionKind::Mutation { procedure, .. }
                | crate::ActionKind::Export { procedure, .. } => names.push(procedure.clone()),
                _ => {}
            }
        }
        names.sort();
        names.dedup();
        names
    }
}

impl Identifiable for ScreenDefinition {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Validatable for ScreenDefinition {
    fn validate(&self) -> ScreenResult<()> {
        if self.id.trim().is_empty() {
            return Err(ScreenError::validation("Screen id cannot be empty"));
        }

        let sections = self.layout.sections();
        if let Some(dup) = duplicate_ids(sections.iter().copied()).into_iter().next() {
            return Err(ScreenError::InvalidConfig(format!(
                "Screen '{}' declares section '{}' more than once",
                self.id, dup
            )));
        }

        let actions = self.all_actions();
        if let Some(dup) = duplicate_ids(actions.iter().copied()).into_iter().next() {
            return Err(ScreenError::InvalidConfig(format!(
                "Screen '{}' declares action '{}' more than once",
                self.id, dup
            )));
        }
        for action in actions {
            action.validate()?;
        }

        for section in sections {
            if let SectionKind::Table { columns, .. } = &section.kind {
                for column in columns {
                    column.validate()?;
                }
            }
        }
        Ok(())
    }
}

/// Page archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenKind {
    List,
    Detail,
    Dashboard,
    ListDetail,
}

/// One crumb in the header trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub label: Binding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

impl Breadcrumb {
    pub fn new(label: impl Into<Binding>, route: Option<&str>) -> Self {
        Self {
            label: label.into(),
            route: route.map(str::to_string),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnConfig;
    use crate::layout::{Section, Tab};

    fn job_detail() -> ScreenDefinition {
        ScreenDefinition::new(
            "job-detail",
            ScreenKind::Detail,
            Binding::field("title"),
            DataSource::entity("job").including("submissions"),
            Layout::Tabs {
                tabs: vec![Tab::new("pipeline", "Pipeline").with_section(
                    Section::table("submissions", vec![ColumnConfig::new("candidateName")])
                        .from_source(DataSource::related("submissions"))
                        .with_action(ActionDescriptor::export(
                            "export-submissions",
                            "Export",
                            "submission.export",
                            crate::ExportFormat::Csv,
                        )),
                )],
            },
        )
        .with_action(ActionDescriptor::mutation("close", "Close", "job.close"))
        .with_breadcrumb(Breadcrumb::new("Jobs", Some("/jobs")))
    }

    #[test]
    fn test_collects_actions_and_procedures() {
        let screen = job_detail();
        assert_eq!(screen.all_actions().len(), 2);
        assert!(screen.action("export-submissions").is_some());
        assert_eq!(
            screen.procedures(),
            vec!["job.close", "job.getById", "submission.export"]
        );
        assert!(screen.is_valid());
    }

    #[test]
    fn test_duplicate_action_ids_rejected() {
        let screen = job_detail().with_action(ActionDescriptor::modal("close", "Close", "close-job"));
        let err = screen.validate().unwrap_err();
        assert!(err.to_string().contains("action 'close'"));
    }

    #[test]
    fn test_malformed_action_rejected() {
        let screen = job_detail().with_action(ActionDescriptor::mutation("archive", "Archive", ""));
        assert!(matches!(
            screen.validate(),
            Err(ScreenError::MalformedAction { .. })
        ));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(job_detail()).unwrap();
        assert_eq!(json["type"], "detail");
        assert_eq!(json["dataSource"]["entityType"], "job");
        assert_eq!(json["title"]["type"], "field");

        let back: ScreenDefinition = serde_json::from_value(json).unwrap();
        assert_eq!(back, job_detail());
    }
}
