//! Entity journeys
//!
//! A journey is the ordered list of lifecycle steps an entity moves
//! through, plus the quick actions offered on its detail view. Both are
//! keyed off the entity's status code.

use crate::action::ActionDescriptor;
use crate::binding::Binding;
use screenwright_core::{EntityType, Identifiable, ScreenError, ScreenResult, Validatable, Variant, duplicate_ids};
use serde::{Deserialize, Serialize};

// ============================================================================
// EntityJourney
// ============================================================================

/// Lifecycle steps and quick actions for one entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityJourney {
    pub entity_type: EntityType,
    pub steps: Vec<JourneyStep>,
    #[serde(default)]
    pub quick_actions: Vec<QuickAction>,
}

impl EntityJourney {
    pub fn new(entity_type: impl Into<EntityType>) -> Self {
        Self {
            entity_type: entity_type.into(),
            steps: Vec::new(),
            quick_actions: Vec::new(),
        }
    }

    pub fn with_step(mut self, step: JourneyStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn with_quick_action(mut self, action: QuickAction) -> Self {
        self.quick_actions.push(action);
        self
    }

    /// Index of the step a record with `status` is on
    ///
    /// The first step listing the status as active wins. Otherwise the
    /// record sits one past the last step that lists it as completed, and
    /// an unknown status starts at the first step.
    pub fn current_step_index(&self, status: &str) -> usize {
        if let Some(index) = self
            .steps
            .iter()
            .position(|s| s.active_statuses.iter().any(|a| a == status))
        {
            return index;
        }
        self.steps
            .iter()
            .rposition(|s| s.completed_statuses.iter().any(|c| c == status))
            .map(|index| index + 1)
            .unwrap_or(0)
    }

    pub fn current_step(&self, status: &str) -> Option<&JourneyStep> {
        self.steps.get(self.current_step_index(status))
    }

    /// Quick actions offered for a record with `status`, in declared order
    pub fn visible_quick_actions(&self, status: &str) -> Vec<&QuickAction> {
        self.quick_actions
            .iter()
            .filter(|a| a.is_visible_for(status))
            .collect()
    }

    pub fn quick_action(&self, id: &str) -> Option<&QuickAction> {
        self.quick_actions.iter().find(|a| a.id == id)
    }

    /// Every status code the journey mentions
    pub fn statuses(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self
            .steps
            .iter()
            .flat_map(|s| s.active_statuses.iter().chain(s.completed_statuses.iter()))
            .chain(
                self.quick_actions
                    .iter()
                    .flat_map(|a| a.show_for_statuses.iter().chain(a.hide_for_statuses.iter())),
            )
            .map(String::as_str)
            .collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }
}

impl Validatable for EntityJourney {
    fn validate(&self) -> ScreenResult<()> {
        if self.steps.is_empty() {
            return Err(ScreenError::InvalidConfig(format!(
                "Journey for '{}' has no steps",
                self.entity_type
            )));
        }
        if let Some(dup) = duplicate_ids(&self.steps).into_iter().next() {
            return Err(ScreenError::InvalidConfig(format!(
                "Journey for '{}' declares step '{}' more than once",
                self.entity_type, dup
            )));
        }
        for action in &self.quick_actions {
            action.validate()?;
        }
        Ok(())
    }
}

// ============================================================================
// JourneyStep
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStep {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active_statuses: Vec<String>,
    #[serde(default)]
    pub completed_statuses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_tab: Option<String>,
}

impl JourneyStep {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            active_statuses: Vec::new(),
            completed_statuses: Vec::new(),
            default_tab: None,
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn active_for(mut self, statuses: &[&str]) -> Self {
        self.active_statuses = statuses.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn completed_for(mut self, statuses: &[&str]) -> Self {
        self.completed_statuses = statuses.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_default_tab(mut self, tab: impl Into<String>) -> Self {
        self.default_tab = Some(tab.into());
        self
    }
}

impl Identifiable for JourneyStep {
    fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// QuickAction
// ============================================================================

/// A status-gated shortcut on an entity's detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAction {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub kind: QuickActionKind,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub show_for_statuses: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hide_for_statuses: Vec<String>,
}

impl QuickAction {
    fn new(id: impl Into<String>, label: impl Into<String>, kind: QuickActionKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            kind,
            variant: Variant::Default,
            show_for_statuses: Vec::new(),
            hide_for_statuses: Vec::new(),
        }
    }

    pub fn navigate(id: impl Into<String>, label: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new(id, label, QuickActionKind::Navigate { href: href.into() })
    }

    pub fn dialog(id: impl Into<String>, label: impl Into<String>, dialog_id: impl Into<String>) -> Self {
        Self::new(
            id,
            label,
            QuickActionKind::Dialog {
                dialog_id: dialog_id.into(),
            },
        )
    }

    pub fn mutation(id: impl Into<String>, label: impl Into<String>, procedure: impl Into<String>) -> Self {
        Self::new(
            id,
            label,
            QuickActionKind::Mutation {
                procedure: procedure.into(),
            },
        )
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn destructive(mut self) -> Self {
        self.variant = Variant::Destructive;
        self
    }

    pub fn show_for(mut self, statuses: &[&str]) -> Self {
        self.show_for_statuses = statuses.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn hide_for(mut self, statuses: &[&str]) -> Self {
        self.hide_for_statuses = statuses.iter().map(|s| s.to_string()).collect();
        self
    }

    /// A show list excludes unlisted statuses; a hide list excludes listed ones
    pub fn is_visible_for(&self, status: &str) -> bool {
        if !self.show_for_statuses.is_empty() && !self.show_for_statuses.iter().any(|s| s == status) {
            return false;
        }
        !self.hide_for_statuses.iter().any(|s| s == status)
    }

    /// Equivalent action descriptor for the dispatcher
    ///
    /// Mutations receive the record id as their `id` input.
    pub fn to_action(&self) -> ActionDescriptor {
        let action = match &self.kind {
            QuickActionKind::Navigate { href } => ActionDescriptor::navigate(&self.id, &self.label, href),
            QuickActionKind::Dialog { dialog_id } => ActionDescriptor::modal(&self.id, &self.label, dialog_id),
            QuickActionKind::Mutation { procedure } => {
                ActionDescriptor::mutation(&self.id, &self.label, procedure)
                    .with_input("id", Binding::field("id"))
            }
        };
        let action = action.with_variant(self.variant);
        match &self.icon {
            Some(icon) => action.with_icon(icon),
            None => action,
        }
    }
}

impl Identifiable for QuickAction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Validatable for QuickAction {
    fn validate(&self) -> ScreenResult<()> {
        self.to_action().validate()
    }
}

/// What a quick action does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "actionType", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum QuickActionKind {
    Navigate { href: String },
    Dialog { dialog_id: String },
    Mutation { procedure: String },
}

// ============================================================================
// Href templates
// ============================================================================

/// Substitute every `:id` and `{{id}}` placeholder in `template`
///
/// `:id` only matches as a whole token, so `:identifier` is untouched.
/// Templates with no placeholder come back unchanged.
pub fn resolve_href(template: &str, id: &str) -> String {
    let braced = template.replace("{{id}}", id);
    let mut out = String::with_capacity(braced.len());
    let mut rest = braced.as_str();
    while let Some(pos) = rest.find(":id") {
        let after = &rest[pos + 3..];
        let whole_token = !after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        out.push_str(&rest[..pos]);
        if whole_token {
            out.push_str(id);
        } else {
            out.push_str(":id");
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

// ============================================================================
// Tests
// ============================================================================
