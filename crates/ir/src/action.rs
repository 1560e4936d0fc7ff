//! Action descriptors
//!
//! Buttons and menu items are declared as `ActionDescriptor`s. The action
//! `type` selects the shape of its `config`, so a mutation without a
//! procedure cannot be expressed except as an empty string, which
//! validation rejects.

use crate::binding::Binding;
use crate::condition::Visibility;
use screenwright_core::{Identifiable, ScreenError, ScreenResult, Validatable, Variant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// ActionDescriptor
// ============================================================================

/// A declarative button / menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub variant: Variant,
    #[serde(flatten)]
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm: Option<ConfirmSpec>,
}

impl ActionDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            variant: Variant::Default,
            kind,
            visible: None,
            confirm: None,
        }
    }

    pub fn navigate(id: impl Into<String>, label: impl Into<String>, route: impl Into<String>) -> Self {
        Self::new(id, label, ActionKind::Navigate { route: route.into() })
    }

    pub fn modal(id: impl Into<String>, label: impl Into<String>, modal: impl Into<String>) -> Self {
        Self::new(id, label, ActionKind::Modal { modal: modal.into() })
    }

    pub fn mutation(
        id: impl Into<String>,
        label: impl Into<String>,
        procedure: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            label,
            ActionKind::Mutation {
                procedure: procedure.into(),
                input: BTreeMap::new(),
                invalidate: Vec::new(),
                success_message: None,
            },
        )
    }

    pub fn function(id: impl Into<String>, label: impl Into<String>, handler: impl Into<String>) -> Self {
        Self::new(
            id,
            label,
            ActionKind::Function {
                handler: handler.into(),
            },
        )
    }

    pub fn export(
        id: impl Into<String>,
        label: impl Into<String>,
        procedure: impl Into<String>,
        format: ExportFormat,
    ) -> Self {
        Self::new(
            id,
            label,
            ActionKind::Export {
                procedure: procedure.into(),
                format,
                params: BTreeMap::new(),
            },
        )
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn visible_when(mut self, rule: Visibility) -> Self {
        self.visible = Some(rule);
        self
    }

    pub fn confirmed_by(mut self, confirm: ConfirmSpec) -> Self {
        self.confirm = Some(confirm);
        self
    }

    /// Bind one mutation / export input value
    pub fn with_input(mut self, name: impl Into<String>, value: Binding) -> Self {
        match &mut self.kind {
            ActionKind::Mutation { input, .. } => {
                input.insert(name.into(), value);
            }
            ActionKind::Export { params, .. } => {
                params.insert(name.into(), value);
            }
            _ => {}
        }
        self
    }

    /// Declare a query key to refetch after a successful mutation
    pub fn invalidates(mut self, target: impl Into<String>) -> Self {
        if let ActionKind::Mutation { invalidate, .. } = &mut self.kind {
            invalidate.push(target.into());
        }
        self
    }

    pub fn with_success_message(mut self, message: impl Into<String>) -> Self {
        if let ActionKind::Mutation {
            success_message, ..
        } = &mut self.kind
        {
            *success_message = Some(message.into());
        }
        self
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }
}

impl Validatable for ActionDescriptor {
    fn validate(&self) -> ScreenResult<()> {
        if self.id.trim().is_empty() {
            return Err(ScreenError::malformed_action("<empty>", "action id cannot be empty"));
        }
        let missing = |what: &str| {
            Err(ScreenError::malformed_action(
                &self.id,
                format!("{} action must declare config.{}", self.kind.name(), what),
            ))
        };
        match &self.kind {
            ActionKind::Navigate { route } if route.trim().is_empty() => missing("route"),
            ActionKind::Modal { modal } if modal.trim().is_empty() => missing("modal"),
            ActionKind::Mutation { procedure, .. } if procedure.trim().is_empty() => {
                missing("procedure")
            }
            ActionKind::Function { handler } if handler.trim().is_empty() => missing("handler"),
            ActionKind::Export { procedure, .. } if procedure.trim().is_empty() => {
                missing("procedure")
            }
            _ => Ok(()),
        }
    }
}

impl Identifiable for ActionDescriptor {
    fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// ActionKind
// ============================================================================

/// Action type together with its type-specific config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "config",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ActionKind {
    /// Go to a route template (`{{path}}` / `:field` placeholders)
    Navigate { route: String },

    /// Open a dialog owned by the external dialog layer
    Modal { modal: String },

    /// Call a procedure with an input built from bindings
    Mutation {
        procedure: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        input: BTreeMap<String, Binding>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        invalidate: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        success_message: Option<String>,
    },

    /// Hand off to a handler registered by id
    Function { handler: String },

    /// Fetch rows from a procedure and serialize them
    Export {
        procedure: String,
        #[serde(default)]
        format: ExportFormat,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        params: BTreeMap<String, Binding>,
    },
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Navigate { .. } => "navigate",
            ActionKind::Modal { .. } => "modal",
            ActionKind::Mutation { .. } => "mutation",
            ActionKind::Function { .. } => "function",
            ActionKind::Export { .. } => "export",
        }
    }
}

/// Serialization used by export actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

// ============================================================================
// ConfirmSpec
// ============================================================================

/// Confirmation dialog shown before an action executes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmSpec {
    pub title: String,
    pub message: String,
    #[serde(default = "default_confirm_label")]
    pub confirm_label: String,
    #[serde(default)]
    pub destructive: bool,
}

fn default_confirm_label() -> String {
    "Confirm".to_string()
}

impl ConfirmSpec {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: default_confirm_label(),
            destructive: false,
        }
    }

    pub fn destructive(mut self, confirm_label: impl Into<String>) -> Self {
        self.destructive = true;
        self.confirm_label = confirm_label.into();
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Operator;
    use serde_json::json;

    #[test]
    fn test_mutation_requires_procedure() {
        let action = ActionDescriptor::mutation("archive", "Archive", "");
        let err = action.validate().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("config.procedure"));

        let action = ActionDescriptor::mutation("archive", "Archive", "job.archive");
        assert!(action.is_valid());
    }

    #[test]
    fn test_other_kinds_validate_targets() {
        assert!(!ActionDescriptor::navigate("edit", "Edit", " ").is_valid());
        assert!(!ActionDescriptor::modal("log", "Log", "").is_valid());
        assert!(!ActionDescriptor::function("run", "Run", "").is_valid());
        assert!(!ActionDescriptor::export("csv", "CSV", "", ExportFormat::Csv).is_valid());
        assert!(!ActionDescriptor::modal("", "Log", "log-activity").is_valid());
    }

    #[test]
    fn test_builders() {
        let action = ActionDescriptor::mutation("close", "Close Job", "job.close")
            .with_input("id", Binding::field("id"))
            .invalidates("job.getById")
            .with_success_message("Job closed")
            .visible_when(Visibility::when("status", Operator::NotIn, json!(["filled"])))
            .confirmed_by(ConfirmSpec::new("Close job?", "Candidates will be notified.").destructive("Close"));

        match &action.kind {
            ActionKind::Mutation {
                input,
                invalidate,
                success_message,
                ..
            } => {
                assert!(input.contains_key("id"));
                assert_eq!(invalidate, &vec!["job.getById".to_string()]);
                assert_eq!(success_message.as_deref(), Some("Job closed"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(action.confirm.as_ref().is_some_and(|c| c.destructive));
        assert_eq!(action.kind_name(), "mutation");
    }

    #[test]
    fn test_serde_shape_matches_declarative_documents() {
        let action: ActionDescriptor = serde_json::from_str(
            r#"{
                "id": "edit",
                "label": "Edit Profile",
                "type": "navigate",
                "icon": "Edit",
                "variant": "default",
                "config": { "route": "/consultants/{{id}}/edit" }
            }"#,
        )
        .unwrap();
        assert_eq!(
            action.kind,
            ActionKind::Navigate {
                route: "/consultants/{{id}}/edit".to_string()
            }
        );

        let json = serde_json::to_value(ActionDescriptor::modal("log", "Log", "log-activity")).unwrap();
        assert_eq!(json["type"], "modal");
        assert_eq!(json["config"]["modal"], "log-activity");
    }
}
