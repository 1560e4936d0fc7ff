//! Wizard drafts
//!
//! A `WizardDraft` is a persisted, partially completed multi-step form.
//! `WizardConfig` describes the wizard that produces it: which fields
//! make a draft worth keeping and which fields each step requires.

use chrono::{DateTime, Utc};
use screenwright_core::{EntityType, FieldErrors, Identifiable, ScreenResult, Timestamped, path};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ============================================================================
// WizardDraft
// ============================================================================

/// A saved, unfinished wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardDraft {
    pub id: Uuid,
    pub store_key: String,
    pub entity_type: EntityType,
    pub display_name: String,
    pub form_data: Value,
    pub current_step: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WizardDraft {
    pub fn new(config: &WizardConfig, form_data: Value, current_step: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            store_key: config.store_key.clone(),
            entity_type: config.entity_type.clone(),
            display_name: config.display_name(&form_data),
            form_data,
            current_step,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the form contents and step, refreshing the display name
    pub fn update(&mut self, config: &WizardConfig, form_data: Value, current_step: u32) {
        self.display_name = config.display_name(&form_data);
        self.form_data = form_data;
        self.current_step = current_step;
        self.touch();
    }

    /// Whether this draft holds exactly `form_data`
    pub fn holds(&self, form_data: &Value) -> bool {
        match (serde_json::to_string(&self.form_data), serde_json::to_string(form_data)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl Timestamped for WizardDraft {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn modified_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ============================================================================
// WizardConfig
// ============================================================================

/// Static description of a multi-step wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardConfig {
    pub store_key: String,
    pub entity_type: EntityType,
    /// Fields whose content makes a draft worth keeping, in display-name order
    #[serde(default)]
    pub title_fields: Vec<String>,
    #[serde(default)]
    pub steps: Vec<WizardStep>,
}

impl WizardConfig {
    pub fn new(store_key: impl Into<String>, entity_type: impl Into<EntityType>) -> Self {
        Self {
            store_key: store_key.into(),
            entity_type: entity_type.into(),
            title_fields: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn titled_by(mut self, fields: &[&str]) -> Self {
        self.title_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_step(mut self, step: WizardStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Default meaningful-content test: any title field non-blank
    pub fn has_meaningful_content(&self, form_data: &Value) -> bool {
        self.title_fields.iter().any(|field| {
            path::lookup(form_data, field)
                .and_then(path::display_scalar)
                .is_some()
        })
    }

    /// First non-blank title field, or a generic name
    pub fn display_name(&self, form_data: &Value) -> String {
        self.title_fields
            .iter()
            .find_map(|field| path::lookup(form_data, field).and_then(path::display_scalar))
            .map(|text| text.trim().to_string())
            .unwrap_or_else(|| format!("Untitled {}", self.entity_type))
    }

    /// Check every step's required fields; all failures are reported
    pub fn validate_form(&self, form_data: &Value) -> ScreenResult<()> {
        let mut errors = FieldErrors::new();
        for step in &self.steps {
            for field in &step.required_fields {
                let filled = path::lookup(form_data, field).is_some_and(|v| match v {
                    Value::Null => false,
                    Value::String(s) => !s.trim().is_empty(),
                    Value::Array(items) => !items.is_empty(),
                    _ => true,
                });
                if !filled {
                    errors.add(field.clone(), format!("{} is required", step.label_for(field)));
                }
            }
        }
        errors.into_result()
    }

    pub fn step_count(&self) -> u32 {
        self.steps.len() as u32
    }
}

impl Identifiable for WizardConfig {
    fn id(&self) -> &str {
        &self.store_key
    }
}

/// One page of a wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardStep {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub required_fields: Vec<String>,
}

impl WizardStep {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required_fields: Vec::new(),
        }
    }

    pub fn requiring(mut self, fields: &[&str]) -> Self {
        self.required_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    fn label_for(&self, field: &str) -> String {
        use heck::ToTitleCase;
        field
            .rsplit('.')
            .next()
            .unwrap_or(field)
            .to_title_case()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn job_wizard() -> WizardConfig {
        WizardConfig::new("job-intake", "job")
            .titled_by(&["title", "account.name"])
            .with_step(WizardStep::new("basics", "Basics").requiring(&["title", "accountId"]))
            .with_step(WizardStep::new("rates", "Rates").requiring(&["rates.billRate"]))
    }

    #[test]
    fn test_meaningful_content() {
        let wizard = job_wizard();
        assert!(!wizard.has_meaningful_content(&json!({})));
        assert!(!wizard.has_meaningful_content(&json!({ "title": "   " })));
        assert!(wizard.has_meaningful_content(&json!({ "account": { "name": "Acme" } })));
    }

    #[test]
    fn test_display_name() {
        let wizard = job_wizard();
        assert_eq!(wizard.display_name(&json!({ "title": " Rust Engineer " })), "Rust Engineer");
        assert_eq!(wizard.display_name(&json!({})), "Untitled job");
    }

    #[test]
    fn test_validate_form_reports_each_field() {
        let wizard = job_wizard();
        let err = wizard
            .validate_form(&json!({ "title": "Rust Engineer", "rates": {} }))
            .unwrap_err();
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("accountId"), &["Account Id is required".to_string()]);
        assert_eq!(fields.get("rates.billRate"), &["Bill Rate is required".to_string()]);

        assert!(
            wizard
                .validate_form(&json!({ "title": "x", "accountId": "a1", "rates": { "billRate": 90 } }))
                .is_ok()
        );
    }

    #[test]
    fn test_draft_update_and_holds() {
        let wizard = job_wizard();
        let mut draft = WizardDraft::new(&wizard, json!({ "title": "A" }), 0);
        let created = draft.created_at;
        assert!(draft.holds(&json!({ "title": "A" })));

        draft.update(&wizard, json!({ "title": "B" }), 1);
        assert_eq!(draft.display_name, "B");
        assert_eq!(draft.current_step, 1);
        assert!(draft.modified_at() >= created);
        assert!(!draft.holds(&json!({ "title": "A" })));
    }
}
