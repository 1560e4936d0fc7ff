//! Validation rules for catalogs
//!
//! Document-level checks live on each type's `Validatable` impl. The rules
//! here look across documents: screens that name unregistered entity
//! types, journeys whose statuses have no style, and so on.

use crate::catalog::Catalog;
use crate::column::ColumnConfig;
use crate::data_source::DataSource;
use crate::layout::{Section, SectionKind};
use crate::screen::ScreenDefinition;
use screenwright_core::{ScreenError, ScreenResult, Validatable, duplicate_ids};

// ============================================================================
// ValidationResult
// ============================================================================

/// Result of a validation operation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// List of errors (empty if valid)
    pub errors: Vec<ValidationError>,

    /// List of warnings (non-fatal issues)
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Fails with every error message joined when any error was recorded
    pub fn to_result(self) -> ScreenResult<()> {
        if self.valid {
            Ok(())
        } else {
            let msg = self
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            Err(ScreenError::InvalidConfig(msg))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

// ============================================================================
// ValidationError
// ============================================================================

#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error code for programmatic handling
    pub code: ValidationErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Path to the problematic element (e.g., "screens.job-detail.sections.pipeline")
    pub path: Option<String>,
}

impl ValidationError {
    pub fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] {}", path, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

/// Error codes for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    // Entity errors
    InvalidEntityConfig,

    // Screen errors
    EmptyScreenId,
    DuplicateSectionId,
    DuplicateActionId,
    MalformedAction,
    UnknownEntityType,
    ColumnWithoutKey,
    SectionSourceNotRelated,

    // Journey errors
    JourneyForUnknownEntity,
    EmptyJourney,
    DuplicateStepId,
    MalformedQuickAction,

    // Wizard errors
    WizardForUnknownEntity,
}

// ============================================================================
// ValidationWarning
// ============================================================================

/// A validation warning (non-fatal issue)
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub code: ValidationWarningCode,
    pub message: String,
    pub path: Option<String>,
}

impl ValidationWarning {
    pub fn new(code: ValidationWarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] Warning: {}", path, self.message)
        } else {
            write!(f, "Warning: {}", self.message)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationWarningCode {
    UnstyledJourneyStatus,
    EntityWithoutColumns,
    WizardWithoutSteps,
    WizardWithoutTitleFields,
}

// ============================================================================
// ValidationRule Trait
// ============================================================================

/// Trait for validation rules
pub trait ValidationRule {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn validate(&self, catalog: &Catalog) -> ValidationResult;
}

// ============================================================================
// Validator
// ============================================================================

/// Catalog validator that runs multiple validation rules
#[derive(Default)]
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator with default rules
    pub fn with_default_rules() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(EntityConfigsRule));
        validator.add_rule(Box::new(ScreensRule));
        validator.add_rule(Box::new(JourneysRule));
        validator.add_rule(Box::new(WizardsRule));
        validator
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Validate a catalog with all rules
    pub fn validate(&self, catalog: &Catalog) -> ValidationResult {
        let mut result = ValidationResult::ok();
        for rule in &self.rules {
            result.merge(rule.validate(catalog));
        }
        result
    }

    pub fn validate_result(&self, catalog: &Catalog) -> ScreenResult<()> {
        self.validate(catalog).to_result()
    }

    /// Validate a single screen against a catalog's entity registry
    pub fn validate_screen(&self, catalog: &Catalog, screen: &ScreenDefinition) -> ValidationResult {
        check_screen(catalog, screen)
    }
}

// ============================================================================
// Built-in Validation Rules
// ============================================================================

/// Rule: every entity config is internally consistent
pub struct EntityConfigsRule;

impl ValidationRule for EntityConfigsRule {
    fn name(&self) -> &'static str {
        "entity_configs"
    }

    fn description(&self) -> &'static str {
        "Validates entity configs and warns about entities with no list columns"
    }

    fn validate(&self, catalog: &Catalog) -> ValidationResult {
        let mut result = ValidationResult::ok();
        for config in catalog.entities.configs() {
            let path = format!("entities.{}", config.entity_type);
            if let Err(e) = config.validate() {
                result.add_error(
                    ValidationError::new(ValidationErrorCode::InvalidEntityConfig, e.to_string())
                        .with_path(&path),
                );
            }
            if config.columns.is_empty() {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::EntityWithoutColumns,
                        format!("Entity '{}' has no list columns", config.entity_type),
                    )
                    .with_path(&path),
                );
            }
        }
        result
    }
}

/// Rule: screens reference registered entities and declare well-formed
/// sections and actions
pub struct ScreensRule;

impl ValidationRule for ScreensRule {
    fn name(&self) -> &'static str {
        "screens"
    }

    fn description(&self) -> &'static str {
        "Validates screen ids, data sources, sections, and actions"
    }

    fn validate(&self, catalog: &Catalog) -> ValidationResult {
        let mut result = ValidationResult::ok();
        for screen in catalog.screens.values() {
            result.merge(check_screen(catalog, screen));
        }
        result
    }
}

fn check_screen(catalog: &Catalog, screen: &ScreenDefinition) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let screen_path = format!("screens.{}", screen.id);

    if screen.id.trim().is_empty() {
        result.add_error(ValidationError::new(
            ValidationErrorCode::EmptyScreenId,
            "Screen id cannot be empty",
        ));
    }

    check_entity_reference(catalog, &screen.data_source, &screen_path, &mut result);

    let sections = screen.layout.sections();
    for dup in duplicate_ids(sections.iter().copied()) {
        result.add_error(
            ValidationError::new(
                ValidationErrorCode::DuplicateSectionId,
                format!("Section '{}' is declared more than once", dup),
            )
            .with_path(&screen_path),
        );
    }
    for section in &sections {
        check_section(catalog, section, &screen_path, &mut result);
    }

    let actions = screen.all_actions();
    for dup in duplicate_ids(actions.iter().copied()) {
        result.add_error(
            ValidationError::new(
                ValidationErrorCode::DuplicateActionId,
                format!("Action '{}' is declared more than once", dup),
            )
            .with_path(&screen_path),
        );
    }
    for action in actions {
        if let Err(e) = action.validate() {
            result.add_error(
                ValidationError::new(ValidationErrorCode::MalformedAction, e.to_string())
                    .with_path(format!("{}.actions.{}", screen_path, action.id)),
            );
        }
    }
    result
}

fn check_section(catalog: &Catalog, section: &Section, screen_path: &str, result: &mut ValidationResult) {
    let path = format!("{}.sections.{}", screen_path, section.id);

    if let Some(source) = &section.data_source {
        if !matches!(source, DataSource::Related { .. }) {
            result.add_error(
                ValidationError::new(
                    ValidationErrorCode::SectionSourceNotRelated,
                    format!(
                        "Section data sources must be 'related', found '{}'",
                        source.kind_name()
                    ),
                )
                .with_path(&path),
            );
        }
        check_entity_reference(catalog, source, &path, result);
    }

    let columns: &[ColumnConfig] = match &section.kind {
        SectionKind::Table { columns, .. } => columns.as_slice(),
        SectionKind::InfoCard { fields } => fields.as_slice(),
        _ => &[],
    };
    for column in columns {
        if column.key.trim().is_empty() {
            result.add_error(
                ValidationError::new(ValidationErrorCode::ColumnWithoutKey, "Column key cannot be empty")
                    .with_path(&path),
            );
        }
    }
}

fn check_entity_reference(
    catalog: &Catalog,
    source: &DataSource,
    path: &str,
    result: &mut ValidationResult,
) {
    if let Some(entity_type) = source.entity_type() {
        if !catalog.entities.contains(entity_type.as_str()) {
            result.add_error(
                ValidationError::new(
                    ValidationErrorCode::UnknownEntityType,
                    format!("Data source references unknown entity type '{}'", entity_type),
                )
                .with_path(path),
            );
        }
    }
}

/// Rule: journeys belong to registered entities and their statuses are styled
pub struct JourneysRule;

impl ValidationRule for JourneysRule {
    fn name(&self) -> &'static str {
        "journeys"
    }

    fn description(&self) -> &'static str {
        "Validates journeys, their steps, and their quick actions"
    }

    fn validate(&self, catalog: &Catalog) -> ValidationResult {
        let mut result = ValidationResult::ok();
        for journey in catalog.journeys.values() {
            let path = format!("journeys.{}", journey.entity_type);

            if journey.steps.is_empty() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::EmptyJourney,
                        format!("Journey for '{}' has no steps", journey.entity_type),
                    )
                    .with_path(&path),
                );
            }
            for dup in duplicate_ids(&journey.steps) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::DuplicateStepId,
                        format!("Step '{}' is declared more than once", dup),
                    )
                    .with_path(&path),
                );
            }
            for action in &journey.quick_actions {
                if let Err(e) = action.validate() {
                    result.add_error(
                        ValidationError::new(ValidationErrorCode::MalformedQuickAction, e.to_string())
                            .with_path(format!("{}.quickActions.{}", path, action.id)),
                    );
                }
            }

            let Ok(config) = catalog.entities.get_config(journey.entity_type.as_str()) else {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::JourneyForUnknownEntity,
                        format!("Journey for unknown entity type '{}'", journey.entity_type),
                    )
                    .with_path(&path),
                );
                continue;
            };
            for status in journey.statuses() {
                if !config.has_status(status) {
                    result.add_warning(
                        ValidationWarning::new(
                            ValidationWarningCode::UnstyledJourneyStatus,
                            format!(
                                "Status '{}' has no style on entity '{}'",
                                status, journey.entity_type
                            ),
                        )
                        .with_path(&path),
                    );
                }
            }
        }
        result
    }
}

/// Rule: wizards belong to registered entities
pub struct WizardsRule;

impl ValidationRule for WizardsRule {
    fn name(&self) -> &'static str {
        "wizards"
    }

    fn description(&self) -> &'static str {
        "Validates wizard entity types, steps, and title fields"
    }

    fn validate(&self, catalog: &Catalog) -> ValidationResult {
        let mut result = ValidationResult::ok();
        for wizard in catalog.wizards.values() {
            let path = format!("wizards.{}", wizard.store_key);
            if !catalog.entities.contains(wizard.entity_type.as_str()) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::WizardForUnknownEntity,
                        format!("Wizard for unknown entity type '{}'", wizard.entity_type),
                    )
                    .with_path(&path),
                );
            }
            if wizard.steps.is_empty() {
                result.add_warning(
                    ValidationWarning::new(ValidationWarningCode::WizardWithoutSteps, "Wizard has no steps")
                        .with_path(&path),
                );
            }
            if wizard.title_fields.is_empty() {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::WizardWithoutTitleFields,
                        "Wizard has no title fields, so no draft is ever archived",
                    )
                    .with_path(&path),
                );
            }
        }
        result
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionDescriptor;
    use crate::binding::Binding;
    use crate::draft::WizardConfig;
    use crate::entity::EntityConfig;
    use crate::journey::{EntityJourney, JourneyStep, QuickAction};
    use crate::layout::Layout;
    use crate::screen::ScreenKind;
    use screenwright_core::Tone;

    fn base_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .add_entity(
                EntityConfig::new("job")
                    .with_column(ColumnConfig::new("title"))
                    .with_status("open", "Open", Tone::Green),
            )
            .unwrap();
        catalog
    }

    fn screen(sections: Vec<Section>) -> ScreenDefinition {
        ScreenDefinition::new(
            "job-detail",
            ScreenKind::Detail,
            Binding::field("title"),
            DataSource::entity("job"),
            Layout::SingleColumn { sections },
        )
    }

    fn codes(result: &ValidationResult) -> Vec<ValidationErrorCode> {
        result.errors.iter().map(|e| e.code).collect()
    }

    #[test]
    fn test_valid_catalog() {
        let result = Validator::with_default_rules().validate(&base_catalog());
        assert!(result.valid);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_screen_errors() {
        let mut catalog = base_catalog();
        catalog
            .add_screen(
                screen(vec![
                    Section::table("pipeline", vec![ColumnConfig::new("")])
                        .from_source(DataSource::list("submission")),
                    Section::info_card("pipeline", vec![]),
                ])
                .with_action(ActionDescriptor::mutation("close", "Close", "")),
            )
            .unwrap();

        let result = Validator::with_default_rules().validate(&catalog);
        let codes = codes(&result);
        assert!(codes.contains(&ValidationErrorCode::DuplicateSectionId));
        assert!(codes.contains(&ValidationErrorCode::SectionSourceNotRelated));
        assert!(codes.contains(&ValidationErrorCode::UnknownEntityType));
        assert!(codes.contains(&ValidationErrorCode::ColumnWithoutKey));
        assert!(codes.contains(&ValidationErrorCode::MalformedAction));
    }

    #[test]
    fn test_journey_rules() {
        let mut catalog = base_catalog();
        catalog.add_journey(
            EntityJourney::new("job")
                .with_step(JourneyStep::new("info", "Info").active_for(&["draft"]))
                .with_quick_action(QuickAction::navigate("edit", "Edit", "")),
        );
        let result = Validator::with_default_rules().validate(&catalog);
        assert_eq!(codes(&result), vec![ValidationErrorCode::MalformedQuickAction]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, ValidationWarningCode::UnstyledJourneyStatus);
    }

    #[test]
    fn test_wizard_rules() {
        let mut catalog = base_catalog();
        catalog.add_wizard(WizardConfig::new("invoice-wizard", "invoice"));
        let result = Validator::with_default_rules().validate(&catalog);
        assert_eq!(codes(&result), vec![ValidationErrorCode::WizardForUnknownEntity]);
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_to_result_joins_messages() {
        let mut result = ValidationResult::ok();
        result.add_error(ValidationError::new(ValidationErrorCode::EmptyJourney, "a").with_path("journeys.x"));
        result.add_error(ValidationError::new(ValidationErrorCode::EmptyJourney, "b"));
        let err = result.to_result().unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration: [journeys.x] a; b");
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(
            Validator::with_default_rules().rule_names(),
            vec!["entity_configs", "screens", "journeys", "wizards"]
        );
    }
}
