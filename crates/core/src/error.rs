//! Error types for Screenwright
//!
//! Every layer below the renderer and the dispatcher returns a typed
//! `ScreenError`. The renderer and the dispatcher catch these at their
//! boundary and turn them into user-visible states.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for Screenwright
#[derive(Debug, Error)]
pub enum ScreenError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Entity type is not registered
    #[error("Unknown entity type: '{0}'")]
    UnknownEntityType(String),

    /// Entity type registered twice
    #[error("Duplicate entity type: '{0}' is already registered")]
    DuplicateEntityType(String),

    /// Screen id is not registered
    #[error("Unknown screen: '{0}'")]
    UnknownScreen(String),

    /// Screen id registered twice
    #[error("Duplicate screen: '{0}' is already registered")]
    DuplicateScreen(String),

    /// Action config does not match its type
    #[error("Malformed action '{action}': {message}")]
    MalformedAction { action: String, message: String },

    /// Route template placeholder has no value
    #[error("Route template '{template}' has no value for placeholder '{placeholder}'")]
    MissingPlaceholder {
        template: String,
        placeholder: String,
    },

    /// Procedure name does not resolve to a callable
    #[error("Unknown procedure: '{0}'")]
    UnknownProcedure(String),

    /// Function action handler is not registered
    #[error("Unknown action handler: '{0}'")]
    UnknownHandler(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Data Fetch Errors
    // ========================================================================
    /// A procedure call rejected
    #[error("Procedure '{procedure}' failed: {message}")]
    ProcedureFailed { procedure: String, message: String },

    /// One sub-query of an aggregate data source rejected
    #[error("Aggregate query '{key}' failed: {message}")]
    AggregateFailed { key: String, message: String },

    // ========================================================================
    // Action Execution Errors
    // ========================================================================
    /// Action failed at trigger time
    #[error("Action '{action}' failed: {message}")]
    ActionFailed { action: String, message: String },

    /// Action is already executing or awaiting confirmation
    #[error("Action '{0}' is already in progress")]
    ActionInFlight(String),

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Per-field validation errors
    #[error("Validation failed: {0}")]
    FieldValidation(FieldErrors),

    // ========================================================================
    // Storage Errors
    // ========================================================================
    /// Draft does not exist in the store
    #[error("Draft not found: {0}")]
    DraftNotFound(Uuid),

    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Schema version mismatch
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch { expected: u32, found: u32 },

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Coarse classification used at the render and action boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Configuration,
    DataFetch,
    ActionExecution,
    Validation,
    Storage,
    Internal,
}

impl ScreenError {
    /// Create a malformed-action error
    pub fn malformed_action(action: impl Into<String>, msg: impl Into<String>) -> Self {
        ScreenError::MalformedAction {
            action: action.into(),
            message: msg.into(),
        }
    }

    /// Create a missing-placeholder error
    pub fn missing_placeholder(template: impl Into<String>, placeholder: impl Into<String>) -> Self {
        ScreenError::MissingPlaceholder {
            template: template.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Create a procedure failure
    pub fn procedure_failed(procedure: impl Into<String>, msg: impl Into<String>) -> Self {
        ScreenError::ProcedureFailed {
            procedure: procedure.into(),
            message: msg.into(),
        }
    }

    /// Create an action failure
    pub fn action_failed(action: impl Into<String>, msg: impl Into<String>) -> Self {
        ScreenError::ActionFailed {
            action: action.into(),
            message: msg.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ScreenError::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        ScreenError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        ScreenError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Classify this error
    pub fn class(&self) -> ErrorClass {
        match self {
            ScreenError::UnknownEntityType(_)
            | ScreenError::DuplicateEntityType(_)
            | ScreenError::UnknownScreen(_)
            | ScreenError::DuplicateScreen(_)
            | ScreenError::MalformedAction { .. }
            | ScreenError::MissingPlaceholder { .. }
            | ScreenError::UnknownProcedure(_)
            | ScreenError::UnknownHandler(_)
            | ScreenError::InvalidConfig(_) => ErrorClass::Configuration,
            ScreenError::ProcedureFailed { .. } | ScreenError::AggregateFailed { .. } => {
                ErrorClass::DataFetch
            }
            ScreenError::ActionFailed { .. } | ScreenError::ActionInFlight(_) => {
                ErrorClass::ActionExecution
            }
            ScreenError::Validation(_) | ScreenError::FieldValidation(_) => ErrorClass::Validation,
            ScreenError::DraftNotFound(_)
            | ScreenError::Io(_)
            | ScreenError::FileRead { .. }
            | ScreenError::FileWrite { .. }
            | ScreenError::Json(_)
            | ScreenError::Toml(_)
            | ScreenError::SchemaVersionMismatch { .. } => ErrorClass::Storage,
            ScreenError::Internal(_) | ScreenError::WithContext { .. } => ErrorClass::Internal,
        }
    }

    /// Check if this error is a configuration error
    pub fn is_configuration(&self) -> bool {
        self.class() == ErrorClass::Configuration
    }

    /// Check if this error is a data fetch error
    pub fn is_data_fetch(&self) -> bool {
        self.class() == ErrorClass::DataFetch
    }

    /// Check if this error happened while executing an action
    pub fn is_action(&self) -> bool {
        self.class() == ErrorClass::ActionExecution
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        self.class() == ErrorClass::Validation
    }

    /// Field errors carried by this error, if any
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ScreenError::FieldValidation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Result type alias using ScreenError
pub type ScreenResult<T> = Result<T, ScreenError>;

// ============================================================================
// FieldErrors
// ============================================================================

/// Validation messages keyed by form field, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Messages for one field
    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// `Ok(())` when empty, otherwise a `FieldValidation` error
    pub fn into_result(self) -> ScreenResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ScreenError::FieldValidation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> ScreenResult<T>;
}

impl<T, E: Into<ScreenError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> ScreenResult<T> {
        self.map_err(|e| {
            let err: ScreenError = e.into();
            ScreenError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_configuration_errors() {
        let err = ScreenError::UnknownEntityType("widget".to_string());
        assert!(err.is_configuration());
        assert!(!err.is_data_fetch());
        assert_eq!(err.to_string(), "Unknown entity type: 'widget'");

        let err = ScreenError::missing_placeholder("/jobs/{{id}}", "id");
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Route template '/jobs/{{id}}' has no value for placeholder 'id'"
        );
    }

    #[test]
    fn test_data_fetch_errors() {
        let err = ScreenError::AggregateFailed {
            key: "blockers".to_string(),
            message: "timeout".to_string(),
        };
        assert!(err.is_data_fetch());
        assert_eq!(err.to_string(), "Aggregate query 'blockers' failed: timeout");
    }

    #[test]
    fn test_action_errors() {
        let err = ScreenError::action_failed("close", "permission denied");
        assert!(err.is_action());
        assert_eq!(err.class(), ErrorClass::ActionExecution);
        assert_eq!(err.to_string(), "Action 'close' failed: permission denied");
    }

    #[test]
    fn test_field_errors() {
        let mut errors = FieldErrors::new();
        errors.add("title", "is required");
        errors.add("account_id", "is required");
        errors.add("title", "must be shorter");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("title").len(), 2);
        assert!(errors.get("missing").is_empty());
        assert_eq!(
            errors.to_string(),
            "account_id: is required; title: is required, must be shorter"
        );

        let err = errors.into_result().unwrap_err();
        assert!(err.is_validation());
        assert!(err.field_errors().is_some());
    }

    #[test]
    fn test_empty_field_errors_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_error_with_context() {
        let err = ScreenError::with_context("Loading catalog", "Permission denied");
        assert_eq!(err.to_string(), "Loading catalog: Permission denied");

        let io: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = io.with_context("Reading drafts").unwrap_err();
        assert_eq!(err.class(), ErrorClass::Internal);
        assert!(err.to_string().starts_with("Reading drafts: IO error"));
    }

    #[test]
    fn test_storage_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ScreenError = io_err.into();
        assert_eq!(err.class(), ErrorClass::Storage);
    }
}
