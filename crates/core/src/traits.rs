//! Core traits for Screenwright
//!
//! Behaviors shared by configuration documents and persisted records:
//! validation, identity, and timestamps.

use crate::error::ScreenResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Configuration documents implement this so misconfiguration surfaces
/// at load time rather than during a render.
///
/// # Example
///
/// ```rust,ignore
/// use screenwright_core::{Validatable, ScreenResult, ScreenError};
///
/// struct Route(String);
///
/// impl Validatable for Route {
///     fn validate(&self) -> ScreenResult<()> {
///         if self.0.is_empty() {
///             return Err(ScreenError::validation("Route cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    fn validate(&self) -> ScreenResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Identifiable Trait
// ============================================================================

/// Trait for configuration items addressed by a string id
pub trait Identifiable {
    /// Get the identifier
    fn id(&self) -> &str;

    /// Check if this matches another identifier
    fn matches_id(&self, id: &str) -> bool {
        self.id() == id
    }
}

/// Ids that appear more than once, in first-duplicate order
pub fn duplicate_ids<'a, T: Identifiable + 'a>(items: impl IntoIterator<Item = &'a T>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();
    for item in items {
        let id = item.id();
        if !seen.insert(id.to_string()) && !duplicates.iter().any(|d: &String| d == id) {
            duplicates.push(id.to_string());
        }
    }
    duplicates
}

// ============================================================================
// Timestamped Trait
// ============================================================================

/// Trait for types that track creation and modification times
pub trait Timestamped {
    /// Get the creation timestamp
    fn created_at(&self) -> chrono::DateTime<chrono::Utc>;

    /// Get the last modification timestamp
    fn modified_at(&self) -> chrono::DateTime<chrono::Utc>;

    /// Update the modification timestamp to now
    fn touch(&mut self);
}

// ============================================================================
// Tests
// ============================================================================
