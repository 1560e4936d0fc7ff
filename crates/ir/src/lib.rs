//! # Screenwright IR (Intermediate Representation)
//!
//! Declarative documents interpreted by the Screenwright runtime. Nothing
//! in this crate performs I/O beyond loading and saving catalog files.
//!
//! ## Core Concepts
//!
//! - **EntityConfig**: per-entity-type presentation metadata (names, columns, statuses, filters)
//! - **ScreenDefinition**: one page: header, data source, layout tree, actions
//! - **ActionDescriptor**: a declarative button (navigate, modal, mutation, function, export)
//! - **EntityJourney**: lifecycle steps and status-gated quick actions
//! - **WizardConfig**: multi-step form metadata used for draft reconciliation
//! - **Catalog**: the root container that holds all of the above
//!

// Module declarations
pub mod action;
pub mod binding;
pub mod builtin;
pub mod catalog;
pub mod column;
pub mod condition;
pub mod data_source;
pub mod draft;
pub mod entity;
pub mod journey;
pub mod layout;
pub mod registry;
pub mod screen;
pub mod serialization;
pub mod validation;

// Re-export commonly used types at crate root
pub use action::{ActionDescriptor, ActionKind, ConfirmSpec, ExportFormat};
pub use binding::{Binding, BindingSources, PathRef, resolve_map};
pub use catalog::Catalog;
pub use column::{Align, BadgeOption, ColumnConfig, ColumnFormat};
pub use condition::{Condition, Operator, Visibility, is_visible};
pub use data_source::{DataSource, NamedQuery, default_procedure};
pub use draft::{WizardConfig, WizardDraft, WizardStep};
pub use entity::{
    EntityConfig, EntityName, FilterConfig, FilterKind, FilterOption, SectionDefinition,
    SectionGroup, SectionGroups, StatusStyle,
};
pub use journey::{EntityJourney, JourneyStep, QuickAction, QuickActionKind, resolve_href};
pub use layout::{Layout, MetricConfig, Section, SectionKind, Tab, Thresholds};
pub use registry::EntityRegistry;
pub use screen::{Breadcrumb, ScreenDefinition, ScreenKind};
pub use serialization::{load_catalog, load_screen, save_catalog};
pub use validation::{ValidationResult, ValidationRule, Validator};

// Re-export core types that are commonly used with IR
pub use screenwright_core::{
    EntityType, FieldErrors, ScreenError, ScreenResult, SortDirection, SortSpec, Tone, Variant,
};

/// Current schema version for catalog files
pub const SCHEMA_VERSION: u32 = 1;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        // Actions
        ActionDescriptor,
        ActionKind,
        Binding,
        BindingSources,
        Catalog,
        ColumnConfig,
        ColumnFormat,
        DataSource,
        EntityConfig,
        EntityJourney,
        EntityRegistry,
        // Re-exported from core
        EntityType,
        Layout,
        QuickAction,
        ScreenDefinition,
        ScreenError,
        ScreenResult,
        Section,
        SectionKind,
        Tone,
        Visibility,
        WizardConfig,
        WizardDraft,
    };
}

// ============================================================================
// Tests
// ============================================================================
