//! # Screenwright Core
//!
//! Core types, traits, and error handling for Screenwright.
//!
//! This crate provides the foundational building blocks used by the
//! configuration DSL and its interpreter:
//!
//! - **Errors**: `ScreenError` / `ScreenResult`, classified by layer
//! - **Paths**: safe dotted-path lookup over JSON values
//! - **Types**: `EntityType`, `Tone`, `SortSpec`, `Variant`
//! - **Traits**: `Validatable`, `Identifiable`, `Timestamped`
//!

pub mod error;
pub mod path;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ErrorClass, FieldErrors, ResultExt, ScreenError, ScreenResult};
pub use traits::{Identifiable, Timestamped, Validatable, duplicate_ids};
pub use types::{EntityType, SortDirection, SortSpec, Tone, Variant};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
