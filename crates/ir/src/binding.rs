//! Value bindings
//!
//! Configurations reference runtime data through bindings: a literal, a
//! path into the resolved screen data (`field`), a path into the route
//! parameters (`param`), or a path into the session context (`context`).

use screenwright_core::path;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Binding
// ============================================================================

/// A value that is either written inline or read from runtime data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Binding {
    Path(PathRef),
    Literal(Value),
}

/// Where a bound path is read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PathRef {
    /// Resolved screen data
    Field { path: String },
    /// Route parameters
    Param { path: String },
    /// Session / user context
    Context { path: String },
}

impl Binding {
    pub fn literal(value: impl Into<Value>) -> Self {
        Binding::Literal(value.into())
    }

    pub fn field(path: impl Into<String>) -> Self {
        Binding::Path(PathRef::Field { path: path.into() })
    }

    pub fn param(path: impl Into<String>) -> Self {
        Binding::Path(PathRef::Param { path: path.into() })
    }

    pub fn context(path: impl Into<String>) -> Self {
        Binding::Path(PathRef::Context { path: path.into() })
    }

    /// Resolve against the given sources; `None` means absent
    pub fn resolve(&self, sources: &BindingSources<'_>) -> Option<Value> {
        match self {
            Binding::Literal(value) => Some(value.clone()),
            Binding::Path(PathRef::Field { path: p }) => path::lookup(sources.data, p).cloned(),
            Binding::Path(PathRef::Param { path: p }) => path::lookup(sources.params, p).cloned(),
            Binding::Path(PathRef::Context { path: p }) => {
                path::lookup(sources.context, p).cloned()
            }
        }
    }

    /// Resolve to display text; absent and non-scalar values have none
    pub fn resolve_text(&self, sources: &BindingSources<'_>) -> Option<String> {
        self.resolve(sources).as_ref().and_then(path::display_scalar)
    }

    /// Short description used in diagnostics
    pub fn describe(&self) -> String {
        match self {
            Binding::Literal(value) => value.to_string(),
            Binding::Path(PathRef::Field { path }) => format!("field:{}", path),
            Binding::Path(PathRef::Param { path }) => format!("param:{}", path),
            Binding::Path(PathRef::Context { path }) => format!("context:{}", path),
        }
    }
}

impl From<&str> for Binding {
    fn from(text: &str) -> Self {
        Binding::literal(text)
    }
}

impl From<String> for Binding {
    fn from(text: String) -> Self {
        Binding::literal(text)
    }
}

/// Resolve a map of bindings into a JSON object, dropping absent values
pub fn resolve_map(
    bindings: &BTreeMap<String, Binding>,
    sources: &BindingSources<'_>,
) -> serde_json::Map<String, Value> {
    bindings
        .iter()
        .filter_map(|(name, binding)| binding.resolve(sources).map(|v| (name.clone(), v)))
        .collect()
}

// ============================================================================
// BindingSources
// ============================================================================

/// The three data roots a binding can read from
#[derive(Debug, Clone, Copy)]
pub struct BindingSources<'a> {
    pub data: &'a Value,
    pub params: &'a Value,
    pub context: &'a Value,
}

impl<'a> BindingSources<'a> {
    pub fn new(data: &'a Value, params: &'a Value, context: &'a Value) -> Self {
        Self {
            data,
            params,
            context,
        }
    }

    /// Same params and context, different screen data
    pub fn with_data(self, data: &'a Value) -> Self {
        Self { data, ..self }
    }
}

// ============================================================================
// Tests
// ============================================================================
