//! Request scope and resolved context
//!
//! A `RequestScope` carries the route params and the session/user context
//! of one request. A `ResolvedContext` is the data bag produced by
//! resolving a screen's data source. Both are created per render and
//! dropped afterwards.

use screenwright_core::path;
use screenwright_ir::BindingSources;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// RequestScope
// ============================================================================

/// Route params and user/session context for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestScope {
    #[serde(default = "empty_object")]
    pub params: Value,
    #[serde(default = "empty_object")]
    pub context: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl Default for RequestScope {
    fn default() -> Self {
        Self {
            params: empty_object(),
            context: empty_object(),
        }
    }
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a route param (dotted paths create nested objects)
    pub fn with_param(mut self, name: &str, value: impl Into<Value>) -> Self {
        path::insert_path(&mut self.params, name, value.into());
        self
    }

    /// Set a context value such as `user.id`
    pub fn with_context(mut self, name: &str, value: impl Into<Value>) -> Self {
        path::insert_path(&mut self.context, name, value.into());
        self
    }

    /// Replace the whole context object
    pub fn with_context_value(mut self, context: Value) -> Self {
        self.context = context;
        self
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        path::lookup(&self.params, name)
    }

    /// Binding sources reading screen data from `data`
    pub fn sources<'a>(&'a self, data: &'a Value) -> BindingSources<'a> {
        BindingSources::new(data, &self.params, &self.context)
    }
}

// ============================================================================
// ResolvedContext
// ============================================================================

/// Data produced by resolving a screen's data source
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedContext {
    root: Value,
}

impl Default for ResolvedContext {
    fn default() -> Self {
        Self::empty()
    }
}

impl ResolvedContext {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn empty() -> Self {
        Self::new(empty_object())
    }

    /// Safe lookup; `None` when any segment is absent
    pub fn get(&self, path: &str) -> Option<&Value> {
        path::lookup(&self.root, path)
    }

    /// Display text for a scalar at `path`
    pub fn text(&self, path: &str) -> Option<String> {
        self.get(path).and_then(path::display_scalar)
    }

    /// Array at `path`, or an empty slice
    pub fn items(&self, path: &str) -> &[Value] {
        match self.get(path) {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        match &self.root {
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            _ => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
