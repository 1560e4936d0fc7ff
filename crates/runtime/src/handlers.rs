//! Function action handlers
//!
//! `function` actions name a handler; the application registers the
//! handler under that name before the dispatcher is built.

use async_trait::async_trait;
use screenwright_core::{ScreenError, ScreenResult};
use screenwright_ir::ActionDescriptor;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Handler invoked by a `function` action
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// `data` is the resolved context of the screen the action lives on
    async fn handle(&self, action: &ActionDescriptor, data: &Value) -> ScreenResult<Value>;
}

/// Wraps a synchronous closure as an `ActionHandler`
pub struct FnHandler<F>(F);

#[async_trait]
impl<F> ActionHandler for FnHandler<F>
where
    F: Fn(&ActionDescriptor, &Value) -> ScreenResult<Value> + Send + Sync,
{
    async fn handle(&self, action: &ActionDescriptor, data: &Value) -> ScreenResult<Value> {
        (self.0)(action, data)
    }
}

/// Handlers keyed by name
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, Arc<dyn ActionHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn ActionHandler>) {
        self.handlers.insert(name.into(), handler);
    }

    pub fn with_handler(mut self, name: impl Into<String>, handler: Arc<dyn ActionHandler>) -> Self {
        self.register(name, handler);
        self
    }

    /// Register a synchronous closure
    pub fn with_fn<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&ActionDescriptor, &Value) -> ScreenResult<Value> + Send + Sync + 'static,
    {
        self.with_handler(name, Arc::new(FnHandler(f)))
    }

    pub fn get(&self, name: &str) -> ScreenResult<Arc<dyn ActionHandler>> {
        self.handlers
            .get(name)
            .cloned()
            .ok_or_else(|| ScreenError::UnknownHandler(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
