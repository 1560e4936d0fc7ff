//! Procedure invocation boundary
//!
//! Data sources and mutation actions name a procedure and an input object.
//! How the call is transported is up to the `ProcedureClient`
//! implementation; the runtime only needs name → async callable.

use async_trait::async_trait;
use futures::future::BoxFuture;
use screenwright_core::{ScreenError, ScreenResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Something that can execute a named procedure
#[async_trait]
pub trait ProcedureClient: Send + Sync {
    async fn call(&self, procedure: &str, input: Value) -> ScreenResult<Value>;
}

type ProcedureFn = Arc<dyn Fn(Value) -> BoxFuture<'static, ScreenResult<Value>> + Send + Sync>;

// ============================================================================
// ProcedureRegistry
// ============================================================================

/// In-process procedures keyed by name
#[derive(Clone, Default)]
pub struct ProcedureRegistry {
    procedures: BTreeMap<String, ProcedureFn>,
}

impl ProcedureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an async procedure, replacing any previous one
    pub fn register<F, Fut>(&mut self, name: impl Into<String>, procedure: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ScreenResult<Value>> + Send + 'static,
    {
        self.procedures
            .insert(name.into(), Arc::new(move |input| Box::pin(procedure(input))));
    }

    pub fn with_procedure<F, Fut>(mut self, name: impl Into<String>, procedure: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ScreenResult<Value>> + Send + 'static,
    {
        self.register(name, procedure);
        self
    }

    /// Procedure that always returns `response`
    pub fn respond(self, name: impl Into<String>, response: Value) -> Self {
        self.with_procedure(name, move |_| {
            let response = response.clone();
            async move { Ok(response) }
        })
    }

    /// Procedure that always rejects with `message`
    pub fn reject(self, name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        let procedure = name.clone();
        self.with_procedure(name, move |_| {
            let err = ScreenError::procedure_failed(&procedure, &message);
            async move { Err(err) }
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.procedures.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.procedures.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

impl fmt::Debug for ProcedureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcedureRegistry")
            .field("procedures", &self.procedures.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[async_trait]
impl ProcedureClient for ProcedureRegistry {
    async fn call(&self, procedure: &str, input: Value) -> ScreenResult<Value> {
        let callable = self
            .procedures
            .get(procedure)
            .cloned()
            .ok_or_else(|| ScreenError::UnknownProcedure(procedure.to_string()))?;
        debug!(procedure, "Calling procedure");
        callable(input).await
    }
}

// ============================================================================
// FixtureProcedures
// ============================================================================

/// Key marking a fixture response as a rejection
pub const FIXTURE_ERROR_KEY: &str = "$error";

/// Canned procedure responses loaded from a JSON object
///
/// Each key is a procedure name and each value its response. A response
/// of the form `{"$error": "message"}` makes the procedure reject.
#[derive(Debug, Clone, Default)]
pub struct FixtureProcedures {
    registry: ProcedureRegistry,
}

impl FixtureProcedures {
    pub fn from_value(fixtures: &Value) -> ScreenResult<Self> {
        let Value::Object(entries) = fixtures else {
            return Err(ScreenError::InvalidConfig(
                "Fixtures must be a JSON object keyed by procedure name".to_string(),
            ));
        };

        let mut registry = ProcedureRegistry::new();
        for (name, response) in entries {
            registry = match response.get(FIXTURE_ERROR_KEY) {
                Some(message) => {
                    let message = message.as_str().map(str::to_string).unwrap_or_else(|| message.to_string());
                    registry.reject(name, message)
                }
                None => registry.respond(name, response.clone()),
            };
        }
        Ok(Self { registry })
    }

    pub fn from_json(json: &str) -> ScreenResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn load(path: impl AsRef<Path>) -> ScreenResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ScreenError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let fixtures = Self::from_json(&json)?;
        debug!(path = %path.display(), procedures = fixtures.registry.len(), "Loaded fixtures");
        Ok(fixtures)
    }

    pub fn registry(&self) -> &ProcedureRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> ProcedureRegistry {
        self.registry
    }
}

#[async_trait]
impl ProcedureClient for FixtureProcedures {
    async fn call(&self, procedure: &str, input: Value) -> ScreenResult<Value> {
        self.registry.call(procedure, input).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_registered_procedure_receives_input() {
        let registry = ProcedureRegistry::new().with_procedure("job.getById", |input: Value| async move {
            Ok(json!({ "id": input["id"], "title": "Java Developer" }))
        });

        let result = registry.call("job.getById", json!({ "id": "j-1" })).await.unwrap();
        assert_eq!(result["id"], "j-1");
        assert_eq!(result["title"], "Java Developer");
    }

    #[tokio::test]
    async fn test_unknown_procedure() {
        let registry = ProcedureRegistry::new();
        let err = registry.call("job.nope", Value::Null).await.unwrap_err();
        assert!(matches!(&err, ScreenError::UnknownProcedure(name) if name == "job.nope"));
    }

    #[tokio::test]
    async fn test_reject() {
        let registry = ProcedureRegistry::new().reject("job.close", "forbidden");
        let err = registry.call("job.close", Value::Null).await.unwrap_err();
        assert!(err.is_data_fetch());
        assert!(err.to_string().contains("forbidden"));
    }

    #[tokio::test]
    async fn test_fixtures() {
        let fixtures = FixtureProcedures::from_json(
            r#"{
                "dashboard.getTasks": [{"id": 1}],
                "dashboard.getBlockers": {"$error": "timeout"}
            }"#,
        )
        .unwrap();

        assert_eq!(
            fixtures.call("dashboard.getTasks", Value::Null).await.unwrap(),
            json!([{ "id": 1 }])
        );
        let err = fixtures.call("dashboard.getBlockers", Value::Null).await.unwrap_err();
        assert!(matches!(&err, ScreenError::ProcedureFailed { message, .. } if message == "timeout"));
    }

    #[test]
    fn test_fixtures_must_be_object() {
        assert!(FixtureProcedures::from_value(&json!([1, 2])).is_err());
        assert!(FixtureProcedures::from_json("not json").is_err());
    }

    #[test]
    fn test_fixture_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixtures.json");
        std::fs::write(&path, r#"{"job.list": {"items": [], "total": 0}}"#).unwrap();

        let fixtures = FixtureProcedures::load(&path).unwrap();
        assert!(fixtures.registry().contains("job.list"));
        assert_eq!(fixtures.into_registry().names().collect::<Vec<_>>(), vec!["job.list"]);
    }
}
