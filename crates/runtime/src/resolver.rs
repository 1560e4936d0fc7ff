//! Data source resolution
//!
//! Maps a screen's declared `DataSource` onto procedure calls and merges
//! the results into one `ResolvedContext`:
//!
//! - **entity**: one record by id, fields become the context root
//! - **list**: filtered/sorted/paginated collection as `{ items, total }`
//! - **aggregate**: named queries issued concurrently, all-or-nothing
//! - **related**: rows read from the parent context, filtered and sorted in memory
//!

use crate::context::{RequestScope, ResolvedContext};
use crate::procedure::ProcedureClient;
use futures::future::try_join_all;
use screenwright_core::{ScreenError, ScreenResult, SortDirection, SortSpec, path};
use screenwright_ir::{
    Binding, Catalog, Condition, DataSource, NamedQuery, default_procedure, resolve_map,
};
use serde_json::{Map, Value, json};
use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use tracing::{debug, warn};

/// Filter values that mean "no filter"
const WILDCARD_FILTER: &str = "all";

// ============================================================================
// DataSourceResolver
// ============================================================================

/// Resolves screen data sources through a `ProcedureClient`
#[derive(Clone)]
pub struct DataSourceResolver {
    client: Arc<dyn ProcedureClient>,
    catalog: Arc<Catalog>,
    default_page_size: u32,
}

impl DataSourceResolver {
    pub fn new(client: Arc<dyn ProcedureClient>, catalog: Arc<Catalog>) -> Self {
        Self {
            client,
            catalog,
            default_page_size: 25,
        }
    }

    pub fn with_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size.max(1);
        self
    }

    /// Resolve a screen-level data source
    pub async fn resolve(&self, source: &DataSource, scope: &RequestScope) -> ScreenResult<ResolvedContext> {
        match source {
            DataSource::Entity {
                entity_type,
                entity_id,
                include,
                procedure,
            } => {
                self.catalog.entities.get_config(entity_type.as_str())?;
                let procedure = procedure
                    .clone()
                    .unwrap_or_else(|| default_procedure(entity_type, "getById"));
                self.resolve_entity(&procedure, entity_id, include, scope).await
            }
            DataSource::List {
                entity_type,
                procedure,
                filters,
                sort,
                page_size,
            } => {
                let config = self.catalog.entities.get_config(entity_type.as_str())?;
                let procedure = procedure
                    .clone()
                    .unwrap_or_else(|| default_procedure(entity_type, "list"));

                let data = Value::Null;
                let sources = scope.sources(&data);
                let mut applied = Map::new();
                for (key, binding) in filters {
                    if !config.recognizes_filter(key) {
                        warn!(entity_type = %entity_type, filter = %key, "Ignoring unrecognized filter");
                        continue;
                    }
                    if let Some(value) = binding.resolve(&sources).filter(is_active_filter) {
                        applied.insert(key.clone(), value);
                    }
                }

                let sort = sort.as_ref().or(config.default_sort.as_ref());
                let page = scope
                    .param("page")
                    .and_then(path::as_f64)
                    .filter(|p| *p >= 1.0)
                    .map_or(1, |p| p as u64);
                let page_size = page_size.unwrap_or(self.default_page_size);

                let mut input = json!({
                    "filters": applied,
                    "page": page,
                    "pageSize": page_size,
                });
                if let Some(sort) = sort {
                    input["sort"] = serde_json::to_value(sort)?;
                }

                debug!(procedure = %procedure, "Resolving list data source");
                let result = self.client.call(&procedure, input).await?;
                Ok(ResolvedContext::new(list_context(result)))
            }
            DataSource::Aggregate { queries } => self.resolve_aggregate(queries, scope).await,
            DataSource::Related { relation, .. } => Err(ScreenError::InvalidConfig(format!(
                "Screen data source cannot be 'related' (relation '{}')",
                relation
            ))),
        }
    }

    async fn resolve_entity(
        &self,
        procedure: &str,
        entity_id: &Binding,
        include: &[String],
        scope: &RequestScope,
    ) -> ScreenResult<ResolvedContext> {
        let data = Value::Null;
        let id = entity_id
            .resolve(&scope.sources(&data))
            .filter(|v| !v.is_null())
            .ok_or_else(|| ScreenError::missing_placeholder(entity_id.describe(), "id"))?;

        debug!(procedure, id = %id, "Resolving entity data source");
        let record = self
            .client
            .call(procedure, json!({ "id": id, "include": include }))
            .await?;

        match record {
            Value::Object(_) => Ok(ResolvedContext::new(record)),
            Value::Null => Err(ScreenError::procedure_failed(procedure, "record not found")),
            other => Err(ScreenError::procedure_failed(
                procedure,
                format!("expected a record object, got {}", kind_of(&other)),
            )),
        }
    }

    async fn resolve_aggregate(
        &self,
        queries: &[NamedQuery],
        scope: &RequestScope,
    ) -> ScreenResult<ResolvedContext> {
        let data = Value::Null;
        let sources = scope.sources(&data);

        let calls = queries.iter().map(|query| {
            let input = Value::Object(resolve_map(&query.params, &sources));
            let client = Arc::clone(&self.client);
            async move {
                let value = client.call(&query.procedure, input).await.map_err(|e| {
                    ScreenError::AggregateFailed {
                        key: query.key.clone(),
                        message: e.to_string(),
                    }
                })?;
                Ok::<_, ScreenError>((query.key.clone(), value))
            }
        });

        debug!(queries = queries.len(), "Resolving aggregate data source");
        let results = try_join_all(calls).await?;
        let root: Map<String, Value> = results.into_iter().collect();
        Ok(ResolvedContext::new(Value::Object(root)))
    }
}

impl std::fmt::Debug for DataSourceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSourceResolver")
            .field("default_page_size", &self.default_page_size)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Related rows
// ============================================================================

/// Rows for a section-level `related` data source
///
/// An absent relation yields no rows. The sort is stable, so rows with
/// equal keys keep their parent order.
pub fn resolve_related(source: &DataSource, parent: &ResolvedContext) -> ScreenResult<Vec<Value>> {
    let DataSource::Related {
        relation,
        sort,
        filter,
    } = source
    else {
        return Err(ScreenError::InvalidConfig(format!(
            "Section data sources must be 'related', found '{}'",
            source.kind_name()
        )));
    };

    let mut rows: Vec<Value> = match parent.get(relation) {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            warn!(relation = %relation, "Relation is not a list; treating as a single row");
            vec![other.clone()]
        }
    };

    if !filter.is_empty() {
        rows.retain(|row| matches_all(filter, row));
    }
    if let Some(sort) = sort {
        sort_rows(&mut rows, sort);
    }
    Ok(rows)
}

fn matches_all(conditions: &[Condition], row: &Value) -> bool {
    conditions.iter().all(|c| c.evaluate(row))
}

/// Stable sort; rows missing the sort field go last in either direction
pub fn sort_rows(rows: &mut [Value], sort: &SortSpec) {
    rows.sort_by(|a, b| {
        let left = path::lookup(a, &sort.field).filter(|v| !v.is_null());
        let right = path::lookup(b, &sort.field).filter(|v| !v.is_null());
        match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(l), Some(r)) => {
                let ord = compare_values(l, r);
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            }
        }
    });
}

/// Values of different types order by type: bool < number < string < array < object
fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Number(_), Value::Number(_)) => {
            let l = left.as_f64().unwrap_or_default();
            let r = right.as_f64().unwrap_or_default();
            l.total_cmp(&r)
        }
        (Value::String(l), Value::String(r)) => l.cmp(r),
        (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
        _ => type_rank(left).cmp(&type_rank(right)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn is_active_filter(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => {
            let s = s.trim();
            !s.is_empty() && s != WILDCARD_FILTER
        }
        _ => true,
    }
}

/// Normalize a list procedure result into `{ items, total }`
fn list_context(result: Value) -> Value {
    match result {
        Value::Array(items) => {
            let total = items.len();
            json!({ "items": items, "total": total })
        }
        Value::Object(mut map) => {
            let items = match map.remove("items") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            };
            let total = map
                .get("total")
                .and_then(Value::as_u64)
                .unwrap_or(items.len() as u64);
            map.insert("items".to_string(), Value::Array(items));
            map.insert("total".to_string(), json!(total));
            Value::Object(map)
        }
        _ => json!({ "items": [], "total": 0 }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// FetchGeneration
// ============================================================================

/// Token for one fetch started through a `FetchGeneration`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Monotonic counter for ignoring late resolutions
///
/// Fetches are never cancelled in flight. A caller that starts a new fetch
/// simply stops caring about the old one; `is_current` tells it whether a
/// completed fetch is still the latest.
#[derive(Debug, Default)]
pub struct FetchGeneration {
    current: AtomicU64,
}

impl FetchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.current.fetch_add(1, AtomicOrdering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.current.load(AtomicOrdering::SeqCst) == ticket.0
    }
}

// ============================================================================
// Tests
// ============================================================================
