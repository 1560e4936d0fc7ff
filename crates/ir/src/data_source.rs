//! Data source declarations
//!
//! A screen (and optionally a section) declares where its data comes
//! from. Every variant names the backend procedure it needs; the
//! interpreter is agnostic to how procedures are transported.

use crate::binding::Binding;
use crate::condition::Condition;
use heck::ToLowerCamelCase;
use screenwright_core::{EntityType, SortSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// DataSource
// ============================================================================

/// Binding from a screen or section to backend data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum DataSource {
    /// A single record fetched by id
    Entity {
        entity_type: EntityType,
        entity_id: Binding,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        include: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        procedure: Option<String>,
    },

    /// A filtered, sorted, paginated collection
    List {
        entity_type: EntityType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        procedure: Option<String>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        filters: BTreeMap<String, Binding>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sort: Option<SortSpec>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page_size: Option<u32>,
    },

    /// Several named queries merged into one context
    Aggregate { queries: Vec<NamedQuery> },

    /// A relation already loaded on the parent record
    Related {
        relation: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sort: Option<SortSpec>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        filter: Vec<Condition>,
    },
}

impl DataSource {
    /// Entity data source bound to the `id` route parameter
    pub fn entity(entity_type: impl Into<EntityType>) -> Self {
        DataSource::Entity {
            entity_type: entity_type.into(),
            entity_id: Binding::param("id"),
            include: Vec::new(),
            procedure: None,
        }
    }

    pub fn list(entity_type: impl Into<EntityType>) -> Self {
        DataSource::List {
            entity_type: entity_type.into(),
            procedure: None,
            filters: BTreeMap::new(),
            sort: None,
            page_size: None,
        }
    }

    pub fn aggregate(queries: Vec<NamedQuery>) -> Self {
        DataSource::Aggregate { queries }
    }

    pub fn related(relation: impl Into<String>) -> Self {
        DataSource::Related {
            relation: relation.into(),
            sort: None,
            filter: Vec::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Eager-include a relation (entity sources only)
    pub fn including(mut self, relation: impl Into<String>) -> Self {
        if let DataSource::Entity { include, .. } = &mut self {
            include.push(relation.into());
        }
        self
    }

    /// Bind a filter key (list sources only)
    pub fn filtered_by(mut self, key: impl Into<String>, value: Binding) -> Self {
        if let DataSource::List { filters, .. } = &mut self {
            filters.insert(key.into(), value);
        }
        self
    }

    /// Declare an ordering (list and related sources)
    pub fn sorted(mut self, spec: SortSpec) -> Self {
        match &mut self {
            DataSource::List { sort, .. } | DataSource::Related { sort, .. } => {
                *sort = Some(spec);
            }
            _ => {}
        }
        self
    }

    /// Add a row condition (related sources only)
    pub fn where_(mut self, condition: Condition) -> Self {
        if let DataSource::Related { filter, .. } = &mut self {
            filter.push(condition);
        }
        self
    }

    pub fn with_page_size(mut self, size: u32) -> Self {
        if let DataSource::List { page_size, .. } = &mut self {
            *page_size = Some(size);
        }
        self
    }

    /// Override the default procedure (entity and list sources)
    pub fn via(mut self, name: impl Into<String>) -> Self {
        match &mut self {
            DataSource::Entity { procedure, .. } | DataSource::List { procedure, .. } => {
                *procedure = Some(name.into());
            }
            _ => {}
        }
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    pub fn kind_name(&self) -> &'static str {
        match self {
            DataSource::Entity { .. } => "entity",
            DataSource::List { .. } => "list",
            DataSource::Aggregate { .. } => "aggregate",
            DataSource::Related { .. } => "related",
        }
    }

    /// Entity type this source reads, if any
    pub fn entity_type(&self) -> Option<&EntityType> {
        match self {
            DataSource::Entity { entity_type, .. } | DataSource::List { entity_type, .. } => {
                Some(entity_type)
            }
            _ => None,
        }
    }

    /// Procedure names this source calls
    pub fn procedures(&self) -> Vec<String> {
        match self {
            DataSource::Entity {
                entity_type,
                procedure,
                ..
            } => vec![
                procedure
                    .clone()
                    .unwrap_or_else(|| default_procedure(entity_type, "getById")),
            ],
            DataSource::List {
                entity_type,
                procedure,
                ..
            } => vec![
                procedure
                    .clone()
                    .unwrap_or_else(|| default_procedure(entity_type, "list")),
            ],
            DataSource::Aggregate { queries } => {
                queries.iter().map(|q| q.procedure.clone()).collect()
            }
            DataSource::Related { .. } => Vec::new(),
        }
    }
}

/// Conventional procedure name: `<entityCamel>.<operation>`
pub fn default_procedure(entity_type: &EntityType, operation: &str) -> String {
    format!("{}.{}", entity_type.as_str().to_lower_camel_case(), operation)
}

// ============================================================================
// NamedQuery
// ============================================================================

/// One member of an aggregate data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedQuery {
    /// Context key the result is stored under
    pub key: String,
    pub procedure: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, Binding>,
}

impl NamedQuery {
    pub fn new(key: impl Into<String>, procedure: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            procedure: procedure.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: Binding) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
