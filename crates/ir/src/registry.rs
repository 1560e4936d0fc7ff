//! Entity registry
//!
//! Registered entity configurations keyed by entity type. Lookups for
//! unregistered types either fail with `UnknownEntityType` or fall back
//! to a generic configuration, depending on the caller.

use crate::entity::EntityConfig;
use screenwright_core::{EntityType, ScreenError, ScreenResult, Validatable, path};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

static FALLBACK: LazyLock<EntityConfig> = LazyLock::new(EntityConfig::fallback);

/// Entity configurations keyed by type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRegistry {
    configs: BTreeMap<EntityType, EntityConfig>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a configuration; each entity type may be registered once
    pub fn register(&mut self, config: EntityConfig) -> ScreenResult<()> {
        config.validate()?;
        if self.configs.contains_key(&config.entity_type) {
            return Err(ScreenError::DuplicateEntityType(
                config.entity_type.to_string(),
            ));
        }
        debug!(entity_type = %config.entity_type, "Registered entity config");
        self.configs.insert(config.entity_type.clone(), config);
        Ok(())
    }

    pub fn get_config(&self, entity_type: &str) -> ScreenResult<&EntityConfig> {
        self.configs
            .get(entity_type)
            .ok_or_else(|| ScreenError::UnknownEntityType(entity_type.to_string()))
    }

    /// Registered configuration, or the generic one for unknown types
    pub fn config_or_fallback(&self, entity_type: &str) -> &EntityConfig {
        self.configs.get(entity_type).unwrap_or(&*FALLBACK)
    }

    pub fn contains(&self, entity_type: &str) -> bool {
        self.configs.contains_key(entity_type)
    }

    /// Registered types in sorted order
    pub fn entity_types(&self) -> impl Iterator<Item = &EntityType> {
        self.configs.keys()
    }

    pub fn configs(&self) -> impl Iterator<Item = &EntityConfig> {
        self.configs.values()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Status codes present in `records` that the entity's status config
    /// does not style, sorted and deduplicated
    pub fn uncovered_statuses(
        &self,
        entity_type: &str,
        records: &[Value],
    ) -> ScreenResult<Vec<String>> {
        let config = self.get_config(entity_type)?;
        let mut missing: Vec<String> = records
            .iter()
            .filter_map(|r| path::lookup(r, &config.status_field))
            .filter_map(path::display_scalar)
            .filter(|code| !config.has_status(code))
            .collect();
        missing.sort();
        missing.dedup();
        Ok(missing)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use screenwright_core::Tone;
    use serde_json::json;

    fn registry() -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        registry
            .register(
                EntityConfig::new("job")
                    .with_status("open", "Open", Tone::Green)
                    .with_status("filled", "Filled", Tone::Purple),
            )
            .unwrap();
        registry.register(EntityConfig::new("account")).unwrap();
        registry
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert!(registry.get_config("job").is_ok());
        assert!(matches!(
            registry.get_config("invoice"),
            Err(ScreenError::UnknownEntityType(t)) if t == "invoice"
        ));
        let types: Vec<&str> = registry.entity_types().map(|t| t.as_str()).collect();
        assert_eq!(types, vec!["account", "job"]);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = registry();
        let err = registry.register(EntityConfig::new("job")).unwrap_err();
        assert!(matches!(err, ScreenError::DuplicateEntityType(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_fallback_config() {
        let registry = registry();
        let config = registry.config_or_fallback("invoice");
        assert!(config.is_fallback());
        assert_eq!(config.columns.len(), 3);
        assert!(!registry.config_or_fallback("job").is_fallback());
    }

    #[test]
    fn test_uncovered_statuses() {
        let registry = registry();
        let records = vec![
            json!({ "status": "open" }),
            json!({ "status": "on_hold" }),
            json!({ "status": "on_hold" }),
            json!({ "status": null }),
            json!({}),
        ];
        assert_eq!(
            registry.uncovered_statuses("job", &records).unwrap(),
            vec!["on_hold".to_string()]
        );
    }

    #[test]
    fn test_serde_is_keyed_map() {
        let json = serde_json::to_value(registry()).unwrap();
        assert!(json.get("job").is_some());
        let back: EntityRegistry = serde_json::from_value(json).unwrap();
        assert_eq!(back, registry());
    }
}
