//! Catalog
//!
//! The root container for every declarative document the runtime
//! interprets: entity configurations, journeys, screens, and wizards.

use crate::draft::WizardConfig;
use crate::entity::EntityConfig;
use crate::journey::{EntityJourney, QuickAction};
use crate::registry::EntityRegistry;
use crate::screen::ScreenDefinition;
use crate::validation::Validator;
use screenwright_core::{EntityType, ScreenError, ScreenResult, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// All configuration documents for one application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub entities: EntityRegistry,
    #[serde(default)]
    pub journeys: BTreeMap<EntityType, EntityJourney>,
    #[serde(default)]
    pub screens: BTreeMap<String, ScreenDefinition>,
    #[serde(default)]
    pub wizards: BTreeMap<String, WizardConfig>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Registration
    // ========================================================================

    pub fn add_entity(&mut self, config: EntityConfig) -> ScreenResult<()> {
        self.entities.register(config)
    }

    /// Add or replace the journey for an entity type
    pub fn add_journey(&mut self, journey: EntityJourney) {
        debug!(entity_type = %journey.entity_type, steps = journey.steps.len(), "Added journey");
        self.journeys.insert(journey.entity_type.clone(), journey);
    }

    pub fn add_screen(&mut self, screen: ScreenDefinition) -> ScreenResult<()> {
        if self.screens.contains_key(&screen.id) {
            return Err(ScreenError::DuplicateScreen(screen.id));
        }
        debug!(screen = %screen.id, "Added screen");
        self.screens.insert(screen.id.clone(), screen);
        Ok(())
    }

    /// Add or replace a wizard keyed by its store key
    pub fn add_wizard(&mut self, wizard: WizardConfig) {
        self.wizards.insert(wizard.store_key.clone(), wizard);
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn screen(&self, id: &str) -> ScreenResult<&ScreenDefinition> {
        self.screens
            .get(id)
            .ok_or_else(|| ScreenError::UnknownScreen(id.to_string()))
    }

    pub fn screen_ids(&self) -> impl Iterator<Item = &str> {
        self.screens.keys().map(String::as_str)
    }

    pub fn journey(&self, entity_type: &str) -> ScreenResult<&EntityJourney> {
        self.journeys
            .get(entity_type)
            .ok_or_else(|| ScreenError::UnknownEntityType(entity_type.to_string()))
    }

    pub fn wizard(&self, store_key: &str) -> Option<&WizardConfig> {
        self.wizards.get(store_key)
    }

    /// Journey step index for a record of `entity_type` in `status`
    pub fn current_step_index(&self, entity_type: &str, status: &str) -> ScreenResult<usize> {
        Ok(self.journey(entity_type)?.current_step_index(status))
    }

    /// Quick actions offered for a record of `entity_type` in `status`
    pub fn visible_quick_actions(
        &self,
        entity_type: &str,
        status: &str,
    ) -> ScreenResult<Vec<&QuickAction>> {
        Ok(self.journey(entity_type)?.visible_quick_actions(status))
    }
}

impl Validatable for Catalog {
    fn validate(&self) -> ScreenResult<()> {
        Validator::with_default_rules().validate_result(self)
    }

    fn validation_errors(&self) -> Vec<String> {
        Validator::with_default_rules()
            .validate(self)
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Binding;
    use crate::data_source::DataSource;
    use crate::journey::JourneyStep;
    use crate::layout::Layout;
    use crate::screen::ScreenKind;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_entity(EntityConfig::new("job")).unwrap();
        catalog.add_journey(
            EntityJourney::new("job")
                .with_step(JourneyStep::new("info", "Info").active_for(&["draft"]))
                .with_step(JourneyStep::new("sourcing", "Sourcing").active_for(&["open"])),
        );
        catalog
            .add_screen(ScreenDefinition::new(
                "jobs-list",
                ScreenKind::List,
                Binding::literal("Jobs"),
                DataSource::list("job"),
                Layout::SingleColumn { sections: vec![] },
            ))
            .unwrap();
        catalog
    }

    #[test]
    fn test_screen_lookup() {
        let catalog = catalog();
        assert!(catalog.screen("jobs-list").is_ok());
        assert!(matches!(
            catalog.screen("nope"),
            Err(ScreenError::UnknownScreen(id)) if id == "nope"
        ));
        assert_eq!(catalog.screen_ids().collect::<Vec<_>>(), vec!["jobs-list"]);
    }

    #[test]
    fn test_duplicate_screen_rejected() {
        let mut catalog = catalog();
        let screen = catalog.screen("jobs-list").unwrap().clone();
        assert!(matches!(
            catalog.add_screen(screen),
            Err(ScreenError::DuplicateScreen(_))
        ));
    }

    #[test]
    fn test_journey_queries() {
        let catalog = catalog();
        assert_eq!(catalog.current_step_index("job", "open").unwrap(), 1);
        assert!(catalog.visible_quick_actions("job", "open").unwrap().is_empty());
        assert!(catalog.current_step_index("invoice", "open").is_err());
    }

    #[test]
    fn test_validate() {
        assert!(catalog().is_valid());

        let mut broken = catalog();
        broken.add_journey(EntityJourney::new("invoice").with_step(JourneyStep::new("a", "A")));
        assert!(!broken.is_valid());
        assert_eq!(broken.validation_errors().len(), 1);
    }
}
