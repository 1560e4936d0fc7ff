//! Built-in reference configuration
//!
//! Entity configs, journeys, screens, and wizards for a staffing
//! CRM/ATS. The CLI falls back to this catalog when no file is given.

pub mod entities;
pub mod journeys;
pub mod screens;
pub mod wizards;

use crate::catalog::Catalog;
use screenwright_core::ScreenResult;

/// Build the reference catalog
pub fn reference_catalog() -> ScreenResult<Catalog> {
    let mut catalog = Catalog::new();
    for config in entities::all() {
        catalog.add_entity(config)?;
    }
    for journey in journeys::all() {
        catalog.add_journey(journey);
    }
    for screen in screens::all() {
        catalog.add_screen(screen)?;
    }
    for wizard in wizards::all() {
        catalog.add_wizard(wizard);
    }
    Ok(catalog)
}
