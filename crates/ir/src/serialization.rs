//! Catalog and screen persistence
//!
//! Catalogs are stored as JSON wrapped in a `CatalogFile` that records the
//! schema version. Single screens can also be loaded from standalone JSON
//! documents.

use crate::catalog::Catalog;
use crate::screen::ScreenDefinition;
use crate::SCHEMA_VERSION;
use screenwright_core::{ScreenError, ScreenResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extension for catalog and screen documents
pub const CATALOG_EXTENSION: &str = "json";

// ============================================================================
// Catalog File Wrapper
// ============================================================================

/// Wrapper for catalog files that includes version information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    /// Schema version for migration purposes
    pub schema_version: u32,

    /// The catalog data
    pub catalog: Catalog,
}

impl CatalogFile {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            catalog,
        }
    }

    /// Files written by a newer release cannot be read
    pub fn check_version(&self) -> ScreenResult<()> {
        if self.schema_version > SCHEMA_VERSION {
            return Err(ScreenError::SchemaVersionMismatch {
                expected: SCHEMA_VERSION,
                found: self.schema_version,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Save Functions
// ============================================================================

/// Save a catalog to a file, creating parent directories as needed
pub fn save_catalog(catalog: &Catalog, path: impl AsRef<Path>) -> ScreenResult<()> {
    let path = path.as_ref();
    let json = save_catalog_to_string(catalog)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ScreenError::FileWrite {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| ScreenError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    info!(path = %path.display(), screens = catalog.screens.len(), "Saved catalog");
    Ok(())
}

pub fn save_catalog_to_string(catalog: &Catalog) -> ScreenResult<String> {
    let file = CatalogFile::new(catalog.clone());
    serde_json::to_string_pretty(&file).map_err(Into::into)
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load a catalog from a file
pub fn load_catalog(path: impl AsRef<Path>) -> ScreenResult<Catalog> {
    let path = path.as_ref();
    let json = read(path)?;
    load_catalog_from_string(&json).map_err(|e| match e {
        ScreenError::Json(je) => ScreenError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid catalog file format: {}", je),
        },
        other => other,
    })
}

/// Load a catalog from a JSON string
///
/// Accepts a versioned `CatalogFile` or a bare catalog object.
pub fn load_catalog_from_string(json: &str) -> ScreenResult<Catalog> {
    if let Ok(file) = serde_json::from_str::<CatalogFile>(json) {
        file.check_version()?;
        return Ok(file.catalog);
    }
    debug!("Catalog has no version wrapper, parsing as bare catalog");
    let catalog: Catalog = serde_json::from_str(json)?;
    Ok(catalog)
}

/// Load a single screen definition from a file
pub fn load_screen(path: impl AsRef<Path>) -> ScreenResult<ScreenDefinition> {
    let path = path.as_ref();
    let json = read(path)?;
    serde_json::from_str(&json).map_err(|e| ScreenError::FileRead {
        path: path.to_path_buf(),
        message: format!("Invalid screen definition: {}", e),
    })
}

fn read(path: &Path) -> ScreenResult<String> {
    std::fs::read_to_string(path).map_err(|e| ScreenError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Ensure a path has the catalog extension
pub fn ensure_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_none_or(|e| e != CATALOG_EXTENSION) {
        let mut new_path = path.to_path_buf();
        new_path.set_extension(CATALOG_EXTENSION);
        new_path
    } else {
        path.to_path_buf()
    }
}

// ============================================================================
// Tests
// ============================================================================
