//! Item catalog configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::catalog::{CatalogError, ItemCatalog};

/// Where the item catalog comes from.
///
/// Without a path the catalog compiled into the binary is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Optional YAML catalog overriding the embedded one
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    /// Loads and validates the configured catalog.
    pub fn load(&self) -> Result<ItemCatalog, CatalogError> {
        match &self.path {
            Some(path) => ItemCatalog::from_path(path),
            None => ItemCatalog::embedded(),
        }
    }

    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.path {
            Some(path) if !path.is_file() => Err(ValidationError::CatalogNotFound(
                path.display().to_string(),
            )),
            _ => Ok(()),
        }
    }
}
