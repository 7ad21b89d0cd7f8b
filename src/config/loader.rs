//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the time slot
//! catalog from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::ShiftSchedule;

use super::types::{CatalogFile, CatalogMetadata, EngineSettings, ShiftCatalog, ShiftFile};

/// Loads and provides access to the time slot catalog.
///
/// # Directory Structure
///
/// ```text
/// config/factory/
/// ├── catalog.yaml      # Catalog metadata and engine settings
/// └── shifts/
///     ├── regular.yaml  # One file per shift type
///     ├── extended.yaml
///     └── overtime.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/factory").unwrap();
/// println!("Loaded catalog: {}", loader.catalog().metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    catalog: ShiftCatalog,
}

impl ConfigLoader {
    /// Loads and validates the catalog from the specified directory.
    ///
    /// Returns an error if a file is missing, is not valid YAML, or defines
    /// an invalid slot or schedule.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let catalog_file = Self::load_yaml::<CatalogFile>(&path.join("catalog.yaml"))?;
        let schedules = Self::load_shifts(&path.join("shifts"))?;

        let catalog = ShiftCatalog::new(catalog_file.metadata, catalog_file.settings, schedules)?;
        Self::report_missing(&catalog);

        Ok(Self { catalog })
    }

    /// Builds a loader from in-memory parts, applying the same validation.
    pub fn from_parts(
        metadata: CatalogMetadata,
        settings: EngineSettings,
        schedules: Vec<ShiftSchedule>,
    ) -> EngineResult<Self> {
        let catalog = ShiftCatalog::new(metadata, settings, schedules)?;
        Self::report_missing(&catalog);
        Ok(Self { catalog })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every shift file from the shifts directory.
    fn load_shifts(shifts_dir: &Path) -> EngineResult<Vec<ShiftSchedule>> {
        let shifts_dir_str = shifts_dir.display().to_string();

        let entries = fs::read_dir(shifts_dir).map_err(|_| EngineError::ConfigNotFound {
            path: shifts_dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: shifts_dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no shift files found)", shifts_dir_str),
            });
        }

        let mut schedules = Vec::with_capacity(paths.len());
        for path in paths {
            let schedule = Self::load_yaml::<ShiftFile>(&path)?.into_schedule()?;
            debug!(
                shift_type = %schedule.shift_type,
                slots = schedule.time_slots.len(),
                file = %path.display(),
                "Loaded shift schedule"
            );
            schedules.push(schedule);
        }

        Ok(schedules)
    }

    fn report_missing(catalog: &ShiftCatalog) {
        for shift_type in catalog.missing_shift_types() {
            warn!(shift_type = %shift_type, "Catalog has no schedule for shift type");
        }
    }

    /// Returns the loaded catalog.
    pub fn catalog(&self) -> &ShiftCatalog {
        &self.catalog
    }

    /// Consumes the loader, returning the catalog.
    pub fn into_catalog(self) -> ShiftCatalog {
        self.catalog
    }
}
