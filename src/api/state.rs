//! Application state for the shift engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, ShiftCatalog};
use crate::polling::{Clock, SystemClock};

/// Shared application state.
///
/// Holds the immutable catalog and the clock used when a request does not
/// name an evaluation time.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<ShiftCatalog>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates application state using the system clock.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates application state with an explicit clock.
    pub fn with_clock(config: ConfigLoader, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog: Arc::new(config.into_catalog()),
            clock,
        }
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &ShiftCatalog {
        &self.catalog
    }

    /// Returns a shared handle to the catalog.
    pub fn catalog_handle(&self) -> Arc<ShiftCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Returns the clock.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}
