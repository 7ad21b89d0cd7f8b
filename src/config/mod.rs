//! Configuration loading for the time slot catalog.
//!
//! The catalog is read from a directory of YAML files once at start-up and
//! is immutable afterwards.
//!
//! # Example
//!
//! ```no_run
//! use shift_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/factory").unwrap();
//! println!("Loaded catalog: {}", config.catalog().metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CatalogFile, CatalogMetadata, DEFAULT_POLLING_INTERVAL_SECS, EngineSettings, ShiftCatalog,
    ShiftFile, TimeSlotConfig, UnknownKeyPolicy,
};
