//! Error types for the shift engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the conditions that can occur while loading the time slot catalog
//! and resolving shifts. Missing hourly-data keys and zero denominators are
//! deliberately not errors; see the calculation modules.

use thiserror::Error;

use crate::models::ShiftType;

/// The main error type for the shift engine.
///
/// # Example
///
/// ```
/// use shift_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/catalog.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/catalog.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The shift type is not defined in the catalog, or could not be parsed.
    #[error("Unknown shift type: {value}")]
    UnknownShiftType {
        /// The shift type that was requested.
        value: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A single time slot definition is invalid.
    #[error("Invalid time slot '{slot_id}': {message}")]
    InvalidTimeSlot {
        /// The ID of the invalid slot.
        slot_id: String,
        /// What made the slot invalid.
        message: String,
    },

    /// A shift schedule as a whole is inconsistent.
    #[error("Invalid schedule for {shift_type}: {message}")]
    InvalidCatalog {
        /// The shift whose schedule is malformed.
        shift_type: ShiftType,
        /// What made the schedule invalid.
        message: String,
    },

    /// Hourly data referenced a slot that does not exist.
    ///
    /// Only raised when the unknown-key policy is `reject`.
    #[error("Hourly data key '{key}' does not match any time slot")]
    UnknownSlotKey {
        /// The offending key.
        key: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
