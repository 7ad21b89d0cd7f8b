//! Configuration types for the time slot catalog.
//!
//! This module contains the structures deserialized from the YAML files in
//! a catalog directory, and the validated [`ShiftCatalog`] built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ShiftSchedule, ShiftType, TimeSlot, parse_clock_time};

/// Default interval, in seconds, at which callers re-evaluate the current slot.
pub const DEFAULT_POLLING_INTERVAL_SECS: u64 = 60;

/// Metadata about the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogMetadata {
    /// The human-readable name of the catalog.
    pub name: String,
    /// The version or effective date of the catalog.
    pub version: String,
}

/// What to do with hourly-data keys that match no slot.
///
/// # Example
///
/// ```
/// use shift_engine::config::UnknownKeyPolicy;
///
/// assert_eq!(UnknownKeyPolicy::default(), UnknownKeyPolicy::Ignore);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeyPolicy {
    /// Drop the key silently.
    #[default]
    Ignore,
    /// Drop the key and report a data-quality warning.
    Warn,
    /// Fail the calculation with `UnknownSlotKey`.
    Reject,
}

/// Engine behavior settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineSettings {
    /// How often callers should re-evaluate the current slot.
    #[serde(default = "default_polling_interval")]
    pub polling_interval_secs: u64,
    /// Handling of hourly-data keys that match no slot.
    #[serde(default)]
    pub unknown_slot_keys: UnknownKeyPolicy,
}

fn default_polling_interval() -> u64 {
    DEFAULT_POLLING_INTERVAL_SECS
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            polling_interval_secs: DEFAULT_POLLING_INTERVAL_SECS,
            unknown_slot_keys: UnknownKeyPolicy::default(),
        }
    }
}

/// Structure of `catalog.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    /// Catalog metadata.
    #[serde(flatten)]
    pub metadata: CatalogMetadata,
    /// Engine settings.
    #[serde(default)]
    pub settings: EngineSettings,
}

/// A time slot as written in a shift file.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeSlotConfig {
    /// Stable identifier.
    pub id: String,
    /// Start time, `HH:MM`.
    pub start: String,
    /// End time, `HH:MM`.
    pub end: String,
    /// Whether the slot is a break.
    #[serde(default)]
    pub is_break: bool,
}

impl TimeSlotConfig {
    /// Parses the clock times and builds a validated [`TimeSlot`].
    pub fn into_time_slot(self) -> EngineResult<TimeSlot> {
        let start = parse_clock_time(&self.start).ok_or_else(|| EngineError::InvalidTimeSlot {
            slot_id: self.id.clone(),
            message: format!("invalid start time '{}'", self.start),
        })?;
        let end = parse_clock_time(&self.end).ok_or_else(|| EngineError::InvalidTimeSlot {
            slot_id: self.id.clone(),
            message: format!("invalid end time '{}'", self.end),
        })?;
        TimeSlot::new(self.id, start, end, self.is_break)
    }
}

/// Structure of one file under `shifts/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftFile {
    /// The shift the file defines.
    pub shift_type: ShiftType,
    /// The slots of the shift, in any order.
    pub time_slots: Vec<TimeSlotConfig>,
}

impl ShiftFile {
    /// Converts the file into a validated schedule.
    pub fn into_schedule(self) -> EngineResult<ShiftSchedule> {
        let slots = self
            .time_slots
            .into_iter()
            .map(TimeSlotConfig::into_time_slot)
            .collect::<EngineResult<Vec<_>>>()?;
        ShiftSchedule::new(self.shift_type, slots)
    }
}

/// The complete, validated time slot catalog.
///
/// Built once at start-up and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ShiftCatalog {
    metadata: CatalogMetadata,
    settings: EngineSettings,
    schedules: BTreeMap<ShiftType, ShiftSchedule>,
}

impl ShiftCatalog {
    /// Creates a catalog from its component parts.
    ///
    /// Fails with `InvalidCatalog` if two schedules share a shift type.
    pub fn new(
        metadata: CatalogMetadata,
        settings: EngineSettings,
        schedules: Vec<ShiftSchedule>,
    ) -> EngineResult<Self> {
        let mut by_type = BTreeMap::new();
        for schedule in schedules {
            let shift_type = schedule.shift_type;
            if by_type.insert(shift_type, schedule).is_some() {
                return Err(EngineError::InvalidCatalog {
                    shift_type,
                    message: "defined more than once".to_string(),
                });
            }
        }

        Ok(Self {
            metadata,
            settings,
            schedules: by_type,
        })
    }

    /// Returns the catalog metadata.
    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the schedule for a shift type, if defined.
    pub fn schedule(&self, shift_type: ShiftType) -> Option<&ShiftSchedule> {
        self.schedules.get(&shift_type)
    }

    /// Returns all schedules in shift type order.
    pub fn schedules(&self) -> impl Iterator<Item = &ShiftSchedule> {
        self.schedules.values()
    }

    /// Shift types from [`ShiftType::ALL`] with no schedule.
    pub fn missing_shift_types(&self) -> Vec<ShiftType> {
        ShiftType::ALL
            .into_iter()
            .filter(|shift_type| !self.schedules.contains_key(shift_type))
            .collect()
    }
}
