//! Shift type, time slot and schedule models.
//!
//! A [`ShiftSchedule`] is the ordered list of [`TimeSlot`]s that make up one
//! [`ShiftType`]. Slots are clock-time intervals without a date component.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The kind of shift a form or worker is scheduled on.
///
/// # Example
///
/// ```
/// use shift_engine::models::ShiftType;
///
/// let shift: ShiftType = "extended".parse().unwrap();
/// assert_eq!(shift, ShiftType::Extended);
/// assert_eq!(shift.to_string(), "EXTENDED");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftType {
    /// The standard day shift.
    #[serde(alias = "regular")]
    Regular,
    /// The day shift extended by one hour.
    #[serde(alias = "extended")]
    Extended,
    /// The day shift followed by an overtime block.
    #[serde(alias = "overtime")]
    Overtime,
}

impl ShiftType {
    /// Every shift type, in catalog order.
    pub const ALL: [ShiftType; 3] = [ShiftType::Regular, ShiftType::Extended, ShiftType::Overtime];

    /// The canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftType::Regular => "REGULAR",
            ShiftType::Extended => "EXTENDED",
            ShiftType::Overtime => "OVERTIME",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "REGULAR" => Ok(ShiftType::Regular),
            "EXTENDED" => Ok(ShiftType::Extended),
            "OVERTIME" => Ok(ShiftType::Overtime),
            _ => Err(EngineError::UnknownShiftType {
                value: s.to_string(),
            }),
        }
    }
}

/// Parses a clock time written as `HH:MM` or `HH:MM:SS`.
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Serializes clock times as `HH:MM`, accepting seconds on input.
mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid clock time '{}'", raw)))
    }
}

/// A named clock-time interval within a shift.
///
/// Serialized as `{id, label, start, end, isBreak}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Stable identifier, unique within a schedule.
    pub id: String,
    /// Display label in `HH:MM-HH:MM` form.
    pub label: String,
    /// Inclusive start of the interval.
    #[serde(with = "clock_time")]
    pub start: NaiveTime,
    /// Exclusive end of the interval.
    #[serde(with = "clock_time")]
    pub end: NaiveTime,
    /// Break slots carry no production and are hidden from resolved lists.
    pub is_break: bool,
}

impl TimeSlot {
    /// Creates a slot, deriving its label from the start and end times.
    ///
    /// Fails with `InvalidTimeSlot` unless `start < end`.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_engine::models::TimeSlot;
    /// use chrono::NaiveTime;
    ///
    /// let slot = TimeSlot::new(
    ///     "regular-01",
    ///     NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
    ///     NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
    ///     false,
    /// )
    /// .unwrap();
    /// assert_eq!(slot.label, "07:30-08:30");
    /// ```
    pub fn new(
        id: impl Into<String>,
        start: NaiveTime,
        end: NaiveTime,
        is_break: bool,
    ) -> EngineResult<Self> {
        let id = id.into();
        if start >= end {
            return Err(EngineError::InvalidTimeSlot {
                slot_id: id,
                message: format!(
                    "end time {} is not after start time {}",
                    end.format("%H:%M"),
                    start.format("%H:%M")
                ),
            });
        }

        Ok(Self {
            label: format_label(start, end),
            id,
            start,
            end,
            is_break,
        })
    }

    /// Returns true when `start <= time < end`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }

    /// Returns true when the slot ended strictly before `time`.
    pub fn has_ended_before(&self, time: NaiveTime) -> bool {
        self.end < time
    }

    /// Returns true if an hourly-data key refers to this slot.
    pub fn matches_key(&self, key: &str) -> bool {
        self.label == key || self.id == key
    }
}

fn format_label(start: NaiveTime, end: NaiveTime) -> String {
    format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
}

/// The ordered slot list for one shift type.
///
/// Only built through [`ShiftSchedule::new`], so it is never deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftSchedule {
    /// The shift this schedule belongs to.
    pub shift_type: ShiftType,
    /// Slots sorted ascending by start time.
    pub time_slots: Vec<TimeSlot>,
}

impl ShiftSchedule {
    /// Builds a schedule, sorting the slots by start and validating them.
    ///
    /// Rejects overlapping slots and duplicate ids or labels with
    /// `InvalidCatalog`.
    pub fn new(shift_type: ShiftType, mut time_slots: Vec<TimeSlot>) -> EngineResult<Self> {
        time_slots.sort_by_key(|slot| slot.start);

        for pair in time_slots.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            if next.start < previous.end {
                return Err(EngineError::InvalidCatalog {
                    shift_type,
                    message: format!("slot {} overlaps slot {}", next.label, previous.label),
                });
            }
        }

        for (index, slot) in time_slots.iter().enumerate() {
            let duplicate = time_slots[..index]
                .iter()
                .find(|other| other.id == slot.id || other.label == slot.label);
            if let Some(other) = duplicate {
                return Err(EngineError::InvalidCatalog {
                    shift_type,
                    message: format!("slot '{}' duplicates slot '{}'", slot.id, other.id),
                });
            }
        }

        Ok(Self {
            shift_type,
            time_slots,
        })
    }

    /// Slots that carry production, in start order.
    pub fn working_slots(&self) -> impl Iterator<Item = &TimeSlot> {
        self.time_slots.iter().filter(|slot| !slot.is_break)
    }
}
