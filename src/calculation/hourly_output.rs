//! Hourly output aggregation and slot status classification.
//!
//! Raw [`HourlyData`] is aligned to a resolved slot list: every slot gets a
//! row, missing keys read as zero, and keys that match no slot are dropped
//! from the numbers. What else happens to an unknown key depends on the
//! [`UnknownKeyPolicy`].

use chrono::{NaiveDateTime, NaiveTime};
use tracing::warn;

use crate::config::UnknownKeyPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DataWarning, HourlyData, HourlyOutput, SlotOutput, SlotOutputStatus, SlotStatus, TimeSlot,
};

use super::shift_resolver::find_current_slot;

/// Warning code for hourly-data keys that match no slot.
pub const UNKNOWN_SLOT_KEY_WARNING: &str = "UNKNOWN_SLOT_KEY";

/// Aligns hourly data to `slots`, silently ignoring unknown keys.
///
/// A slot's output is the quantity under its label plus any quantity under
/// its id. `total` is the sum of the per-slot outputs.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::aggregate;
/// use shift_engine::models::{HourlyData, TimeSlot, parse_clock_time};
///
/// let slots = vec![
///     TimeSlot::new("a", parse_clock_time("08:00").unwrap(), parse_clock_time("09:00").unwrap(), false).unwrap(),
///     TimeSlot::new("b", parse_clock_time("09:00").unwrap(), parse_clock_time("10:00").unwrap(), false).unwrap(),
/// ];
/// let data: HourlyData = [("08:00-09:00", 5), ("bogus", 100)].into_iter().collect();
///
/// let output = aggregate(&slots, &data);
/// assert_eq!(output.per_slot[0].output, 5);
/// assert_eq!(output.per_slot[1].output, 0);
/// assert_eq!(output.total, 5);
/// ```
pub fn aggregate(slots: &[TimeSlot], hourly_data: &HourlyData) -> HourlyOutput {
    let (per_slot, total) = align(slots, hourly_data);
    HourlyOutput {
        per_slot,
        total,
        warnings: Vec::new(),
    }
}

/// Aligns hourly data to `slots`, handling unknown keys per `policy`.
///
/// Under [`UnknownKeyPolicy::Warn`] the numbers are identical to
/// [`aggregate`] and each unknown key adds a [`DataWarning`]. Under
/// [`UnknownKeyPolicy::Reject`] the first unknown key (in key order) fails
/// with `UnknownSlotKey`.
pub fn aggregate_with_policy(
    slots: &[TimeSlot],
    hourly_data: &HourlyData,
    policy: UnknownKeyPolicy,
) -> EngineResult<HourlyOutput> {
    let mut output = aggregate(slots, hourly_data);

    match policy {
        UnknownKeyPolicy::Ignore => {}
        UnknownKeyPolicy::Warn => {
            output.warnings = unknown_keys(slots, hourly_data)
                .map(|key| {
                    warn!(key = %key, "Hourly data key does not match any time slot");
                    unknown_key_warning(key)
                })
                .collect();
        }
        UnknownKeyPolicy::Reject => {
            if let Some(key) = unknown_keys(slots, hourly_data).next() {
                return Err(EngineError::UnknownSlotKey {
                    key: key.to_string(),
                });
            }
        }
    }

    Ok(output)
}

/// Keys of `hourly_data` that refer to none of `slots`.
pub fn unknown_keys<'a>(
    slots: &'a [TimeSlot],
    hourly_data: &'a HourlyData,
) -> impl Iterator<Item = &'a str> + 'a {
    hourly_data
        .keys()
        .filter(move |key| !slots.iter().any(|slot| slot.matches_key(key)))
}

/// Builds the warning recorded for an unknown hourly-data key.
pub fn unknown_key_warning(key: &str) -> DataWarning {
    DataWarning {
        code: UNKNOWN_SLOT_KEY_WARNING.to_string(),
        message: format!("Hourly data key '{}' does not match any time slot", key),
        severity: "low".to_string(),
    }
}

fn align(slots: &[TimeSlot], hourly_data: &HourlyData) -> (Vec<SlotOutput>, u64) {
    let per_slot: Vec<SlotOutput> = slots
        .iter()
        .map(|slot| SlotOutput {
            slot: slot.clone(),
            output: slot_quantity(slot, hourly_data),
        })
        .collect();
    let total = per_slot.iter().map(|row| row.output).sum();
    (per_slot, total)
}

fn slot_quantity(slot: &TimeSlot, hourly_data: &HourlyData) -> u64 {
    let by_label = u64::from(hourly_data.get(&slot.label));
    let by_id = if slot.id != slot.label {
        u64::from(hourly_data.get(&slot.id))
    } else {
        0
    };
    by_label + by_id
}

/// Classifies one slot.
///
/// The checks run in a fixed order and the first hit wins:
/// 1. `Completed` if `output > 0`
/// 2. `Current` if `slot` is `current`
/// 3. `Missing` if the slot ended strictly before `now`
/// 4. `Pending` otherwise
///
/// # Example
///
/// ```
/// use shift_engine::calculation::classify_slot;
/// use shift_engine::models::{SlotStatus, TimeSlot, parse_clock_time};
///
/// let slot = TimeSlot::new("a", parse_clock_time("08:00").unwrap(), parse_clock_time("09:00").unwrap(), false).unwrap();
/// let now = parse_clock_time("08:30").unwrap();
///
/// // Output outranks timing, even for the current slot.
/// assert_eq!(classify_slot(3, &slot, Some(&slot), now), SlotStatus::Completed);
/// assert_eq!(classify_slot(0, &slot, Some(&slot), now), SlotStatus::Current);
/// ```
pub fn classify_slot(
    output: u64,
    slot: &TimeSlot,
    current: Option<&TimeSlot>,
    now: NaiveTime,
) -> SlotStatus {
    if output > 0 {
        SlotStatus::Completed
    } else if current.is_some_and(|current| current == slot) {
        SlotStatus::Current
    } else if slot.has_ended_before(now) {
        SlotStatus::Missing
    } else {
        SlotStatus::Pending
    }
}

/// Attaches a status to each row of an aggregation, evaluated at `now`.
pub fn classify_outputs(per_slot: &[SlotOutput], now: NaiveDateTime) -> Vec<SlotOutputStatus> {
    let time = now.time();
    let slots: Vec<TimeSlot> = per_slot.iter().map(|row| row.slot.clone()).collect();
    let current = find_current_slot(&slots, time);

    per_slot
        .iter()
        .map(|row| SlotOutputStatus {
            slot: row.slot.clone(),
            output: row.output,
            status: classify_slot(row.output, &row.slot, current, time),
        })
        .collect()
}

/// Aggregates and classifies in one call, ignoring unknown keys.
pub fn slot_statuses(
    slots: &[TimeSlot],
    hourly_data: &HourlyData,
    now: NaiveDateTime,
) -> Vec<SlotOutputStatus> {
    classify_outputs(&aggregate(slots, hourly_data).per_slot, now)
}
