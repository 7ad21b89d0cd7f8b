//! Shift resolution: visible slots and the current slot.
//!
//! Both operations are pure functions of their inputs. Nothing here holds a
//! timer; callers that need a live "current slot" re-evaluate
//! [`current_slot`] on their own schedule (see [`crate::polling`]).

use chrono::{NaiveDateTime, NaiveTime};

use crate::config::ShiftCatalog;
use crate::error::EngineResult;
use crate::models::{ShiftType, TimeSlot};

use super::catalog::get_schedule;

/// Returns the non-break slots of a shift, sorted by start time.
///
/// # Example
///
/// ```no_run
/// use shift_engine::calculation::resolve_slots;
/// use shift_engine::config::ConfigLoader;
/// use shift_engine::models::ShiftType;
///
/// let loader = ConfigLoader::load("./config/factory")?;
/// let slots = resolve_slots(loader.catalog(), ShiftType::Regular)?;
/// assert!(slots.iter().all(|slot| !slot.is_break));
/// # Ok::<(), shift_engine::error::EngineError>(())
/// ```
pub fn resolve_slots(catalog: &ShiftCatalog, shift_type: ShiftType) -> EngineResult<Vec<TimeSlot>> {
    let schedule = get_schedule(catalog, shift_type)?;
    let mut slots: Vec<TimeSlot> = schedule.working_slots().cloned().collect();
    slots.sort_by_key(|slot| slot.start);
    Ok(slots)
}

/// Returns the slot of `shift_type` whose interval contains `now`'s time of
/// day, or `None` outside working hours and during breaks.
///
/// If a malformed slot list lets two slots match, the earlier-starting one
/// wins.
pub fn current_slot(
    catalog: &ShiftCatalog,
    shift_type: ShiftType,
    now: NaiveDateTime,
) -> EngineResult<Option<TimeSlot>> {
    let slots = resolve_slots(catalog, shift_type)?;
    Ok(find_current_slot(&slots, now.time()).cloned())
}

/// Scans an already resolved slot list for the slot containing `time`.
///
/// Break slots never match. The first match in ascending start order is
/// returned.
pub fn find_current_slot(slots: &[TimeSlot], time: NaiveTime) -> Option<&TimeSlot> {
    slots
        .iter()
        .filter(|slot| !slot.is_break && slot.contains(time))
        .min_by_key(|slot| slot.start)
}
