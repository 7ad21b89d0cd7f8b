//! Time slot catalog lookup.

use crate::config::ShiftCatalog;
use crate::error::{EngineError, EngineResult};
use crate::models::{ShiftSchedule, ShiftType};

/// Returns the full schedule (breaks included) for a shift type.
///
/// A shift type absent from the catalog fails with `UnknownShiftType`;
/// there is no fallback to another schedule.
///
/// # Example
///
/// ```no_run
/// use shift_engine::calculation::get_schedule;
/// use shift_engine::config::ConfigLoader;
/// use shift_engine::models::ShiftType;
///
/// let loader = ConfigLoader::load("./config/factory")?;
/// let schedule = get_schedule(loader.catalog(), ShiftType::Regular)?;
/// println!("{} slots", schedule.time_slots.len());
/// # Ok::<(), shift_engine::error::EngineError>(())
/// ```
pub fn get_schedule(catalog: &ShiftCatalog, shift_type: ShiftType) -> EngineResult<&ShiftSchedule> {
    catalog
        .schedule(shift_type)
        .ok_or_else(|| EngineError::UnknownShiftType {
            value: shift_type.to_string(),
        })
}
