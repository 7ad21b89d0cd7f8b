//! Core data models for the shift engine.
//!
//! This module contains the catalog types, the form and entry records the
//! engine reads, and the derived results it produces.

mod entry;
mod hourly_data;
mod output;
mod time_slot;

pub use entry::{AttendanceStatus, DigitalForm, ProductionEntry};
pub use hourly_data::HourlyData;
pub use output::{
    AttendanceStats, BagOutput, CompletionStats, DataWarning, FormStats, HourlyOutput,
    HourlySlotStats, ProductivityStats, SlotOutput, SlotOutputStatus, SlotStatus, WorkerOutput,
};
pub use time_slot::{ShiftSchedule, ShiftType, TimeSlot, parse_clock_time};
