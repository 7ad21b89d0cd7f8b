//! Digital form and production entry models.
//!
//! These records are produced by the data-entry side of the system; the
//! engine only reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{HourlyData, ShiftType};

/// A worker's attendance state on a given form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// Worked the full shift.
    Present,
    /// Did not work.
    Absent,
    /// Arrived after the shift start.
    Late,
    /// Left before the shift end.
    EarlyLeave,
    /// Absent with approved leave.
    LeaveApproved,
}

impl AttendanceStatus {
    /// Returns true if the worker was on the floor for at least part of the
    /// shift.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_engine::models::AttendanceStatus;
    ///
    /// assert!(AttendanceStatus::Late.is_present_equivalent());
    /// assert!(!AttendanceStatus::LeaveApproved.is_present_equivalent());
    /// ```
    pub fn is_present_equivalent(&self) -> bool {
        matches!(
            self,
            AttendanceStatus::Present | AttendanceStatus::Late | AttendanceStatus::EarlyLeave
        )
    }
}

/// One worker's output for one bag/process/color combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionEntry {
    /// Identifier of the entry.
    pub id: String,
    /// The worker who produced the output.
    pub worker_id: String,
    /// The worker's attendance on this form.
    pub attendance_status: AttendanceStatus,
    /// The bag (work order) the output belongs to.
    #[serde(default)]
    pub bag_id: Option<String>,
    /// The process step performed.
    #[serde(default)]
    pub process: Option<String>,
    /// The product color.
    #[serde(default)]
    pub color: Option<String>,
    /// Quantity per time slot.
    #[serde(default)]
    pub hourly_data: HourlyData,
    /// Stored total, if the entry system recorded one.
    #[serde(default)]
    pub total_output: Option<u64>,
}

impl ProductionEntry {
    /// The entry's output: the stored total when present, otherwise the sum
    /// of its hourly data.
    pub fn output(&self) -> u64 {
        self.total_output.unwrap_or_else(|| self.hourly_data.total())
    }

    /// Returns true if this entry counts toward attendance-gated totals.
    pub fn is_present_equivalent(&self) -> bool {
        self.attendance_status.is_present_equivalent()
    }
}

/// The header of a digital time-tracking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalForm {
    /// Identifier of the form.
    pub id: String,
    /// Which schedule applies to the form.
    pub shift_type: ShiftType,
    /// Target output for the whole form.
    #[serde(default)]
    pub planned_output: u64,
    /// The production date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// The production line the form belongs to.
    #[serde(default)]
    pub line_id: Option<String>,
}
