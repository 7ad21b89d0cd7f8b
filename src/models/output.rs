//! Result models for hourly aggregation and form statistics.
//!
//! Every type here is derived data: built fresh by a calculation call and
//! never persisted or cached by the engine.

use serde::{Deserialize, Serialize};

use super::{AttendanceStatus, HourlyData, TimeSlot};

/// Fill status of a single slot at a point in time.
///
/// # Example
///
/// ```
/// use shift_engine::models::SlotStatus;
///
/// assert_eq!(serde_json::to_string(&SlotStatus::Missing).unwrap(), "\"missing\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// Output has been recorded.
    Completed,
    /// No output yet and the slot is in progress.
    Current,
    /// No output and the slot is over.
    Missing,
    /// No output and the slot has not started.
    Pending,
}

/// A data-quality warning raised while reading input.
///
/// Warnings never change numeric results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// Output recorded against one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotOutput {
    /// The slot.
    pub slot: TimeSlot,
    /// Quantity produced in the slot.
    pub output: u64,
}

/// Output for one slot together with its fill status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotOutputStatus {
    /// The slot.
    pub slot: TimeSlot,
    /// Quantity produced in the slot.
    pub output: u64,
    /// Fill status at the evaluation time.
    pub status: SlotStatus,
}

/// Hourly data aligned to a slot list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyOutput {
    /// One row per resolved slot, in slot order.
    pub per_slot: Vec<SlotOutput>,
    /// Sum of `per_slot` outputs.
    pub total: u64,
    /// Data-quality warnings, if the policy asked for them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DataWarning>,
}

/// Attendance counts for a form, one count per distinct worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    /// Distinct workers on the form.
    pub total_workers: u32,
    /// Workers marked present.
    pub present: u32,
    /// Workers marked absent.
    pub absent: u32,
    /// Workers marked late.
    pub late: u32,
    /// Workers marked as leaving early.
    pub early_leave: u32,
    /// Workers on approved leave.
    pub leave_approved: u32,
    /// `present` as a rounded percentage of `total_workers`.
    pub present_percentage: u32,
}

/// Output totals for a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityStats {
    /// Output over all entries, regardless of attendance.
    pub total_output: u64,
    /// Output over entries of present-equivalent workers only.
    pub present_output: u64,
    /// The form's target.
    pub planned_output: u64,
    /// `total_output` per worker, rounded.
    pub average_output: u64,
    /// `total_output` as a rounded percentage of `planned_output`; not capped.
    pub completion_rate: u32,
}

/// Totals for one slot across all entries of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlySlotStats {
    /// The slot.
    pub slot: TimeSlot,
    /// Output in this slot over all entries.
    pub total_output: u64,
    /// Output in this slot over present-equivalent entries.
    pub present_output: u64,
    /// `total_output` as a rounded percentage of the form's total output.
    pub filled_percentage: u32,
}

/// How many slots of the shift have any output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    /// Slots with output above zero.
    pub filled_time_slots: u32,
    /// Resolved slots in the shift.
    pub total_time_slots: u32,
    /// `filled_time_slots` as a rounded percentage of `total_time_slots`.
    pub completion_percentage: u32,
}

/// Form-level summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStats {
    /// Attendance counts.
    pub attendance: AttendanceStats,
    /// Output totals.
    pub productivity: ProductivityStats,
    /// Per-slot totals.
    pub hourly: Vec<HourlySlotStats>,
    /// Slot fill counts.
    pub completion: CompletionStats,
    /// Data-quality warnings, if the policy asked for them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DataWarning>,
}

/// A worker's combined output across all of their entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerOutput {
    /// The worker.
    pub worker_id: String,
    /// Status taken from the worker's first entry.
    pub attendance_status: AttendanceStatus,
    /// Number of entries merged.
    pub entry_count: u32,
    /// Summed hourly data, keyed by slot label.
    pub hourly_data: HourlyData,
    /// Sum of entry outputs.
    pub total_output: u64,
}

/// A bag's combined output across all entries that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BagOutput {
    /// The bag.
    pub bag_id: String,
    /// Output over all entries.
    pub total_output: u64,
    /// Output over present-equivalent entries only.
    pub present_output: u64,
    /// Distinct processes seen, in first-seen order.
    pub processes: Vec<String>,
    /// Distinct colors seen, in first-seen order.
    pub colors: Vec<String>,
}
