//! Form-level attendance and productivity statistics.
//!
//! Every call recomputes from the raw entries; nothing is cached between
//! calls.

use std::collections::HashSet;

use crate::config::ShiftCatalog;
use crate::error::EngineResult;
use crate::models::{
    AttendanceStats, AttendanceStatus, CompletionStats, DigitalForm, FormStats, HourlySlotStats,
    ProductionEntry, ProductivityStats, TimeSlot,
};

use super::hourly_output::aggregate_with_policy;
use super::percentage::{percentage, rounded_ratio};
use super::shift_resolver::resolve_slots;

/// Computes the summary statistics of a digital form.
///
/// The form's shift type selects the slot list. Entries are read-only:
///
/// - attendance counts each distinct worker once, using the status of the
///   worker's first entry;
/// - output totals sum every entry, so a worker with several entries
///   contributes all of them;
/// - `present_output` fields repeat the totals over present-equivalent
///   entries only.
///
/// Hourly-data keys that match no slot are handled per the catalog's
/// unknown-key policy.
///
/// # Example
///
/// ```no_run
/// use shift_engine::calculation::compute_stats;
/// use shift_engine::config::ConfigLoader;
/// use shift_engine::models::{DigitalForm, ShiftType};
///
/// let loader = ConfigLoader::load("./config/factory")?;
/// let form = DigitalForm {
///     id: "form-1".to_string(),
///     shift_type: ShiftType::Regular,
///     planned_output: 0,
///     date: None,
///     line_id: None,
/// };
/// let stats = compute_stats(loader.catalog(), &form, &[])?;
/// assert_eq!(stats.attendance.total_workers, 0);
/// assert_eq!(stats.productivity.completion_rate, 0);
/// # Ok::<(), shift_engine::error::EngineError>(())
/// ```
pub fn compute_stats(
    catalog: &ShiftCatalog,
    form: &DigitalForm,
    entries: &[ProductionEntry],
) -> EngineResult<FormStats> {
    let slots = resolve_slots(catalog, form.shift_type)?;
    let policy = catalog.settings().unknown_slot_keys;

    let attendance = attendance_stats(entries);

    let mut slot_totals = vec![0u64; slots.len()];
    let mut slot_present = vec![0u64; slots.len()];
    let mut warnings = Vec::new();
    for entry in entries {
        let aligned = aggregate_with_policy(&slots, &entry.hourly_data, policy)?;
        for (index, row) in aligned.per_slot.iter().enumerate() {
            slot_totals[index] = slot_totals[index].saturating_add(row.output);
            if entry.is_present_equivalent() {
                slot_present[index] = slot_present[index].saturating_add(row.output);
            }
        }
        warnings.extend(aligned.warnings.into_iter().map(|mut warning| {
            warning.message = format!("Entry '{}': {}", entry.id, warning.message);
            warning
        }));
    }

    let total_output = saturating_sum(entries.iter());
    let present_output =
        saturating_sum(entries.iter().filter(|entry| entry.is_present_equivalent()));

    let productivity = ProductivityStats {
        total_output,
        present_output,
        planned_output: form.planned_output,
        average_output: rounded_ratio(total_output, u64::from(attendance.total_workers)),
        completion_rate: percentage(total_output, form.planned_output),
    };

    let hourly = hourly_stats(&slots, &slot_totals, &slot_present, total_output);

    let filled_time_slots = slot_totals.iter().filter(|&&total| total > 0).count() as u32;
    let total_time_slots = slots.len() as u32;
    let completion = CompletionStats {
        filled_time_slots,
        total_time_slots,
        completion_percentage: percentage(
            u64::from(filled_time_slots),
            u64::from(total_time_slots),
        ),
    };

    Ok(FormStats {
        attendance,
        productivity,
        hourly,
        completion,
        warnings,
    })
}

/// Counts distinct workers by attendance status.
///
/// A worker with several entries is counted once, with the status of their
/// first entry.
pub fn attendance_stats(entries: &[ProductionEntry]) -> AttendanceStats {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stats = AttendanceStats::default();

    for entry in entries {
        if !seen.insert(entry.worker_id.as_str()) {
            continue;
        }
        stats.total_workers += 1;
        match entry.attendance_status {
            AttendanceStatus::Present => stats.present += 1,
            AttendanceStatus::Absent => stats.absent += 1,
            AttendanceStatus::Late => stats.late += 1,
            AttendanceStatus::EarlyLeave => stats.early_leave += 1,
            AttendanceStatus::LeaveApproved => stats.leave_approved += 1,
        }
    }

    stats.present_percentage = percentage(u64::from(stats.present), u64::from(stats.total_workers));
    stats
}

/// Stored totals are caller input, so sums clamp at `u64::MAX`.
fn saturating_sum<'a>(entries: impl Iterator<Item = &'a ProductionEntry>) -> u64 {
    entries.fold(0u64, |sum, entry| sum.saturating_add(entry.output()))
}

fn hourly_stats(
    slots: &[TimeSlot],
    slot_totals: &[u64],
    slot_present: &[u64],
    total_output: u64,
) -> Vec<HourlySlotStats> {
    slots
        .iter()
        .zip(slot_totals.iter().zip(slot_present))
        .map(|(slot, (&total, &present))| HourlySlotStats {
            slot: slot.clone(),
            total_output: total,
            present_output: present,
            filled_percentage: percentage(total, total_output),
        })
        .collect()
}
