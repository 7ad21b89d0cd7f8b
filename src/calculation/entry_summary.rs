//! Worker and bag summaries over production entries.
//!
//! Entries roll up by summation. A worker with three entries (one per bag,
//! say) gets the sum of all three; nothing is overwritten.

use std::collections::HashMap;

use crate::models::{BagOutput, HourlyData, ProductionEntry, TimeSlot, WorkerOutput};

use super::hourly_output::aggregate;

/// Merges each worker's entries, in order of first appearance.
///
/// `hourly_data` of the result is keyed by slot label and only holds slots
/// from `slots` with output above zero.
pub fn summarize_workers(slots: &[TimeSlot], entries: &[ProductionEntry]) -> Vec<WorkerOutput> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut workers: Vec<WorkerOutput> = Vec::new();

    for entry in entries {
        let position = *index.entry(entry.worker_id.as_str()).or_insert_with(|| {
            workers.push(WorkerOutput {
                worker_id: entry.worker_id.clone(),
                attendance_status: entry.attendance_status,
                entry_count: 0,
                hourly_data: HourlyData::new(),
                total_output: 0,
            });
            workers.len() - 1
        });

        let worker = &mut workers[position];
        worker.entry_count += 1;
        worker.total_output = worker.total_output.saturating_add(entry.output());
        for row in aggregate(slots, &entry.hourly_data).per_slot {
            if row.output > 0 {
                let quantity = u32::try_from(row.output).unwrap_or(u32::MAX);
                worker.hourly_data.add(row.slot.label, quantity);
            }
        }
    }

    workers
}

/// Totals output per bag, in order of first appearance.
///
/// Entries without a bag id are skipped. `total_output` counts every entry;
/// `present_output` counts present-equivalent entries only.
pub fn summarize_bags(entries: &[ProductionEntry]) -> Vec<BagOutput> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut bags: Vec<BagOutput> = Vec::new();

    for entry in entries {
        let Some(bag_id) = entry.bag_id.as_deref() else {
            continue;
        };

        let position = *index.entry(bag_id).or_insert_with(|| {
            bags.push(BagOutput {
                bag_id: bag_id.to_string(),
                total_output: 0,
                present_output: 0,
                processes: Vec::new(),
                colors: Vec::new(),
            });
            bags.len() - 1
        });

        let bag = &mut bags[position];
        let output = entry.output();
        bag.total_output = bag.total_output.saturating_add(output);
        if entry.is_present_equivalent() {
            bag.present_output = bag.present_output.saturating_add(output);
        }
        push_distinct(&mut bag.processes, entry.process.as_deref());
        push_distinct(&mut bag.colors, entry.color.as_deref());
    }

    bags
}

fn push_distinct(values: &mut Vec<String>, value: Option<&str>) {
    if let Some(value) = value {
        if !values.iter().any(|existing| existing == value) {
            values.push(value.to_string());
        }
    }
}
