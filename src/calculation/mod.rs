//! Calculation logic for the shift engine.
//!
//! This module contains the catalog lookup, shift resolution (visible slots
//! and the current slot), hourly output aggregation with slot status
//! classification, form attendance and productivity statistics, and worker
//! and bag summaries. Every function is pure: same inputs, same outputs.

mod catalog;
mod entry_summary;
mod form_stats;
mod hourly_output;
mod percentage;
mod shift_resolver;

pub use catalog::get_schedule;
pub use entry_summary::{summarize_bags, summarize_workers};
pub use form_stats::{attendance_stats, compute_stats};
pub use hourly_output::{
    UNKNOWN_SLOT_KEY_WARNING, aggregate, aggregate_with_policy, classify_outputs, classify_slot,
    slot_statuses, unknown_key_warning, unknown_keys,
};
pub use percentage::{percentage, rounded_ratio};
pub use shift_resolver::{current_slot, find_current_slot, resolve_slots};
