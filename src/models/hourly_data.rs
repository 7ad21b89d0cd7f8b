//! Per-slot production quantities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A mapping from time slot key (label or id) to the quantity produced in
/// that slot.
///
/// Writes through [`HourlyData::set`] replace the value for one key only;
/// combining entries goes through [`HourlyData::add`] or
/// [`HourlyData::merge`], which always sum.
///
/// # Example
///
/// ```
/// use shift_engine::models::HourlyData;
///
/// let mut worker = HourlyData::new();
/// worker.set("08:00-09:00", 5);
///
/// let mut second_bag = HourlyData::new();
/// second_bag.set("08:00-09:00", 3);
///
/// worker.merge(&second_bag);
/// assert_eq!(worker.get("08:00-09:00"), 8);
/// assert_eq!(worker.get("09:00-10:00"), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourlyData(BTreeMap<String, u32>);

impl HourlyData {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity recorded for `key`, or 0 when absent.
    pub fn get(&self, key: &str) -> u32 {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// Replaces the quantity for a single key.
    pub fn set(&mut self, key: impl Into<String>, quantity: u32) {
        self.0.insert(key.into(), quantity);
    }

    /// Adds to the quantity for a single key.
    pub fn add(&mut self, key: impl Into<String>, quantity: u32) {
        let value = self.0.entry(key.into()).or_insert(0);
        *value = value.saturating_add(quantity);
    }

    /// Sums every quantity of `other` into this mapping.
    pub fn merge(&mut self, other: &HourlyData) {
        for (key, quantity) in other.iter() {
            self.add(key, quantity);
        }
    }

    /// Sum of all recorded quantities, regardless of key validity.
    pub fn total(&self) -> u64 {
        self.0.values().map(|&q| u64::from(q)).sum()
    }

    /// Iterates keys and quantities in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(key, &quantity)| (key.as_str(), quantity))
    }

    /// Iterates the keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no key is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for HourlyData {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        let mut data = HourlyData::new();
        for (key, quantity) in iter {
            data.add(key, quantity);
        }
        data
    }
}
