//! Request types for the shift engine API.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{DigitalForm, HourlyData, ProductionEntry, ShiftType, parse_clock_time};

/// Query string of `GET /shifts/:shift_type/current`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentSlotQuery {
    /// Evaluation time; defaults to the server clock.
    #[serde(default)]
    pub at: Option<String>,
}

/// Request body for `POST /hourly-output`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyOutputRequest {
    /// Which schedule to align the data to.
    pub shift_type: ShiftType,
    /// Quantities by slot label or id.
    #[serde(default)]
    pub hourly_data: HourlyData,
    /// Evaluation time for slot statuses; defaults to the server clock.
    #[serde(default)]
    pub at: Option<String>,
}

/// Request body for `POST /forms/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormStatsRequest {
    /// The form header.
    pub form: DigitalForm,
    /// All entries recorded on the form.
    #[serde(default)]
    pub entries: Vec<ProductionEntry>,
}

/// Parses an evaluation time.
///
/// Accepts a full `YYYY-MM-DDTHH:MM[:SS]` timestamp, or a bare
/// `HH:MM[:SS]` clock time which is placed on `today`.
pub fn parse_evaluation_time(value: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| parse_clock_time(value).map(|time| today.and_time(time)))
}
