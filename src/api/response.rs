//! Response types for the shift engine API.
//!
//! This module defines the success payloads, the error response structure,
//! and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    BagOutput, DataWarning, FormStats, ShiftType, SlotOutputStatus, TimeSlot, WorkerOutput,
};

/// Body of `GET /shifts/:shift_type/slots`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponse {
    /// The shift.
    pub shift_type: ShiftType,
    /// Non-break slots in start order.
    pub time_slots: Vec<TimeSlot>,
}

/// Body of `GET /shifts/:shift_type/current`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSlotResponse {
    /// The shift.
    pub shift_type: ShiftType,
    /// The time the slot was evaluated at.
    pub evaluated_at: NaiveDateTime,
    /// The current slot, if any.
    pub current_slot: Option<TimeSlot>,
    /// How long the answer stays valid before callers should ask again.
    pub polling_interval_secs: u64,
}

/// Body of `POST /hourly-output`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyOutputResponse {
    /// The shift.
    pub shift_type: ShiftType,
    /// The time statuses were evaluated at.
    pub evaluated_at: NaiveDateTime,
    /// One row per slot with output and status.
    pub slots: Vec<SlotOutputStatus>,
    /// Sum of slot outputs.
    pub total: u64,
    /// Data-quality warnings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DataWarning>,
}

/// Body of `POST /forms/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStatsResponse {
    /// Identifier of this calculation.
    pub calculation_id: Uuid,
    /// The form the statistics belong to.
    pub form_id: String,
    /// Form-level statistics.
    #[serde(flatten)]
    pub stats: FormStats,
    /// Per-worker totals.
    pub workers: Vec<WorkerOutput>,
    /// Per-bag totals.
    pub bags: Vec<BagOutput>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::UnknownShiftType { value } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "UNKNOWN_SHIFT_TYPE",
                    format!("Unknown shift type: {}", value),
                    "Expected one of REGULAR, EXTENDED, OVERTIME defined in the catalog",
                ),
            ),
            EngineError::UnknownSlotKey { key } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "UNKNOWN_SLOT_KEY",
                    format!("Hourly data key '{}' does not match any time slot", key),
                    "Keys must be a slot label (HH:MM-HH:MM) or slot id of the shift",
                ),
            ),
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            error @ (EngineError::InvalidTimeSlot { .. } | EngineError::InvalidCatalog { .. }) => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Invalid time slot catalog",
                        error.to_string(),
                    ),
                }
            }
        }
    }
}
