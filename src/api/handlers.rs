//! HTTP request handlers for the shift engine API.
//!
//! Handlers are thin: they parse input, call the pure calculation
//! functions, and log the outcome.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    routing::{get, post},
};
use chrono::NaiveDateTime;
use serde_json::{Value, json};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    aggregate_with_policy, classify_outputs, compute_stats, current_slot, resolve_slots,
    summarize_bags, summarize_workers,
};
use crate::models::ShiftType;

use super::request::{
    CurrentSlotQuery, FormStatsRequest, HourlyOutputRequest, parse_evaluation_time,
};
use super::response::{
    ApiError, ApiErrorResponse, CurrentSlotResponse, FormStatsResponse, HourlyOutputResponse,
    SlotsResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/shifts/:shift_type/slots", get(slots_handler))
        .route("/shifts/:shift_type/current", get(current_slot_handler))
        .route("/hourly-output", post(hourly_output_handler))
        .route("/forms/stats", post(form_stats_handler))
        .with_state(state)
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for `GET /shifts/:shift_type/slots`.
async fn slots_handler(
    State(state): State<AppState>,
    Path(shift_type): Path<String>,
) -> ApiResult<SlotsResponse> {
    let correlation_id = Uuid::new_v4();
    let shift_type = parse_shift_type(&shift_type)?;
    let time_slots = resolve_slots(state.catalog(), shift_type)?;
    debug!(
        correlation_id = %correlation_id,
        shift_type = %shift_type,
        slots = time_slots.len(),
        "Resolved time slots"
    );

    Ok(Json(SlotsResponse {
        shift_type,
        time_slots,
    }))
}

/// Handler for `GET /shifts/:shift_type/current`.
async fn current_slot_handler(
    State(state): State<AppState>,
    Path(shift_type): Path<String>,
    Query(query): Query<CurrentSlotQuery>,
) -> ApiResult<CurrentSlotResponse> {
    let correlation_id = Uuid::new_v4();
    let shift_type = parse_shift_type(&shift_type)?;
    let evaluated_at = evaluation_time(&state, query.at.as_deref())?;
    let slot = current_slot(state.catalog(), shift_type, evaluated_at)?;
    debug!(
        correlation_id = %correlation_id,
        shift_type = %shift_type,
        evaluated_at = %evaluated_at,
        current_slot = slot.as_ref().map(|s| s.label.as_str()).unwrap_or("none"),
        "Resolved current slot"
    );

    Ok(Json(CurrentSlotResponse {
        shift_type,
        evaluated_at,
        current_slot: slot,
        polling_interval_secs: state.catalog().settings().polling_interval_secs,
    }))
}

/// Handler for `POST /hourly-output`.
///
/// Aligns the posted hourly data to the shift's slots and classifies each
/// slot at the evaluation time.
async fn hourly_output_handler(
    State(state): State<AppState>,
    payload: Result<Json<HourlyOutputRequest>, JsonRejection>,
) -> ApiResult<HourlyOutputResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing hourly output request");

    let request = parse_payload(payload, correlation_id)?;
    let evaluated_at = evaluation_time(&state, request.at.as_deref())?;

    let slots = resolve_slots(state.catalog(), request.shift_type)?;
    let policy = state.catalog().settings().unknown_slot_keys;
    let output = aggregate_with_policy(&slots, &request.hourly_data, policy).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Hourly output rejected");
        ApiErrorResponse::from(err)
    })?;

    info!(
        correlation_id = %correlation_id,
        shift_type = %request.shift_type,
        total = output.total,
        warnings = output.warnings.len(),
        "Hourly output aggregated"
    );

    Ok(Json(HourlyOutputResponse {
        shift_type: request.shift_type,
        evaluated_at,
        slots: classify_outputs(&output.per_slot, evaluated_at),
        total: output.total,
        warnings: output.warnings,
    }))
}

/// Handler for `POST /forms/stats`.
async fn form_stats_handler(
    State(state): State<AppState>,
    payload: Result<Json<FormStatsRequest>, JsonRejection>,
) -> ApiResult<FormStatsResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing form statistics request");

    let request = parse_payload(payload, correlation_id)?;
    let start_time = Instant::now();

    let stats = compute_stats(state.catalog(), &request.form, &request.entries).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Form statistics failed");
        ApiErrorResponse::from(err)
    })?;
    let slots = resolve_slots(state.catalog(), request.form.shift_type)?;
    let workers = summarize_workers(&slots, &request.entries);
    let bags = summarize_bags(&request.entries);

    info!(
        correlation_id = %correlation_id,
        form_id = %request.form.id,
        entries = request.entries.len(),
        total_output = stats.productivity.total_output,
        completion_rate = stats.productivity.completion_rate,
        duration_us = start_time.elapsed().as_micros() as u64,
        "Form statistics computed"
    );

    Ok(Json(FormStatsResponse {
        calculation_id: correlation_id,
        form_id: request.form.id,
        stats,
        workers,
        bags,
    }))
}

fn parse_shift_type(raw: &str) -> Result<ShiftType, ApiErrorResponse> {
    raw.parse::<ShiftType>().map_err(ApiErrorResponse::from)
}

fn evaluation_time(state: &AppState, at: Option<&str>) -> Result<NaiveDateTime, ApiErrorResponse> {
    let now = state.clock().now();
    match at {
        None => Ok(now),
        Some(raw) => parse_evaluation_time(raw, now.date()).ok_or_else(|| {
            ApiErrorResponse::bad_request(ApiError::validation_error(format!(
                "Invalid evaluation time '{}': expected HH:MM or YYYY-MM-DDTHH:MM:SS",
                raw
            )))
        }),
    }
}

/// Turns a JSON extraction result into the request or a 400 response.
fn parse_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(ApiErrorResponse::bad_request(error))
}
