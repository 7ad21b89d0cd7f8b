//! Integration tests for the shift engine.
//!
//! This test suite covers:
//! - Slot resolution for every shift type in the factory catalog
//! - Current slot lookups, including breaks and boundaries
//! - Hourly output aggregation and slot statuses
//! - Unknown hourly-data key policies
//! - Form statistics, attendance, and zero-guarded percentages
//! - Error cases

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tower::ServiceExt;

use shift_engine::api::{AppState, create_router};
use shift_engine::config::{CatalogMetadata, ConfigLoader, EngineSettings, UnknownKeyPolicy};
use shift_engine::models::{ShiftSchedule, ShiftType, TimeSlot, parse_clock_time};
use shift_engine::polling::FixedClock;

// =============================================================================
// Test Helpers
// =============================================================================

fn clock_at(time: &str) -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_time(parse_clock_time(time).unwrap()),
    ))
}

fn factory_router() -> Router {
    let config = ConfigLoader::load("./config/factory").expect("Failed to load config");
    create_router(AppState::with_clock(config, clock_at("10:00")))
}

fn slot(id: &str, start: &str, end: &str) -> TimeSlot {
    TimeSlot::new(
        id,
        parse_clock_time(start).unwrap(),
        parse_clock_time(end).unwrap(),
        false,
    )
    .unwrap()
}

/// A single three-slot REGULAR schedule starting at 08:00.
fn morning_router(policy: UnknownKeyPolicy) -> Router {
    let schedule = ShiftSchedule::new(
        ShiftType::Regular,
        vec![
            slot("m1", "08:00", "09:00"),
            slot("m2", "09:00", "10:00"),
            slot("m3", "10:00", "11:00"),
        ],
    )
    .unwrap();
    let config = ConfigLoader::from_parts(
        CatalogMetadata {
            name: "Morning line".to_string(),
            version: "test".to_string(),
        },
        EngineSettings {
            polling_interval_secs: 30,
            unknown_slot_keys: policy,
        },
        vec![schedule],
    )
    .unwrap();
    create_router(AppState::with_clock(config, clock_at("09:30")))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    send(
        router,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn entry(id: &str, worker: &str, status: &str, hourly: Value) -> Value {
    json!({
        "id": id,
        "workerId": worker,
        "attendanceStatus": status,
        "bagId": "BAG-1",
        "process": "sewing",
        "color": "black",
        "hourlyData": hourly
    })
}

fn labels(slots: &Value) -> Vec<String> {
    slots
        .as_array()
        .unwrap()
        .iter()
        .map(|slot| slot["label"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Slot Catalog
// =============================================================================

#[tokio::test]
async fn test_regular_slots_exclude_lunch() {
    let (status, body) = get(factory_router(), "/shifts/REGULAR/slots").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shiftType"], "REGULAR");
    let labels = labels(&body["timeSlots"]);
    assert_eq!(labels.len(), 8);
    assert_eq!(labels.first().unwrap(), "07:30-08:30");
    assert_eq!(labels.last().unwrap(), "15:30-16:30");
    assert!(!labels.contains(&"11:30-12:30".to_string()));
}

#[tokio::test]
async fn test_longer_shifts_extend_regular() {
    let (_, regular) = get(factory_router(), "/shifts/REGULAR/slots").await;
    let (_, extended) = get(factory_router(), "/shifts/EXTENDED/slots").await;
    let (_, overtime) = get(factory_router(), "/shifts/OVERTIME/slots").await;

    let regular = labels(&regular["timeSlots"]);
    let extended = labels(&extended["timeSlots"]);
    let overtime = labels(&overtime["timeSlots"]);

    assert_eq!(extended.len(), 9);
    assert_eq!(overtime.len(), 11);
    assert!(extended.starts_with(&regular));
    assert!(overtime.starts_with(&regular));
    assert_eq!(overtime.last().unwrap(), "19:00-20:00");
}

#[tokio::test]
async fn test_shift_type_path_is_case_insensitive() {
    let (status, body) = get(factory_router(), "/shifts/overtime/slots").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shiftType"], "OVERTIME");
}

#[tokio::test]
async fn test_resolved_slots_are_sorted_and_disjoint() {
    for shift in ["REGULAR", "EXTENDED", "OVERTIME"] {
        let (_, body) = get(factory_router(), &format!("/shifts/{}/slots", shift)).await;
        let slots = body["timeSlots"].as_array().unwrap();
        for pair in slots.windows(2) {
            let previous_end = pair[0]["end"].as_str().unwrap();
            let next_start = pair[1]["start"].as_str().unwrap();
            assert!(previous_end <= next_start, "{} overlaps in {}", previous_end, shift);
        }
        assert!(slots.iter().all(|slot| slot["isBreak"] == false));
    }
}

// =============================================================================
// Current Slot
// =============================================================================

#[tokio::test]
async fn test_current_slot_at_explicit_time() {
    let (status, body) = get(factory_router(), "/shifts/REGULAR/current?at=08:45").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentSlot"]["label"], "08:30-09:30");
    assert_eq!(body["evaluatedAt"], "2026-03-02T08:45:00");
}

#[tokio::test]
async fn test_current_slot_during_lunch_is_null() {
    let (_, body) = get(factory_router(), "/shifts/REGULAR/current?at=12:00").await;
    assert!(body["currentSlot"].is_null());
}

#[tokio::test]
async fn test_current_slot_end_is_exclusive() {
    let (_, regular) = get(
        factory_router(),
        "/shifts/REGULAR/current?at=2026-03-02T16:30:00",
    )
    .await;
    assert!(regular["currentSlot"].is_null());

    let (_, extended) = get(
        factory_router(),
        "/shifts/EXTENDED/current?at=2026-03-02T16:30:00",
    )
    .await;
    assert_eq!(extended["currentSlot"]["label"], "16:30-17:30");
}

#[tokio::test]
async fn test_current_slot_outside_shift_is_null() {
    let (_, early) = get(factory_router(), "/shifts/OVERTIME/current?at=06:00").await;
    let (_, late) = get(factory_router(), "/shifts/OVERTIME/current?at=21:15").await;
    assert!(early["currentSlot"].is_null());
    assert!(late["currentSlot"].is_null());
}

// =============================================================================
// Hourly Output
// =============================================================================

#[tokio::test]
async fn test_hourly_output_statuses_follow_clock() {
    let request = json!({
        "shiftType": "REGULAR",
        "hourlyData": {"08:00-09:00": 5, "10:00-11:00": 3}
    });

    let (status, body) = post(
        morning_router(UnknownKeyPolicy::Ignore),
        "/hourly-output",
        request,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let statuses: Vec<&str> = body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["completed", "current", "pending"]);
    assert_eq!(body["total"], 8);
    assert!(body.get("warnings").is_none());
}

#[tokio::test]
async fn test_hourly_output_marks_missing_slots() {
    let request = json!({
        "shiftType": "REGULAR",
        "hourlyData": {"09:00-10:00": 7},
        "at": "10:30"
    });

    let (_, body) = post(
        morning_router(UnknownKeyPolicy::Ignore),
        "/hourly-output",
        request,
    )
    .await;

    let slots = body["slots"].as_array().unwrap();
    assert_eq!(slots[0]["status"], "missing");
    assert_eq!(slots[1]["status"], "completed");
    assert_eq!(slots[2]["status"], "current");
    assert_eq!(body["total"], 7);
}

#[tokio::test]
async fn test_hourly_output_accepts_slot_ids() {
    let request = json!({
        "shiftType": "REGULAR",
        "hourlyData": {"m1": 4, "08:00-09:00": 2}
    });

    let (_, body) = post(
        morning_router(UnknownKeyPolicy::Ignore),
        "/hourly-output",
        request,
    )
    .await;

    assert_eq!(body["slots"][0]["output"], 6);
    assert_eq!(body["total"], 6);
}

#[tokio::test]
async fn test_unknown_keys_ignored_by_default() {
    let request = json!({
        "shiftType": "REGULAR",
        "hourlyData": {"08:00-09:00": 5, "22:00-23:00": 40}
    });

    let (status, body) = post(
        morning_router(UnknownKeyPolicy::Ignore),
        "/hourly-output",
        request,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert!(body.get("warnings").is_none());
}

#[tokio::test]
async fn test_unknown_keys_reported_with_warn_policy() {
    let request = json!({
        "shiftType": "REGULAR",
        "hourlyData": {"08:00-09:00": 5, "22:00-23:00": 40}
    });

    let (status, body) = post(
        morning_router(UnknownKeyPolicy::Warn),
        "/hourly-output",
        request,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    let warnings = body["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "UNKNOWN_SLOT_KEY");
    assert!(warnings[0]["message"].as_str().unwrap().contains("22:00-23:00"));
}

#[tokio::test]
async fn test_unknown_keys_rejected_with_reject_policy() {
    let request = json!({
        "shiftType": "REGULAR",
        "hourlyData": {"08:00-09:00": 5, "22:00-23:00": 40}
    });

    let (status, body) = post(
        morning_router(UnknownKeyPolicy::Reject),
        "/hourly-output",
        request,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNKNOWN_SLOT_KEY");
}

// =============================================================================
// Form Statistics
// =============================================================================

#[tokio::test]
async fn test_attendance_counts_distinct_workers() {
    let request = json!({
        "form": {"id": "form-7", "shiftType": "REGULAR", "plannedOutput": 100},
        "entries": [
            entry("e1", "w1", "PRESENT", json!({"07:30-08:30": 10})),
            entry("e2", "w2", "PRESENT", json!({"07:30-08:30": 12})),
            entry("e3", "w3", "ABSENT", json!({})),
            entry("e4", "w4", "LATE", json!({"08:30-09:30": 8}))
        ]
    });

    let (status, body) = post(factory_router(), "/forms/stats", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["formId"], "form-7");
    assert_eq!(body["attendance"]["totalWorkers"], 4);
    assert_eq!(body["attendance"]["present"], 2);
    assert_eq!(body["attendance"]["absent"], 1);
    assert_eq!(body["attendance"]["late"], 1);
    assert_eq!(body["attendance"]["presentPercentage"], 50);
    assert_eq!(body["productivity"]["totalOutput"], 30);
    assert_eq!(body["productivity"]["completionRate"], 30);
    assert!(body["calculationId"].is_string());
}

#[tokio::test]
async fn test_zero_planned_output_gives_zero_completion_rate() {
    let request = json!({
        "form": {"id": "form-8", "shiftType": "EXTENDED", "plannedOutput": 0},
        "entries": [
            entry("e1", "w1", "PRESENT", json!({"07:30-08:30": 60, "16:30-17:30": 60}))
        ]
    });

    let (status, body) = post(factory_router(), "/forms/stats", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["productivity"]["totalOutput"], 120);
    assert_eq!(body["productivity"]["plannedOutput"], 0);
    assert_eq!(body["productivity"]["completionRate"], 0);
}

#[tokio::test]
async fn test_empty_form_has_all_zero_statistics() {
    let request = json!({
        "form": {"id": "empty", "shiftType": "OVERTIME", "plannedOutput": 500}
    });

    let (status, body) = post(factory_router(), "/forms/stats", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["attendance"]["totalWorkers"], 0);
    assert_eq!(body["attendance"]["presentPercentage"], 0);
    assert_eq!(body["productivity"]["averageOutput"], 0);
    assert_eq!(body["completion"]["filledTimeSlots"], 0);
    assert_eq!(body["completion"]["totalTimeSlots"], 11);
    assert_eq!(body["workers"], json!([]));
    assert_eq!(body["bags"], json!([]));
}

#[tokio::test]
async fn test_present_output_excludes_absent_workers() {
    let request = json!({
        "form": {"id": "form-9", "shiftType": "REGULAR", "plannedOutput": 50},
        "entries": [
            entry("e1", "w1", "PRESENT", json!({"07:30-08:30": 20})),
            entry("e2", "w2", "ABSENT", json!({"07:30-08:30": 5}))
        ]
    });

    let (_, body) = post(factory_router(), "/forms/stats", request).await;

    assert_eq!(body["productivity"]["totalOutput"], 25);
    assert_eq!(body["productivity"]["presentOutput"], 20);
    let first_slot = &body["hourly"][0];
    assert_eq!(first_slot["totalOutput"], 25);
    assert_eq!(first_slot["presentOutput"], 20);
    assert_eq!(first_slot["filledPercentage"], 100);
    assert_eq!(body["bags"][0]["totalOutput"], 25);
    assert_eq!(body["bags"][0]["presentOutput"], 20);
}

#[tokio::test]
async fn test_worker_summary_sums_entries() {
    let request = json!({
        "form": {"id": "form-10", "shiftType": "REGULAR", "plannedOutput": 0},
        "entries": [
            entry("e1", "w1", "PRESENT", json!({"07:30-08:30": 4, "regular-02": 6})),
            entry("e2", "w1", "PRESENT", json!({"07:30-08:30": 3}))
        ]
    });

    let (_, body) = post(factory_router(), "/forms/stats", request).await;

    let workers = body["workers"].as_array().unwrap();
    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0]["entryCount"], 2);
    assert_eq!(workers[0]["totalOutput"], 13);
    assert_eq!(workers[0]["hourlyData"]["07:30-08:30"], 7);
    assert_eq!(workers[0]["hourlyData"]["08:30-09:30"], 6);
    assert_eq!(body["attendance"]["totalWorkers"], 1);
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_unknown_shift_type_in_body_returns_400() {
    let request = json!({
        "form": {"id": "f", "shiftType": "NIGHT", "plannedOutput": 10}
    });

    let (status, body) = post(factory_router(), "/forms/stats", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_shift_missing_from_catalog_returns_400() {
    let (status, body) = get(
        morning_router(UnknownKeyPolicy::Ignore),
        "/shifts/OVERTIME/slots",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNKNOWN_SHIFT_TYPE");
}

#[tokio::test]
async fn test_missing_hourly_shift_type_returns_validation_error() {
    let (status, body) = post(
        factory_router(),
        "/hourly-output",
        json!({"hourlyData": {"07:30-08:30": 1}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
