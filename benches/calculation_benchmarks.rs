//! Performance benchmarks for the shift engine.
//!
//! Covers the pure calculations (slot lookup, hourly aggregation, form
//! statistics) and one full HTTP round trip through the router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use shift_engine::api::{AppState, create_router};
use shift_engine::calculation::{aggregate, compute_stats, current_slot, resolve_slots};
use shift_engine::config::{ConfigLoader, ShiftCatalog};
use shift_engine::models::{
    AttendanceStatus, DigitalForm, HourlyData, ProductionEntry, ShiftType,
};

use axum::{body::Body, http::Request};
use chrono::NaiveDate;
use tower::ServiceExt;

fn load_catalog() -> ShiftCatalog {
    ConfigLoader::load("./config/factory")
        .expect("Failed to load config")
        .into_catalog()
}

/// Creates `count` entries spread over 40 workers with output in every slot.
fn create_entries(catalog: &ShiftCatalog, count: usize) -> Vec<ProductionEntry> {
    let slots = resolve_slots(catalog, ShiftType::Overtime).unwrap();
    let statuses = [
        AttendanceStatus::Present,
        AttendanceStatus::Present,
        AttendanceStatus::Late,
        AttendanceStatus::Absent,
    ];

    (0..count)
        .map(|i| ProductionEntry {
            id: format!("entry_{:04}", i),
            worker_id: format!("worker_{:02}", i % 40),
            attendance_status: statuses[i % statuses.len()],
            bag_id: Some(format!("bag_{}", i % 7)),
            process: Some("sewing".to_string()),
            color: Some("black".to_string()),
            hourly_data: slots
                .iter()
                .enumerate()
                .map(|(n, slot)| (slot.label.clone(), ((i + n) % 15) as u32))
                .collect(),
            total_output: None,
        })
        .collect()
}

fn overtime_form() -> DigitalForm {
    DigitalForm {
        id: "bench_form".to_string(),
        shift_type: ShiftType::Overtime,
        planned_output: 5000,
        date: NaiveDate::from_ymd_opt(2026, 3, 2),
        line_id: Some("line_a".to_string()),
    }
}

/// Benchmark: Current slot lookup.
fn bench_current_slot(c: &mut Criterion) {
    let catalog = load_catalog();
    let now = NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(18, 15, 0)
        .unwrap();

    c.bench_function("current_slot", |b| {
        b.iter(|| black_box(current_slot(&catalog, ShiftType::Overtime, black_box(now))))
    });
}

/// Benchmark: Aligning one entry's hourly data to the overtime schedule.
fn bench_aggregate(c: &mut Criterion) {
    let catalog = load_catalog();
    let slots = resolve_slots(&catalog, ShiftType::Overtime).unwrap();
    let data: HourlyData = slots
        .iter()
        .map(|slot| (slot.label.clone(), 12u32))
        .chain(std::iter::once(("unknown".to_string(), 3u32)))
        .collect();

    c.bench_function("aggregate_overtime", |b| {
        b.iter(|| black_box(aggregate(&slots, black_box(&data))))
    });
}

/// Benchmark: Form statistics for growing entry counts.
fn bench_form_stats_scaling(c: &mut Criterion) {
    let catalog = load_catalog();
    let form = overtime_form();

    let mut group = c.benchmark_group("form_stats");

    for entry_count in [10, 100, 1000].iter() {
        let entries = create_entries(&catalog, *entry_count);

        group.throughput(Throughput::Elements(*entry_count as u64));
        group.bench_with_input(
            BenchmarkId::new("entries", entry_count),
            entry_count,
            |b, _| b.iter(|| black_box(compute_stats(&catalog, &form, black_box(&entries)))),
        );
    }

    group.finish();
}

/// Benchmark: `POST /forms/stats` with 100 entries, through the router.
fn bench_form_stats_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/factory").expect("Failed to load config");
    let entries = create_entries(config.catalog(), 100);
    let router = create_router(AppState::new(config));
    let body = serde_json::json!({
        "form": overtime_form(),
        "entries": entries,
    })
    .to_string();

    c.bench_function("form_stats_request_100", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/forms/stats")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_current_slot,
    bench_aggregate,
    bench_form_stats_scaling,
    bench_form_stats_request,
);
criterion_main!(benches);
