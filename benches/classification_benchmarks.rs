//! Performance benchmarks for the fleet commission engine.
//!
//! Covers tier classification over growing cohorts, the commission amount
//! formula, and a full `/commission/calculate` round trip through the router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::str::FromStr;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use fleet_commission::api::{AppState, create_router};
use fleet_commission::calculation::{classify_with_band, compute_commission, determine_tier};
use fleet_commission::config::{ConfigLoader, RateBand};
use fleet_commission::models::OccurrenceCountSnapshot;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Builds a cohort of `size` workers with a spread of occurrence counts.
fn create_snapshot(size: usize) -> OccurrenceCountSnapshot {
    OccurrenceCountSnapshot::from_counts(
        (0..size).map(|i| (format!("w-{:04}", i), (i % 7) as u32)),
    )
}

fn bench_tier_classification(c: &mut Criterion) {
    let band = RateBand::standard();
    let mut group = c.benchmark_group("tier_classification");

    for size in [3usize, 10, 100, 1000] {
        let snapshot = create_snapshot(size);
        let last = format!("w-{:04}", size - 1);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snapshot| {
            b.iter(|| black_box(classify_with_band(black_box(&last), snapshot, &band)))
        });
    }
    group.finish();
}

fn bench_whole_cohort(c: &mut Criterion) {
    let snapshot = create_snapshot(100);
    let ids: Vec<String> = snapshot.entries().iter().map(|(id, _)| id.clone()).collect();

    let mut group = c.benchmark_group("cohort");
    group.throughput(Throughput::Elements(ids.len() as u64));
    group.bench_function("classify_100_workers", |b| {
        b.iter(|| {
            for id in &ids {
                black_box(determine_tier(id, &snapshot));
            }
        })
    });
    group.finish();
}

fn bench_commission_amount(c: &mut Criterion) {
    let total = Decimal::from_str("10500.00").unwrap();
    let percentage = Decimal::from_str("0.9").unwrap();

    c.bench_function("commission_amount", |b| {
        b.iter(|| black_box(compute_commission(black_box(total), black_box(percentage))))
    });
}

fn bench_calculate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/fleet").expect("Failed to load config");
    let router = create_router(AppState::new(config));

    // Seed a small fleet so the endpoint classifies a real cohort.
    let worker_id = rt.block_on(async {
        let mut first = None;
        for name in ["Davi", "Ivaney", "Claudio", "Valdiney", "Rui", "Caio"] {
            let response = router
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/workers")
                        .header("Content-Type", "application/json")
                        .body(Body::from(
                            serde_json::json!({ "name": name, "role": "driver" }).to_string(),
                        ))
                        .unwrap(),
                )
                .await
                .unwrap();
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let worker: serde_json::Value = serde_json::from_slice(&body).unwrap();
            let id = worker["id"].as_str().unwrap().to_string();
            first.get_or_insert(id);
        }
        first.unwrap()
    });

    let body = serde_json::json!({ "worker_id": worker_id, "month": 1, "year": 2026 }).to_string();

    c.bench_function("calculate_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/commission/calculate")
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
    bench_tier_classification,
    bench_whole_cohort,
    bench_commission_amount,
    bench_calculate_endpoint
);
criterion_main!(benches);
