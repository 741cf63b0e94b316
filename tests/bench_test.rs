//! Benchmark tests for critical operations
//!
//! Run with: cargo test --release -- --nocapture bench

use std::sync::Arc;
use std::time::Instant;

use serde_json::json;

use url_shortener::model::ShortenRequest;
use url_shortener::handler::{redirect_short_code, shorten_url};
use url_shortener::repository::{AppState, UrlRepository};

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

/// Benchmark helper to measure execution time
fn benchmark<F>(name: &str, iterations: usize, mut f: F)
where
    F: FnMut(),
{
    let start = Instant::now();

    for _ in 0..iterations {
        f();
    }

    let duration = start.elapsed();
    let avg_us = duration.as_micros() as f64 / iterations as f64;
    let ops_per_sec = (iterations as f64 / duration.as_secs_f64()) as u64;

    println!("  {} ({} iterations)", name, iterations);
    println!("    Total time: {:?}", duration);
    println!("    Avg time: {:.3}us", avg_us);
    println!("    Throughput: {} ops/sec\n", ops_per_sec);
}

#[test]
#[ignore] // Run explicitly with: cargo test bench --release -- --ignored --nocapture
fn bench_repository_operations() {
    println!("\n=== Benchmark: Repository ===\n");

    let repo = UrlRepository::new();
    let iterations = 100_000;

    let mut codes = Vec::with_capacity(iterations);
    benchmark("create", iterations, || {
        codes.push(repo.create("https://example.com/bench"));
    });

    let mut i = 0;
    benchmark("get", iterations, || {
        let _ = repo.get(&codes[i % codes.len()]);
        i += 1;
    });

    benchmark("increment_clicks", iterations, || {
        let _ = repo.increment_clicks(&codes[i % codes.len()]);
        i += 1;
    });
}

#[tokio::test(flavor = "multi_thread")]
#[ignore]
async fn bench_handlers() {
    println!("\n=== Benchmark: Handlers ===\n");

    let state = AppState::new(Arc::new(UrlRepository::new()));
    let iterations = 10_000;

    let start = Instant::now();
    for i in 0..iterations {
        let req = ShortenRequest {
            url: Some(json!(format!("https://example.com/handler{}", i))),
        };
        let _ = shorten_url(State(state.clone()), HeaderMap::new(), Ok(Json(req))).await;
    }
    println!("  shorten_url: {:?} for {} requests", start.elapsed(), iterations);

    let code = state.repo.create("https://example.com/hot");
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = redirect_short_code(Path(code.clone()), State(state.clone())).await;
    }
    println!("  redirect_short_code: {:?} for {} requests\n", start.elapsed(), iterations);
}

#[tokio::test(flavor = "multi_thread")]
#[ignore]
async fn bench_concurrent_operations() {
    println!("\n=== Benchmark: Concurrent Operations ===\n");

    let repo = Arc::new(UrlRepository::new());
    let hot = repo.create("https://example.com/hot");

    let num_tasks = 100;
    let ops_per_task = 1000;

    println!("  Running {} concurrent tasks with {} ops each...", num_tasks, ops_per_task);

    let start = Instant::now();

    let mut handles = vec![];

    for task_id in 0..num_tasks {
        let repo = Arc::clone(&repo);
        let hot = hot.clone();

        let handle = tokio::spawn(async move {
            for op_id in 0..ops_per_task {
                if op_id % 2 == 0 {
                    repo.create(format!("https://example.com/concurrent-{}-{}", task_id, op_id));
                } else {
                    repo.increment_clicks(&hot).unwrap();
                }
            }
        });

        handles.push(handle);
    }

    // Wait for all tasks
    for handle in handles {
        handle.await.unwrap();
    }

    let duration = start.elapsed();
    let total_ops = num_tasks * ops_per_task;
    let ops_per_sec = total_ops as f64 / duration.as_secs_f64();

    assert_eq!(repo.get(&hot).unwrap().clicks, (total_ops / 2) as u64);

    println!("  Total operations: {}", total_ops);
    println!("  Total time: {:?}", duration);
    println!("  Throughput: {:.0} ops/sec\n", ops_per_sec);
}

#[test]
fn bench_summary() {
    println!("\n{}", "=".repeat(60));
    println!("Benchmark Test Suite");
    println!("{}", "=".repeat(60));
    println!("\nTo run benchmarks, use:");
    println!("  cargo test --release bench -- --ignored --nocapture");
    println!("\nAvailable benchmarks:");
    println!("  • bench_repository_operations - create/get/increment throughput");
    println!("  • bench_handlers              - handler overhead without HTTP");
    println!("  • bench_concurrent_operations - mixed creates and clicks across tasks");
    println!("\n{}\n", "=".repeat(60));
}
