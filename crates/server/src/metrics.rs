//! Prometheus metrics for the rolodex server.
//!
//! Counters track contact mutations and spreadsheet transfers. The `/metrics`
//! endpoint is unauthenticated and should stay on a private network.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{self, Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

pub static CONTACTS_CREATED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "rolodex_contacts_created_total",
        "Total number of contacts created through the API",
    )
    .expect("metric creation failed")
});

pub static CONTACTS_DELETED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "rolodex_contacts_deleted_total",
        "Total number of contacts deleted",
    )
    .expect("metric creation failed")
});

pub static FAVORITE_UPDATES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "rolodex_favorite_updates_total",
        "Total number of favorite flag updates",
    )
    .expect("metric creation failed")
});

pub static IMPORT_ROWS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "rolodex_import_rows_total",
            "Spreadsheet rows processed by import, by outcome",
        ),
        &["outcome"],
    )
    .expect("metric creation failed")
});

pub static EXPORTS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "rolodex_exports_total",
        "Total number of spreadsheet exports served",
    )
    .expect("metric creation failed")
});

static REGISTER_ONCE: Once = Once::new();

/// Register all metrics with the global registry.
///
/// Safe to call more than once.
pub fn register_metrics() {
    REGISTER_ONCE.call_once(|| {
        REGISTRY
            .register(Box::new(CONTACTS_CREATED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(CONTACTS_DELETED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(FAVORITE_UPDATES.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(IMPORT_ROWS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(EXPORTS.clone()))
            .expect("metric registration failed");
    });
}

/// GET /metrics - Prometheus metrics endpoint.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}").into_bytes(),
        ),
    }
}

/// Record import rows by outcome (`imported` or `skipped`).
pub fn record_import_rows(outcome: &str, rows: usize) {
    IMPORT_ROWS
        .with_label_values(&[outcome])
        .inc_by(rows as u64);
}
