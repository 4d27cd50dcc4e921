//! Prometheus metrics for atividades-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

/// Histogram for database query duration.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "atividades_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("Failed to register DB_QUERY_DURATION")
});

/// Counter for successful writes by entity and operation.
pub static ENTITY_WRITES: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "atividades_entity_writes_total",
        "Total number of persisted creates, updates and deletes",
        &["entity", "operation"]
    )
    .expect("Failed to register ENTITY_WRITES")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&ENTITY_WRITES);
}

/// Get all metrics as Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Record a persisted write.
pub fn record_entity_write(entity: &str, operation: &str) {
    ENTITY_WRITES.with_label_values(&[entity, operation]).inc();
}
