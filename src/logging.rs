//! Logging utilities for choropleth.
//!
//! This module provides structured logging helpers on top of `tracing`,
//! so classification and rendering runs leave searchable records.

use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    // Stdout carries the legend JSON, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        debug!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        debug!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation failed"
        );
    }
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let operation_id = generate_operation_id();

    debug!(
        operation = operation,
        operation_id = %operation_id,
        "Starting operation"
    );

    let result = f();

    info!(
        operation = operation,
        operation_id = %operation_id,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log a summary of a loaded table
pub fn log_table_load_stats(source: &str, rows: usize, column_names: &[&str]) {
    info!(
        operation = "table_load",
        source = source,
        rows = rows,
        column_count = column_names.len(),
        columns = %column_names.join(", "),
        "Table loaded successfully"
    );
}

/// Log the outcome of a classification
pub fn log_classification_stats(
    scheme: &str,
    column: &str,
    rows: usize,
    requested_k: usize,
    bins: &[f64],
    counts: &[usize],
) {
    if bins.len() < requested_k {
        debug!(
            scheme = scheme,
            requested_k = requested_k,
            classes = bins.len(),
            "Classifier produced fewer classes than requested"
        );
    }

    info!(
        operation = "classify",
        scheme = scheme,
        column = column,
        rows = rows,
        requested_k = requested_k,
        classes = bins.len(),
        bins = ?bins,
        counts = ?counts,
        "Column classified"
    );
}

/// Log an error with context
pub fn log_error(error: &crate::error::ChoroplethError, context: &str) {
    error!(
        error = %error,
        context = context,
        error_type = std::any::type_name_of_val(error),
        "Error occurred"
    );
}

/// Generate a unique operation ID
pub fn generate_operation_id() -> String {
    Uuid::new_v4().to_string()
}
