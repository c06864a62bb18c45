//! Response lifecycle counters.
//!
//! # Metrics
//! - `response_finalized_total` (counter): finalized responses by variant
//! - `response_double_finalize_total` (counter): finalize on a completed response
//! - `response_not_modified_total` (counter): conditional GETs answered with 304
//! - `response_stream_overflow_total` (counter): rejected streaming writes
//!
//! Without an installed recorder these are no-ops.

/// Response variant label.
pub const BUFFERED: &str = "buffered";
pub const STREAMING: &str = "streaming";

pub fn record_finalized(variant: &'static str, status: u16) {
    metrics::counter!(
        "response_finalized_total",
        "variant" => variant,
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_double_finalize(variant: &'static str) {
    metrics::counter!("response_double_finalize_total", "variant" => variant).increment(1);
}

pub fn record_not_modified() {
    metrics::counter!("response_not_modified_total").increment(1);
}

pub fn record_stream_overflow() {
    metrics::counter!("response_stream_overflow_total").increment(1);
}
