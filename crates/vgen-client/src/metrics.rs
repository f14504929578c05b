//! Client request metrics.
//!
//! Recorded through the `metrics` facade; without an installed recorder
//! these calls are no-ops.

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Total service requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "vgen_client_requests_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "vgen_client_latency_seconds";
}

/// Record metrics for a completed request.
///
/// `status` is `0` when the request never produced a response.
pub fn record_request(operation: &'static str, status: u16, latency_ms: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation
    )
    .record(latency_ms / 1000.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        assert!(names::REQUESTS_TOTAL.contains("requests"));
        assert!(names::LATENCY_SECONDS.contains("latency"));
    }

    #[test]
    fn test_record_without_recorder_is_noop() {
        record_request("get_status", 200, 12.5);
        record_request("get_status", 0, 1.0);
    }
}
