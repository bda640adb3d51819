//! Metrics for slip activity and boundary calls.
//!
//! Names are registered with the `metrics` facade. Nothing is exported unless
//! the embedding application installs a recorder.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Selection toggles counter metric name.
pub const METRIC_SLIP_TOGGLES: &str = "slip_toggles_total";
/// Accepted slip submissions counter metric name.
pub const METRIC_SLIP_SUBMISSIONS: &str = "slip_submissions_total";
/// Failed slip submissions counter metric name.
pub const METRIC_SLIP_SUBMISSION_FAILURES: &str = "slip_submission_failures_total";
/// Slip submission latency metric name.
pub const METRIC_SLIP_SUBMIT_LATENCY: &str = "slip_submit_latency_ms";
/// Dangling round references counter metric name.
pub const METRIC_CATALOG_DANGLING_REFS: &str = "catalog_dangling_refs_total";
/// Reverted optimistic credits counter metric name.
pub const METRIC_FUNDS_REVERTED: &str = "funds_reverted_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_SLIP_SUBMIT_LATENCY,
        "Slip submission round-trip latency in milliseconds"
    );

    describe_counter!(METRIC_SLIP_TOGGLES, "Total number of selection toggles");
    describe_counter!(
        METRIC_SLIP_SUBMISSIONS,
        "Total number of slips accepted by the sportsbook"
    );
    describe_counter!(
        METRIC_SLIP_SUBMISSION_FAILURES,
        "Total number of slip submissions that failed in transport"
    );
    describe_counter!(
        METRIC_CATALOG_DANGLING_REFS,
        "Total number of round references to offers missing from the catalog"
    );
    describe_counter!(
        METRIC_FUNDS_REVERTED,
        "Total number of optimistic balance credits that were reverted"
    );

    debug!("Metrics initialized");
}

/// Record slip submission latency.
pub fn record_slip_submit_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_SLIP_SUBMIT_LATENCY).record(latency_ms);
}

/// Increment selection toggles counter.
pub fn inc_slip_toggles() {
    counter!(METRIC_SLIP_TOGGLES).increment(1);
}

/// Increment accepted submissions counter.
pub fn inc_slip_submissions() {
    counter!(METRIC_SLIP_SUBMISSIONS).increment(1);
}

/// Increment failed submissions counter.
pub fn inc_slip_submission_failures() {
    counter!(METRIC_SLIP_SUBMISSION_FAILURES).increment(1);
}

/// Increment dangling reference counter.
pub fn inc_catalog_dangling_refs() {
    counter!(METRIC_CATALOG_DANGLING_REFS).increment(1);
}

/// Increment reverted credits counter.
pub fn inc_funds_reverted() {
    counter!(METRIC_FUNDS_REVERTED).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_a_no_op() {
        init_metrics();
        inc_slip_toggles();
        inc_catalog_dangling_refs();
        record_slip_submit_latency(Instant::now());
    }
}
