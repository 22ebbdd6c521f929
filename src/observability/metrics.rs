//! Metrics collection.
//!
//! # Metrics
//! - `styles_requests_total` (counter): requests served by the producer
//! - `membership_checks_total` (counter): checks by mode and branch taken
//!
//! No exporter is installed; without a recorder these are no-ops.

use crate::membership::CheckMode;

/// Record one request served by the producer.
pub fn record_served() {
    metrics::counter!("styles_requests_total").increment(1);
}

/// Record one predicate evaluation.
pub fn record_check(mode: CheckMode, present: bool) {
    metrics::counter!(
        "membership_checks_total",
        "mode" => mode.to_string(),
        "present" => present.to_string()
    )
    .increment(1);
}
