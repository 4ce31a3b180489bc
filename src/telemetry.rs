//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus,
//! statsd); without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `sentio_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider`: provider name (e.g. "gemini")
//! - `status`: "ok" or "error"
//! - `sentiment`: the classified label, "Positive", "Negative" or "Neutral"

/// Total classification batches sent to a provider.
///
/// Labels: `provider`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "sentio_requests_total";

/// Classification round-trip duration in seconds.
///
/// Labels: `provider`.
pub const REQUEST_DURATION_SECONDS: &str = "sentio_request_duration_seconds";

/// Total items classified, by label.
///
/// Labels: `sentiment`.
pub const ITEMS_TOTAL: &str = "sentio_items_total";

/// Items whose returned index did not resolve to a submitted text.
pub const DEGRADED_ITEMS_TOTAL: &str = "sentio_degraded_items_total";
