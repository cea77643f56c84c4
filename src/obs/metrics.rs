// self
use crate::obs::{Operation, Outcome};

/// Counter of API calls, labeled by `operation` and `outcome`.
pub const REQUEST_TOTAL: &str = "instagram_client_request_total";
/// Gauge holding the last `X-Ratelimit-Remaining` value seen.
pub const RATE_LIMIT_REMAINING: &str = "instagram_client_rate_limit_remaining";

/// Counts one `outcome` of `operation` on [`REQUEST_TOTAL`].
pub fn record_outcome(operation: Operation, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		REQUEST_TOTAL,
		"operation" => operation.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (operation, outcome);
}

/// Publishes a freshly observed remaining-call count.
pub fn record_rate_limit(remaining: u64) {
	#[cfg(feature = "metrics")]
	metrics::gauge!(RATE_LIMIT_REMAINING).set(remaining as f64);

	#[cfg(feature = "tracing")]
	tracing::debug!(remaining, "rate limit updated");

	#[cfg(not(any(feature = "metrics", feature = "tracing")))]
	let _ = remaining;
}
