//! Spans and counters around API calls.
//!
//! Both layers compile to no-ops unless their feature is on:
//!
//! - `tracing` opens an `instagram_client.request` span per call, carrying the `operation` label
//!   and the `endpoint` path, and logs a `debug` event when a response reports a new rate limit.
//! - `metrics` counts calls in `instagram_client_request_total` by `operation` and `outcome`, and
//!   keeps the last reported rate limit in the `instagram_client_rate_limit_remaining` gauge.
//!
//! Endpoint operations are labeled with their method name (`user_likes`, `tag_media`, ...), so
//! the counter breaks down per API call rather than per transport round trip.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// What a span or counter sample is attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// A descriptor sent directly through [`Client::execute`](crate::Client::execute).
	Execute,
	/// A named endpoint operation such as `user_likes`.
	Endpoint(&'static str),
	/// The authorization-code-for-token exchange.
	TokenExchange,
	/// A follow-up page request.
	Paginate,
}
impl Operation {
	/// Label written to the `operation` span field and metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Execute => "execute",
			Operation::Endpoint(name) => name,
			Operation::TokenExchange => "token_exchange",
			Operation::Paginate => "paginate",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Stage of a call, recorded once on entry and once on completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// The call started.
	Attempt,
	/// The call returned `Ok`.
	Success,
	/// The call returned `Err`.
	Failure,
}
impl Outcome {
	/// Label written to the `outcome` metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}

	fn of<T, E>(result: &std::result::Result<T, E>) -> Self {
		if result.is_ok() { Outcome::Success } else { Outcome::Failure }
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `call` inside a request span for `operation`, counting its attempt and outcome.
pub async fn observe<F, T>(operation: Operation, endpoint: &str, call: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let span = RequestSpan::new(operation, endpoint);

	record_outcome(operation, Outcome::Attempt);

	let result = span.instrument(call).await;

	record_outcome(operation, Outcome::of(&result));

	result
}
