//! Bookkeeping for the server-reported remaining-call budget.

// self
use crate::{_prelude::*, obs};

/// Response header carrying the remaining-call count.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "X-Ratelimit-Remaining";

/// Most recent remaining-call observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitSnapshot {
	/// API calls left in the current window.
	pub remaining: u64,
	/// Instant the header was read.
	pub observed_at: OffsetDateTime,
}

/// Last-writer-wins store for the remaining-call count of one session.
#[derive(Debug, Default)]
pub struct RateLimitTracker(Mutex<Option<RateLimitSnapshot>>);
impl RateLimitTracker {
	/// Records a fresh observation, replacing any previous one.
	pub fn observe(&self, remaining: u64) {
		self.observe_at(remaining, OffsetDateTime::now_utc());
	}

	/// Records an observation with an explicit timestamp.
	pub fn observe_at(&self, remaining: u64, observed_at: OffsetDateTime) {
		*self.0.lock() = Some(RateLimitSnapshot { remaining, observed_at });

		obs::record_rate_limit(remaining);
	}

	/// Records the header value when it parses as an unsigned integer.
	///
	/// Returns whether the state changed; unparseable values leave it untouched.
	pub fn observe_header(&self, value: &str) -> bool {
		match value.trim().parse::<u64>() {
			Ok(remaining) => {
				self.observe(remaining);

				true
			},
			Err(_) => false,
		}
	}

	/// Remaining calls, if any response has reported them yet.
	pub fn remaining(&self) -> Option<u64> {
		self.snapshot().map(|snapshot| snapshot.remaining)
	}

	/// Full snapshot of the last observation.
	pub fn snapshot(&self) -> Option<RateLimitSnapshot> {
		*self.0.lock()
	}
}
