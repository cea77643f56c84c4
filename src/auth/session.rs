//! Per-user request session: credentials plus rate-limit state.
//!
//! A [`Session`] is passed by reference to every request so the mutable state a client
//! accumulates is visible at the call site. Credentials are read-mostly behind a
//! [`RwLock`]; the rate-limit tracker serializes its writes behind a [`Mutex`]. When one
//! session is shared by concurrent tasks, rate-limit values are last-writer-wins.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenResponse},
	rate_limit::{RateLimitSnapshot, RateLimitTracker},
};

/// Access token slot. Absent until a token exchange or an explicit assignment.
#[derive(Debug, Default)]
pub struct Credentials(RwLock<Option<AccessToken>>);
impl Credentials {
	/// Stores a token, replacing any previous one.
	pub fn set(&self, token: impl Into<AccessToken>) {
		*self.0.write() = Some(token.into());
	}

	/// Removes the token.
	pub fn clear(&self) {
		*self.0.write() = None;
	}

	/// Clones the current token, if any.
	pub fn get(&self) -> Option<AccessToken> {
		self.0.read().clone()
	}

	/// Returns true when a token is present.
	pub fn is_set(&self) -> bool {
		self.0.read().is_some()
	}
}

/// Mutable state shared by a sequence of requests on behalf of one user.
#[derive(Debug, Default)]
pub struct Session {
	/// Bearer credentials.
	pub credentials: Credentials,
	/// Remaining-call bookkeeping.
	pub rate_limit: RateLimitTracker,
}
impl Session {
	/// Creates a session without credentials.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a session that already holds a token.
	pub fn with_access_token(token: impl Into<AccessToken>) -> Self {
		let session = Self::default();

		session.set_access_token(token);

		session
	}

	/// Stores a token; accepts raw strings or a whole [`TokenResponse`].
	pub fn set_access_token(&self, token: impl Into<AccessToken>) {
		self.credentials.set(token);
	}

	/// Current token, if any.
	pub fn access_token(&self) -> Option<AccessToken> {
		self.credentials.get()
	}

	/// Value of the last `X-Ratelimit-Remaining` header seen by this session.
	pub fn rate_limit(&self) -> Option<u64> {
		self.rate_limit.remaining()
	}

	/// Last rate-limit observation with its timestamp.
	pub fn rate_limit_snapshot(&self) -> Option<RateLimitSnapshot> {
		self.rate_limit.snapshot()
	}
}
impl From<TokenResponse> for Session {
	fn from(response: TokenResponse) -> Self {
		Self::with_access_token(response)
	}
}
