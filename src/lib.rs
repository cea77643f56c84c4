//! Async Instagram REST API client: OAuth 2.0 login, optional request signing, cursor
//! pagination, and rate-limit bookkeeping over a pluggable HTTP transport.
//!
//! Every endpoint operation funnels through [`Client::execute`], which selects the auth mode,
//! builds the URL or form body, signs when requested, hands the request to an
//! [`HttpTransport`](http::HttpTransport), and records the `X-Ratelimit-Remaining` header on the
//! caller's [`Session`](auth::Session).

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod pagination;
pub mod rate_limit;
pub mod request;
pub mod sign;

mod dispatch;

pub use client::Client;
#[cfg(feature = "reqwest")] pub use client::ReqwestApiClient;

#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// self
	use crate::{
		client::Client,
		config::ClientConfig,
		error::TransportError,
		http::{HttpTransport, TransportFuture, TransportRequest},
	};

	/// API key used by [`test_config`].
	pub const TEST_API_KEY: &str = "test-key";
	/// API secret used by [`test_config`].
	pub const TEST_API_SECRET: &str = "test-secret";
	/// Callback used by [`test_config`].
	pub const TEST_CALLBACK: &str = "https://app.example.com/callback";

	/// Failure replayed by [`SpyTransport`] when scripted to fail.
	#[derive(Debug, ThisError)]
	#[error("{0}")]
	pub struct SpyFailure(pub String);

	#[derive(Debug)]
	enum SpyReply {
		Raw(Vec<u8>),
		Fail(String),
	}

	/// Transport that records every request and replays scripted raw responses in order.
	#[derive(Clone, Debug, Default)]
	pub struct SpyTransport {
		replies: Arc<Mutex<VecDeque<SpyReply>>>,
		requests: Arc<Mutex<Vec<TransportRequest>>>,
	}
	impl SpyTransport {
		/// Creates a spy that answers its first call with `raw`.
		pub fn replying(raw: impl Into<Vec<u8>>) -> Self {
			let spy = Self::default();

			spy.push_raw(raw);

			spy
		}

		/// Queues a raw response (status line, headers, blank line, body).
		pub fn push_raw(&self, raw: impl Into<Vec<u8>>) {
			self.replies.lock().push_back(SpyReply::Raw(raw.into()));
		}

		/// Queues a transport failure carrying `message`.
		pub fn push_failure(&self, message: impl Into<String>) {
			self.replies.lock().push_back(SpyReply::Fail(message.into()));
		}

		/// Requests observed so far.
		pub fn requests(&self) -> Vec<TransportRequest> {
			self.requests.lock().clone()
		}

		/// Number of transport invocations observed so far.
		pub fn calls(&self) -> usize {
			self.requests.lock().len()
		}
	}
	impl HttpTransport for SpyTransport {
		fn send(&self, request: TransportRequest) -> TransportFuture<'_> {
			self.requests.lock().push(request);

			let reply = self.replies.lock().pop_front();

			Box::pin(async move {
				match reply {
					Some(SpyReply::Raw(raw)) => Ok(raw),
					Some(SpyReply::Fail(message)) =>
						Err(TransportError::network(SpyFailure(message))),
					None => Err(TransportError::network(SpyFailure(
						"SpyTransport has no scripted response left.".into(),
					))),
				}
			})
		}
	}

	/// Builds a configuration with the default Instagram endpoints.
	pub fn test_config() -> ClientConfig {
		ClientConfig::builder(TEST_API_KEY, TEST_API_SECRET, TEST_CALLBACK)
			.build()
			.expect("Test client configuration should be valid.")
	}

	/// Builds a client that talks to the provided spy.
	pub fn spy_client(spy: &SpyTransport) -> Client<SpyTransport> {
		Client::with_transport(test_config(), spy.clone())
	}

	/// Formats a raw HTTP/1.1 response the way transports hand it to the dispatcher.
	pub fn raw_response(status_line: &str, headers: &[(&str, &str)], body: &str) -> Vec<u8> {
		let mut raw = format!("{status_line}\r\n");

		for (name, value) in headers {
			raw.push_str(&format!("{name}: {value}\r\n"));
		}

		raw.push_str("\r\n");
		raw.push_str(body);

		raw.into_bytes()
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
