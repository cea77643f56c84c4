//! Transport primitives for API calls and token exchanges.
//!
//! The client depends on a single capability, [`HttpTransport`]: send one request and return
//! the raw response bytes (status line, header lines, blank line, body). Header parsing,
//! rate-limit bookkeeping, and body decoding happen above the transport so every
//! implementation behaves identically. [`ReqwestTransport`] is the default implementation.

pub mod header;
pub mod response;

pub use header::*;
pub use response::*;

// self
use crate::{_prelude::*, config::Timeouts, error::TransportError, request::Method};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Vec<u8>, TransportError>> + 'a + Send>>;

/// Capability that performs one HTTP round trip.
///
/// Implementations must return the raw response, headers included, exactly as an HTTP/1.1
/// client would print it with headers enabled. Connection failures and elapsed timeouts are
/// reported as [`TransportError`]; HTTP error statuses are not transport failures.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves to the raw response bytes.
	fn send(&self, request: TransportRequest) -> TransportFuture<'_>;
}

/// Fully built request handed to an [`HttpTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL, query string included.
	pub url: Url,
	/// Request headers in insertion order.
	pub headers: Vec<(String, String)>,
	/// Form-encoded body for `POST` requests.
	pub body: Option<String>,
	/// Connect and total timeouts.
	pub timeouts: Timeouts,
}
impl TransportRequest {
	/// Creates a request that accepts JSON.
	pub fn new(method: Method, url: Url, timeouts: Timeouts) -> Self {
		Self {
			method,
			url,
			headers: vec![("Accept".into(), "application/json".into())],
			body: None,
			timeouts,
		}
	}

	/// Attaches a form-encoded body and the matching content type.
	pub fn with_form_body(mut self, body: String) -> Self {
		self.headers
			.push(("Content-Type".into(), "application/x-www-form-urlencoded".into()));
		self.body = Some(body);

		self
	}

	/// Looks up a request header case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// reqwest-backed [`HttpTransport`].
///
/// The connect timeout is fixed when the underlying client is built; requests asking for a
/// different connect timeout get a dedicated client. Redirects are not followed.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
	client: ReqwestClient,
	connect_timeout: Duration,
}
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport whose client uses `connect_timeout`, which must be positive.
	pub fn new(connect_timeout: Duration) -> Result<Self, ConfigError> {
		if !connect_timeout.is_positive() {
			return Err(ConfigError::InvalidTimeout { field: "connect" });
		}

		Ok(Self { client: build_reqwest_client(connect_timeout)?, connect_timeout })
	}

	/// Wraps an existing reqwest client that was configured with `connect_timeout`.
	pub fn with_client(client: ReqwestClient, connect_timeout: Duration) -> Self {
		Self { client, connect_timeout }
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn send(&self, request: TransportRequest) -> TransportFuture<'_> {
		Box::pin(self.execute(request))
	}
}
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	async fn execute(&self, request: TransportRequest) -> Result<Vec<u8>, TransportError> {
		let client = if request.timeouts.connect() == self.connect_timeout {
			self.client.clone()
		} else {
			build_reqwest_client(request.timeouts.connect()).map_err(TransportError::network)?
		};
		let method = match request.method {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Delete => reqwest::Method::DELETE,
		};
		let mut builder = client
			.request(method, request.url)
			.timeout(to_std_duration(request.timeouts.total()));

		for (name, value) in &request.headers {
			builder = builder.header(name.as_str(), value.as_str());
		}
		if let Some(body) = request.body {
			builder = builder.body(body);
		}

		let response = builder.send().await?;
		let mut raw = format!("{:?} {}\r\n", response.version(), response.status()).into_bytes();

		for (name, value) in response.headers() {
			raw.extend_from_slice(name.as_str().as_bytes());
			raw.extend_from_slice(b": ");
			raw.extend_from_slice(value.as_bytes());
			raw.extend_from_slice(b"\r\n");
		}

		raw.extend_from_slice(b"\r\n");
		raw.extend_from_slice(&response.bytes().await?);

		Ok(raw)
	}
}

#[cfg(feature = "reqwest")]
fn build_reqwest_client(connect_timeout: Duration) -> Result<ReqwestClient, ConfigError> {
	ReqwestClient::builder()
		.connect_timeout(to_std_duration(connect_timeout))
		.redirect(reqwest::redirect::Policy::none())
		.build()
		.map_err(ConfigError::http_client_build)
}

#[cfg(feature = "reqwest")]
fn to_std_duration(duration: Duration) -> std::time::Duration {
	// Callers only pass positive durations.
	duration.unsigned_abs()
}
