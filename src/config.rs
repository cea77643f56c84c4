//! Client configuration: API credentials, callback, endpoint URLs, and transport options.

// crates.io
use oauth2::{ClientId, ClientSecret, RedirectUrl};
// self
use crate::{_prelude::*, error::ConfigError};

/// Base URL every endpoint path is joined onto.
pub const DEFAULT_API_BASE: &str = "https://api.instagram.com/v1/";
/// Browser-facing OAuth authorization endpoint.
pub const DEFAULT_AUTHORIZE_URL: &str = "https://api.instagram.com/oauth/authorize";
/// Token endpoint used for the code-for-token exchange.
pub const DEFAULT_TOKEN_URL: &str = "https://api.instagram.com/oauth/access_token";

/// Fixed URLs the client talks to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiEndpoints {
	/// REST base; always ends with `/`.
	pub api_base: Url,
	/// OAuth authorization endpoint.
	pub authorize: Url,
	/// OAuth token endpoint.
	pub token: Url,
}

/// Immutable client configuration consumed by URL building, signing, and login.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// API key, sent as `client_id`.
	pub api_key: ClientId,
	/// API secret, used for token exchange and request signatures.
	pub api_secret: ClientSecret,
	/// Redirect URI registered for the application.
	pub callback: RedirectUrl,
	/// Endpoint URLs.
	pub endpoints: ApiEndpoints,
}
impl ClientConfig {
	/// Creates a builder seeded with the three mandatory values.
	pub fn builder(
		api_key: impl Into<String>,
		api_secret: impl Into<String>,
		callback: impl Into<String>,
	) -> ClientConfigBuilder {
		ClientConfigBuilder::new(api_key, api_secret, callback)
	}

	/// The API base as a string, always ending with `/`.
	pub fn api_base(&self) -> &str {
		self.endpoints.api_base.as_str()
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// API key.
	pub api_key: String,
	/// API secret.
	pub api_secret: String,
	/// Redirect URI.
	pub callback: String,
	/// Optional override of [`DEFAULT_API_BASE`].
	pub api_base: Option<String>,
	/// Optional override of [`DEFAULT_AUTHORIZE_URL`].
	pub authorize_url: Option<String>,
	/// Optional override of [`DEFAULT_TOKEN_URL`].
	pub token_url: Option<String>,
}
impl ClientConfigBuilder {
	/// Creates a new builder with the default Instagram endpoints.
	pub fn new(
		api_key: impl Into<String>,
		api_secret: impl Into<String>,
		callback: impl Into<String>,
	) -> Self {
		Self {
			api_key: api_key.into(),
			api_secret: api_secret.into(),
			callback: callback.into(),
			api_base: None,
			authorize_url: None,
			token_url: None,
		}
	}

	/// Overrides the REST base URL.
	pub fn api_base(mut self, url: impl Into<String>) -> Self {
		self.api_base = Some(url.into());

		self
	}

	/// Overrides the OAuth authorization endpoint.
	pub fn authorize_url(mut self, url: impl Into<String>) -> Self {
		self.authorize_url = Some(url.into());

		self
	}

	/// Overrides the OAuth token endpoint.
	pub fn token_url(mut self, url: impl Into<String>) -> Self {
		self.token_url = Some(url.into());

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let api_key = require("api_key", self.api_key)?;
		let api_secret = require("api_secret", self.api_secret)?;
		let callback = require("callback", self.callback)?;
		let callback = RedirectUrl::new(callback)
			.map_err(|source| ConfigError::InvalidUrl { field: "callback", source })?;
		let mut api_base =
			parse_url("api_base", self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE))?;

		if !api_base.path().ends_with('/') {
			let path = format!("{}/", api_base.path());

			api_base.set_path(&path);
		}

		let authorize = parse_url(
			"authorize_url",
			self.authorize_url.as_deref().unwrap_or(DEFAULT_AUTHORIZE_URL),
		)?;
		let token = parse_url("token_url", self.token_url.as_deref().unwrap_or(DEFAULT_TOKEN_URL))?;

		Ok(ClientConfig {
			api_key: ClientId::new(api_key),
			api_secret: ClientSecret::new(api_secret),
			callback,
			endpoints: ApiEndpoints { api_base, authorize, token },
		})
	}
}

/// Connect and total timeouts handed to the transport with every request.
///
/// Both values are strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
	connect: Duration,
	total: Duration,
}
impl Timeouts {
	/// Default connect timeout.
	pub const DEFAULT_CONNECT: Duration = Duration::seconds(20);
	/// Default total timeout.
	pub const DEFAULT_TOTAL: Duration = Duration::seconds(90);

	/// Creates a timeout pair, rejecting zero or negative durations.
	pub fn new(connect: Duration, total: Duration) -> Result<Self, ConfigError> {
		let connect = positive("connect", connect)?;
		let total = positive("total", total)?;

		Ok(Self { connect, total })
	}

	/// Maximum time to establish a connection.
	pub fn connect(&self) -> Duration {
		self.connect
	}

	/// Maximum time for the whole exchange.
	pub fn total(&self) -> Duration {
		self.total
	}
}
impl Default for Timeouts {
	fn default() -> Self {
		Self { connect: Self::DEFAULT_CONNECT, total: Self::DEFAULT_TOTAL }
	}
}

/// Per-client request options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClientOptions {
	/// Appends an HMAC `sig` parameter to every API request when true.
	pub signed_requests: bool,
	/// Timeouts forwarded to the transport.
	pub timeouts: Timeouts,
}
impl ClientOptions {
	/// Enables or disables request signing.
	pub fn with_signed_requests(mut self, enabled: bool) -> Self {
		self.signed_requests = enabled;

		self
	}

	/// Overrides the transport timeouts.
	pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
		self.timeouts = timeouts;

		self
	}
}

fn require(field: &'static str, value: String) -> Result<String, ConfigError> {
	if value.trim().is_empty() { Err(ConfigError::MissingField { field }) } else { Ok(value) }
}

fn positive(field: &'static str, value: Duration) -> Result<Duration, ConfigError> {
	if value.is_positive() { Ok(value) } else { Err(ConfigError::InvalidTimeout { field }) }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
	Url::parse(value).map_err(|source| ConfigError::InvalidUrl { field, source })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_applies_instagram_defaults() {
		let config = ClientConfig::builder("key", "secret", "https://app.example.com/cb")
			.build()
			.expect("Default configuration should build.");

		assert_eq!(config.api_base(), DEFAULT_API_BASE);
		assert_eq!(config.endpoints.authorize.as_str(), DEFAULT_AUTHORIZE_URL);
		assert_eq!(config.endpoints.token.as_str(), DEFAULT_TOKEN_URL);
		assert_eq!(config.api_key.as_str(), "key");
		assert_eq!(config.api_secret.secret(), "secret");
		assert!(!format!("{config:?}").contains("secret\""));
	}

	#[test]
	fn builder_rejects_empty_fields() {
		let err = ClientConfig::builder("key", "  ", "https://app.example.com/cb")
			.build()
			.expect_err("Blank secrets should be rejected.");

		assert!(matches!(err, ConfigError::MissingField { field: "api_secret" }));

		let err = ClientConfig::builder("", "secret", "https://app.example.com/cb")
			.build()
			.expect_err("Blank keys should be rejected.");

		assert!(matches!(err, ConfigError::MissingField { field: "api_key" }));
	}

	#[test]
	fn builder_rejects_unparseable_callback() {
		let err = ClientConfig::builder("key", "secret", "not a url")
			.build()
			.expect_err("Callback must be an absolute URL.");

		assert!(matches!(err, ConfigError::InvalidUrl { field: "callback", .. }));
	}

	#[test]
	fn api_base_gains_trailing_slash() {
		let config = ClientConfig::builder("key", "secret", "https://app.example.com/cb")
			.api_base("http://127.0.0.1:8080/v1")
			.build()
			.expect("Overridden base should build.");

		assert_eq!(config.api_base(), "http://127.0.0.1:8080/v1/");
	}

	#[test]
	fn timeouts_default_to_twenty_and_ninety_seconds() {
		let options = ClientOptions::default();

		assert!(!options.signed_requests);
		assert_eq!(options.timeouts.connect(), Duration::seconds(20));
		assert_eq!(options.timeouts.total(), Duration::seconds(90));
	}

	#[test]
	fn timeouts_must_be_positive() {
		let err = Timeouts::new(Duration::seconds(-1), Duration::seconds(90))
			.expect_err("Negative connect timeouts should be rejected.");

		assert!(matches!(err, ConfigError::InvalidTimeout { field: "connect" }));

		let err = Timeouts::new(Duration::seconds(5), Duration::ZERO)
			.expect_err("Zero total timeouts should be rejected.");

		assert!(matches!(err, ConfigError::InvalidTimeout { field: "total" }));

		let timeouts = Timeouts::new(Duration::milliseconds(1500), Duration::seconds(7))
			.expect("Positive timeouts should be accepted.");

		assert_eq!(timeouts.connect(), Duration::milliseconds(1500));
		assert_eq!(timeouts.total(), Duration::seconds(7));
	}
}
