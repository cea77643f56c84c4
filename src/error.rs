//! Client-level error types shared across dispatch, login, and pagination.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Validation variants ([`Error::InvalidScope`], [`Error::InvalidRelationshipAction`],
/// [`Error::MissingAccessToken`], [`Error::InvalidEndpoint`]) are raised before any transport
/// call. Every other variant is
/// raised after a request was attempted, so the session's rate-limit state may already reflect
/// the failed exchange.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Requested OAuth scope is not one the API accepts.
	#[error("Scope `{scope}` is not supported.")]
	InvalidScope {
		/// The offending scope string.
		scope: String,
	},
	/// Requested relationship action is not one the API accepts.
	#[error("Relationship action `{action}` is not supported.")]
	InvalidRelationshipAction {
		/// The offending action string.
		action: String,
	},
	/// Endpoint requires a bearer token but the session holds none.
	#[error("Endpoint `{endpoint}` requires an access token but none is set.")]
	MissingAccessToken {
		/// Endpoint the caller tried to reach.
		endpoint: String,
	},
	/// Endpoint path has an empty, `.` or `..` segment and cannot be appended to the API base.
	#[error("Endpoint `{endpoint}` is not a plain relative path.")]
	InvalidEndpoint {
		/// The rejected endpoint path.
		endpoint: String,
	},
	/// A response header line could not be split into a name and a value.
	#[error("Response header line is malformed: {line:?}.")]
	MalformedHeader {
		/// The offending header line.
		line: String,
	},
	/// The response carried no body.
	#[error("Response body is empty (status line: {status_line:?}).")]
	EmptyResponseBody {
		/// Status line of the empty response, when one was received.
		status_line: Option<String>,
	},
	/// The authorization code could not be exchanged for a token.
	#[error("OAuth token exchange failed: {reason}.")]
	OAuthExchangeFailed {
		/// Transport or provider supplied reason.
		reason: String,
	},
	/// The response cannot be paginated.
	#[error("Pagination is not supported: {reason}.")]
	PaginationUnsupported {
		/// Why no next page can be derived.
		reason: &'static str,
	},
	/// Response body could not be decoded as the expected JSON shape.
	#[error("Response body is not valid JSON for the expected shape.")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// The API answered with an error status.
	#[error("API returned HTTP {status}: {}.", message.as_deref().unwrap_or("no message"))]
	Api {
		/// HTTP status code.
		status: u16,
		/// `meta.error_type` reported by the API.
		error_type: Option<String>,
		/// `meta.error_message` reported by the API.
		message: Option<String>,
	},
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A mandatory configuration field is empty.
	#[error("Client configuration is missing `{field}`.")]
	MissingField {
		/// Name of the empty field.
		field: &'static str,
	},
	/// A configured URL cannot be parsed.
	#[error("Client configuration has an invalid `{field}` URL.")]
	InvalidUrl {
		/// Name of the offending field.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A timeout is zero or negative.
	#[error("Timeout `{field}` must be positive.")]
	InvalidTimeout {
		/// Name of the offending timeout.
		field: &'static str,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The connect or total timeout elapsed.
	#[error("Request to the API timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}

	/// Human-readable description including the transport's own error text.
	pub fn detail(&self) -> String {
		match self {
			Self::Network { source } | Self::Timeout { source } => format!("{self} {source}"),
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Debug, ThisError)]
	#[error("connection reset by peer")]
	struct Reset;

	#[test]
	fn transport_detail_carries_source_text() {
		let err = TransportError::network(Reset);

		assert_eq!(
			err.detail(),
			"Network error occurred while calling the API. connection reset by peer"
		);
	}

	#[test]
	fn api_error_message_falls_back_when_absent() {
		let err = Error::Api { status: 500, error_type: None, message: None };

		assert_eq!(err.to_string(), "API returned HTTP 500: no message.");
	}
}
