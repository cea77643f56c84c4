//! Access tokens and the token endpoint's response shape.

// self
use crate::_prelude::*;

/// Redacted access token wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);
impl AccessToken {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for AccessToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessToken").field(&"<redacted>").finish()
	}
}
impl Display for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
impl From<&str> for AccessToken {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for AccessToken {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

/// Successful token endpoint payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Bearer token for authenticated endpoints.
	pub access_token: AccessToken,
	/// Profile of the user who granted access, when the endpoint includes it.
	#[serde(default)]
	pub user: Option<TokenUser>,
}
impl From<TokenResponse> for AccessToken {
	fn from(response: TokenResponse) -> Self {
		response.access_token
	}
}

/// User profile returned alongside an access token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenUser {
	/// Numeric user identifier, as a string.
	pub id: Option<String>,
	/// Handle.
	pub username: Option<String>,
	/// Display name.
	pub full_name: Option<String>,
	/// Avatar URL.
	pub profile_picture: Option<String>,
	/// Profile biography.
	pub bio: Option<String>,
	/// Profile website.
	pub website: Option<String>,
}
