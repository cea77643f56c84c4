//! OAuth 2.0 authorization-code login: login URLs and the code-for-token exchange.
//!
//! The exchange is independent of the request dispatcher: it posts to the token endpoint
//! with the application's own credentials and never touches a session's rate-limit state.
//! Whether the returned token is stored is left to the caller
//! ([`Client::exchange_code_into`] does both in one step).

// crates.io
use oauth2::AuthorizationCode;
use rand::{Rng, distr::Alphanumeric};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::{ScopeList, Session, TokenResponse},
	client::Client,
	config::ClientConfig,
	http::{self, HeaderBlock, HttpTransport, TransportRequest},
	obs::{self, Operation},
	request::Method,
};

const STATE_LEN: usize = 32;

/// Login URL plus the CSRF `state` that must come back on the redirect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginSession {
	/// Scopes requested by the URL.
	pub scopes: ScopeList,
	/// Opaque value the redirect handler must echo back.
	pub state: String,
	/// Authorization URL to send the end-user to.
	pub login_url: Url,
}
impl LoginSession {
	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state {
			Ok(())
		} else {
			Err(Error::OAuthExchangeFailed { reason: "authorization state mismatch".into() })
		}
	}
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Builds the authorization URL for `scopes`.
	///
	/// Fails with [`Error::InvalidScope`] when any scope is outside the accepted set. An empty
	/// scope list requests `basic`.
	pub fn login_url<I, S>(&self, scopes: I) -> Result<Url>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let scopes = ScopeList::parse(scopes)?;

		Ok(build_login_url(&self.config, &scopes, None))
	}

	/// Builds the authorization URL with a freshly generated `state` value.
	pub fn login_session<I, S>(&self, scopes: I) -> Result<LoginSession>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let scopes = ScopeList::parse(scopes)?;
		let state = random_state();
		let login_url = build_login_url(&self.config, &scopes, Some(&state));

		Ok(LoginSession { scopes, state, login_url })
	}

	/// Exchanges an authorization code for an access token.
	///
	/// Transport failures, malformed header blocks, empty bodies, and error statuses fail with
	/// [`Error::OAuthExchangeFailed`]; a body without `access_token` fails with
	/// [`Error::Decode`].
	pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
		let code = AuthorizationCode::new(code.into());

		obs::observe(
			Operation::TokenExchange,
			self.config.endpoints.token.path(),
			self.request_token(code),
		)
		.await
	}

	/// Exchanges `code` and stores the resulting token on `session`.
	pub async fn exchange_code_into(&self, session: &Session, code: &str) -> Result<TokenResponse> {
		let response = self.exchange_code(code).await?;

		session.set_access_token(response.access_token.clone());

		Ok(response)
	}

	async fn request_token(&self, code: AuthorizationCode) -> Result<TokenResponse> {
		let form = form_urlencoded::Serializer::new(String::new())
			.append_pair("grant_type", "authorization_code")
			.append_pair("client_id", self.config.api_key.as_str())
			.append_pair("client_secret", self.config.api_secret.secret())
			.append_pair("redirect_uri", self.config.callback.as_str())
			.append_pair("code", code.secret())
			.finish();
		let request =
			TransportRequest::new(Method::Post, self.config.endpoints.token.clone(), self.options.timeouts)
				.with_form_body(form);
		let raw = self
			.transport
			.send(request)
			.await
			.map_err(|e| Error::OAuthExchangeFailed { reason: e.detail() })?;
		let (head, body) = http::split_raw(&raw);
		let block = HeaderBlock::parse(&String::from_utf8_lossy(head))
			.map_err(|e| Error::OAuthExchangeFailed { reason: e.to_string() })?;

		if body.iter().all(u8::is_ascii_whitespace) {
			return Err(Error::OAuthExchangeFailed {
				reason: format!("token endpoint returned an empty body ({})", block.status_line),
			});
		}

		let status = block.status_code();

		if status.is_some_and(|code| code >= 400) {
			let reason = provider_error(body).unwrap_or(block.status_line);

			return Err(Error::OAuthExchangeFailed { reason });
		}

		http::decode_json(body, status)
	}
}

fn build_login_url(config: &ClientConfig, scopes: &ScopeList, state: Option<&str>) -> Url {
	let mut url = config.endpoints.authorize.clone();
	let encode = |value: &str| form_urlencoded::byte_serialize(value.as_bytes()).collect::<String>();
	let mut query = format!(
		"client_id={}&redirect_uri={}&scope={}&response_type=code",
		encode(config.api_key.as_str()),
		encode(config.callback.as_str()),
		scopes.joined(),
	);

	if let Some(state) = state {
		query.push_str("&state=");
		query.push_str(&encode(state));
	}

	url.set_query(Some(&query));

	url
}

/// Extracts the provider's message from an OAuth error body.
fn provider_error(body: &[u8]) -> Option<String> {
	let value = serde_json::from_slice::<serde_json::Value>(body).ok()?;
	let meta = value.get("meta").unwrap_or(&value);

	["error_message", "error_description", "error"]
		.into_iter()
		.find_map(|key| meta.get(key).and_then(|v| v.as_str()))
		.map(str::to_owned)
}

fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	const TOKEN_BODY: &str = "{\"access_token\":\"fb2e77d.47a0479900504cb3ab4a1f626d174d2d\",\"user\":{\"id\":\"1574083\",\"username\":\"snoopdogg\"}}";

	#[test]
	fn login_url_lists_scopes_and_encodes_redirect() {
		let client = spy_client(&SpyTransport::default());
		let url = client.login_url(["basic", "likes"]).expect("Known scopes should build a URL.");

		assert_eq!(
			url.as_str(),
			"https://api.instagram.com/oauth/authorize?client_id=test-key\
			 &redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback&scope=basic,likes&response_type=code"
		);
	}

	#[test]
	fn login_url_rejects_unknown_scope() {
		let client = spy_client(&SpyTransport::default());
		let err = client.login_url(["bogus"]).expect_err("Unknown scopes must fail.");

		assert!(matches!(err, Error::InvalidScope { ref scope } if scope == "bogus"));
	}

	#[test]
	fn login_session_carries_state() {
		let client = spy_client(&SpyTransport::default());
		let session = client.login_session(["basic"]).expect("Login session should build.");
		let pairs = session.login_url.query_pairs().into_owned().collect::<BTreeMap<_, _>>();

		assert_eq!(session.state.len(), STATE_LEN);
		assert_eq!(pairs.get("state"), Some(&session.state));
		assert_eq!(pairs.get("response_type").map(String::as_str), Some("code"));
		assert!(session.validate_state(&session.state).is_ok());
		assert!(matches!(
			session.validate_state("forged"),
			Err(Error::OAuthExchangeFailed { .. })
		));
	}

	#[tokio::test]
	async fn exchange_posts_credentials_and_decodes_token() {
		let spy = SpyTransport::replying(raw_response(
			"HTTP/1.1 200 OK",
			&[("Content-Type", "application/json")],
			TOKEN_BODY,
		));
		let client = spy_client(&spy);
		let response = client.exchange_code("abc").await.expect("Exchange should succeed.");
		let sent = spy.requests().pop().expect("One request should be recorded.");
		let form = form_urlencoded::parse(sent.body.as_deref().unwrap_or_default().as_bytes())
			.into_owned()
			.collect::<BTreeMap<_, _>>();

		assert_eq!(response.access_token.expose(), "fb2e77d.47a0479900504cb3ab4a1f626d174d2d");
		assert_eq!(response.user.and_then(|u| u.username).as_deref(), Some("snoopdogg"));
		assert_eq!(sent.method, Method::Post);
		assert_eq!(sent.url.as_str(), "https://api.instagram.com/oauth/access_token");
		assert_eq!(form.get("grant_type").map(String::as_str), Some("authorization_code"));
		assert_eq!(form.get("client_id").map(String::as_str), Some(TEST_API_KEY));
		assert_eq!(form.get("client_secret").map(String::as_str), Some(TEST_API_SECRET));
		assert_eq!(form.get("redirect_uri").map(String::as_str), Some(TEST_CALLBACK));
		assert_eq!(form.get("code").map(String::as_str), Some("abc"));
	}

	#[tokio::test]
	async fn empty_body_fails_the_exchange() {
		let spy = SpyTransport::replying(raw_response("HTTP/1.1 200 OK", &[], ""));
		let client = spy_client(&spy);
		let err = client.exchange_code("abc").await.expect_err("Empty bodies must fail.");

		assert!(matches!(err, Error::OAuthExchangeFailed { .. }));
	}

	#[tokio::test]
	async fn malformed_token_response_header_fails_the_exchange() {
		let spy = SpyTransport::replying("HTTP/1.1 200 OK\r\nbroken\r\n\r\n{}");
		let client = spy_client(&spy);
		let err = client.exchange_code("abc").await.expect_err("Malformed headers must fail.");

		match err {
			Error::OAuthExchangeFailed { reason } =>
				assert!(reason.contains("broken"), "Unexpected reason: {reason}."),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[tokio::test]
	async fn transport_failure_text_is_carried() {
		let spy = SpyTransport::default();

		spy.push_failure("Could not resolve host: api.instagram.com");

		let client = spy_client(&spy);
		let err = client.exchange_code("abc").await.expect_err("Transport failures must fail.");

		match err {
			Error::OAuthExchangeFailed { reason } =>
				assert!(reason.contains("Could not resolve host"), "Unexpected reason: {reason}."),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[tokio::test]
	async fn provider_error_message_is_carried() {
		let spy = SpyTransport::replying(raw_response(
			"HTTP/1.1 400 BAD REQUEST",
			&[],
			"{\"error_type\":\"OAuthException\",\"code\":400,\"error_message\":\"No matching code found.\"}",
		));
		let client = spy_client(&spy);
		let err = client.exchange_code("stale").await.expect_err("Error statuses must fail.");

		assert!(matches!(
			err,
			Error::OAuthExchangeFailed { ref reason } if reason == "No matching code found."
		));
	}

	#[tokio::test]
	async fn exchange_into_stores_token() {
		let spy = SpyTransport::replying(raw_response("HTTP/1.1 200 OK", &[], TOKEN_BODY));
		let client = spy_client(&spy);
		let session = Session::new();

		client.exchange_code_into(&session, "abc").await.expect("Exchange should succeed.");

		assert_eq!(
			session.access_token().map(|t| t.expose().to_owned()).as_deref(),
			Some("fb2e77d.47a0479900504cb3ab4a1f626d174d2d")
		);
		assert_eq!(session.rate_limit(), None);
	}

	#[tokio::test]
	async fn body_without_token_is_a_decode_error() {
		let spy = SpyTransport::replying(raw_response("HTTP/1.1 200 OK", &[], "{\"user\":{}}"));
		let client = spy_client(&spy);
		let err = client.exchange_code("abc").await.expect_err("Tokenless bodies must fail.");

		assert!(matches!(err, Error::Decode { status: Some(200), .. }));
	}
}
