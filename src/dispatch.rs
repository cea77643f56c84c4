//! Request dispatch: auth selection, URL and body building, signing, transport, and
//! response post-processing.

// crates.io
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::Session,
	client::Client,
	http::{self, HeaderBlock, HttpTransport, ResponseEnvelope, TransportRequest},
	obs::{self, Operation},
	request::{AuthMode, Method, RequestDescriptor},
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Sends one API request on behalf of `session`.
	///
	/// Fails with [`Error::MissingAccessToken`] before touching the transport when the request
	/// needs a bearer token the session lacks. After the transport answers, the
	/// `X-Ratelimit-Remaining` header is recorded on the session first, then the header block
	/// is parsed strictly and the body checked for emptiness, so a
	/// [`Error::MalformedHeader`] or [`Error::EmptyResponseBody`] failure still leaves the
	/// fresh rate limit behind. Error statuses are returned as ordinary envelopes.
	pub async fn execute(
		&self,
		session: &Session,
		request: &RequestDescriptor,
	) -> Result<ResponseEnvelope> {
		self.execute_as(Operation::Execute, session, request).await
	}

	/// Builds the transport request for `request` without sending it.
	///
	/// The endpoint is appended to the API base path segment by segment; `?` and `#` inside a
	/// segment are percent-encoded, and empty, `.` or `..` segments fail with
	/// [`Error::InvalidEndpoint`].
	/// `GET` parameters join the auth pair in the query string, `POST` parameters become a
	/// form body, and `DELETE` parameters are dropped. With signing enabled, a `sig`
	/// parameter computed over the auth pair and all parameters ends the query.
	pub fn prepare(
		&self,
		session: &Session,
		request: &RequestDescriptor,
	) -> Result<TransportRequest> {
		let auth = self.auth_mode(session, request)?;
		let auth_pair = auth.query_pair(&self.config);
		let mut url = endpoint_url(&self.config.endpoints.api_base, &request.endpoint)?;
		let mut query = form_urlencoded::Serializer::new(String::new());

		query.append_pair(auth_pair.0, auth_pair.1);

		if let (Method::Get, Some(params)) = (request.method, request.params.as_ref()) {
			for (key, value) in params.pairs() {
				query.append_pair(key, &value);
			}
		}
		if self.options.signed_requests {
			let signature = self.signer.sign(&request.endpoint, auth_pair, request.params.as_ref());

			query.append_pair("sig", &signature);
		}

		url.set_query(Some(&query.finish()));

		let transport_request = TransportRequest::new(request.method, url, self.options.timeouts);

		Ok(match request.method {
			Method::Post => transport_request
				.with_form_body(request.params.as_ref().map(|p| p.to_form()).unwrap_or_default()),
			Method::Get | Method::Delete => transport_request,
		})
	}

	pub(crate) async fn execute_as(
		&self,
		operation: Operation,
		session: &Session,
		request: &RequestDescriptor,
	) -> Result<ResponseEnvelope> {
		obs::observe(operation, &request.endpoint, self.dispatch(session, request)).await
	}

	async fn dispatch(
		&self,
		session: &Session,
		request: &RequestDescriptor,
	) -> Result<ResponseEnvelope> {
		let transport_request = self.prepare(session, request)?;
		let raw = self.transport.send(transport_request).await?;

		interpret(session, &raw)
	}

	fn auth_mode(&self, session: &Session, request: &RequestDescriptor) -> Result<AuthMode> {
		if !request.requires_auth {
			return Ok(AuthMode::ApiKey);
		}

		session
			.access_token()
			.map(AuthMode::Bearer)
			.ok_or_else(|| Error::MissingAccessToken { endpoint: request.endpoint.clone() })
	}
}

fn endpoint_url(api_base: &Url, endpoint: &str) -> Result<Url> {
	let invalid = || Error::InvalidEndpoint { endpoint: endpoint.to_owned() };

	if endpoint.split('/').any(|segment| matches!(segment, "" | "." | "..")) {
		return Err(invalid());
	}

	let mut url = api_base.clone();

	url.path_segments_mut().map_err(|_| invalid())?.pop_if_empty().extend(endpoint.split('/'));

	Ok(url)
}

fn interpret(session: &Session, raw: &[u8]) -> Result<ResponseEnvelope> {
	let (head, body) = http::split_raw(raw);
	let head = String::from_utf8_lossy(head);

	if let Some(remaining) = http::scan_rate_limit(&head) {
		session.rate_limit.observe_header(remaining);
	}

	let block = HeaderBlock::parse(&head)?;

	if body.iter().all(u8::is_ascii_whitespace) {
		let status_line = Some(block.status_line).filter(|line| !line.is_empty());

		return Err(Error::EmptyResponseBody { status_line });
	}

	Ok(ResponseEnvelope {
		status_line: block.status_line,
		headers: block.headers,
		body: body.to_vec(),
	})
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::*, config::Timeouts, request::Params};

	fn ok_json(body: &str) -> Vec<u8> {
		raw_response("HTTP/1.1 200 OK", &[("Content-Type", "application/json")], body)
	}

	#[tokio::test]
	async fn missing_token_fails_before_transport() {
		let spy = SpyTransport::default();
		let client = spy_client(&spy);
		let err = client
			.execute(&Session::new(), &RequestDescriptor::get("users/self/media/liked", true))
			.await
			.expect_err("Authenticated calls without a token must fail.");

		assert!(matches!(
			err,
			Error::MissingAccessToken { ref endpoint } if endpoint == "users/self/media/liked"
		));
		assert_eq!(spy.calls(), 0);
	}

	#[tokio::test]
	async fn rate_limit_and_body_are_surfaced() {
		let spy = SpyTransport::replying(
			"HTTP/1.1 200 OK\r\nX-Ratelimit-Remaining: 42\r\n\r\n{\"data\":[]}",
		);
		let client = spy_client(&spy);
		let session = Session::new();
		let envelope = client
			.execute(&session, &RequestDescriptor::get("media/popular", false))
			.await
			.expect("Dispatch should succeed.");
		let value = envelope.value().expect("Body should decode.");

		assert_eq!(session.rate_limit(), Some(42));
		assert_eq!(value["data"], serde_json::json!([]));
		assert_eq!(envelope.status_code(), Some(200));
	}

	#[tokio::test]
	async fn get_uses_api_key_and_query_params() {
		let spy = SpyTransport::replying(ok_json("{}"));
		let client = spy_client(&spy);
		let request = RequestDescriptor::get("tags/search", false)
			.with_params(Params::new().with("q", "snow day"));

		client.execute(&Session::new(), &request).await.expect("Dispatch should succeed.");

		let sent = spy.requests().pop().expect("One request should be recorded.");

		assert_eq!(sent.method, Method::Get);
		assert_eq!(
			sent.url.as_str(),
			"https://api.instagram.com/v1/tags/search?client_id=test-key&q=snow+day"
		);
		assert_eq!(sent.header("Accept"), Some("application/json"));
		assert_eq!(sent.body, None);
		assert_eq!(sent.timeouts, Timeouts::default());
	}

	#[tokio::test]
	async fn bearer_token_is_used_when_auth_required() {
		let spy = SpyTransport::replying(ok_json("{}"));
		let client = spy_client(&spy);
		let session = Session::with_access_token("tok.123");
		let request = RequestDescriptor::get("users/self/follows", true)
			.with_params(Params::new().with("count", 5_u32));

		client.execute(&session, &request).await.expect("Dispatch should succeed.");

		assert_eq!(
			spy.requests()[0].url.as_str(),
			"https://api.instagram.com/v1/users/self/follows?access_token=tok.123&count=5"
		);
	}

	#[tokio::test]
	async fn signed_requests_append_signature() {
		let spy = SpyTransport::replying(ok_json("{}"));
		let client = spy_client(&spy).with_signed_requests(true);
		let params = Params::new().with("count", 10_u32);
		let request = RequestDescriptor::get("media/1/likes", false).with_params(params.clone());

		client.execute(&Session::new(), &request).await.expect("Dispatch should succeed.");

		let expected =
			client.signer().sign("media/1/likes", ("client_id", TEST_API_KEY), Some(&params));
		let sent = spy.requests().pop().expect("One request should be recorded.");
		let pairs = sent.url.query_pairs().into_owned().collect::<Vec<_>>();

		assert_eq!(
			pairs,
			vec![
				("client_id".into(), TEST_API_KEY.into()),
				("count".into(), "10".into()),
				("sig".into(), expected),
			]
		);
	}

	#[tokio::test]
	async fn signed_post_signature_covers_form_params() {
		let spy = SpyTransport::replying(ok_json("{\"meta\":{\"code\":200}}"));
		let client = spy_client(&spy).with_signed_requests(true);
		let session = Session::with_access_token("tok");
		let params = Params::new().with("text", "great shot!");
		let request = RequestDescriptor::post("media/9/comments", true).with_params(params.clone());

		client.execute(&session, &request).await.expect("Signed POST should succeed.");

		let expected =
			client.signer().sign("media/9/comments", ("access_token", "tok"), Some(&params));
		let without_body = client.signer().sign("media/9/comments", ("access_token", "tok"), None);
		let sent = spy.requests().pop().expect("One request should be recorded.");
		let pairs = sent.url.query_pairs().into_owned().collect::<Vec<_>>();

		assert_ne!(expected, without_body);
		assert_eq!(pairs, vec![("access_token".into(), "tok".into()), ("sig".into(), expected)]);
		assert_eq!(sent.body.as_deref(), Some("text=great+shot%21"));
	}

	#[tokio::test]
	async fn post_sends_form_body_and_delete_drops_params() {
		let spy = SpyTransport::default();

		spy.push_raw(ok_json("{\"meta\":{\"code\":200}}"));
		spy.push_raw(ok_json("{\"meta\":{\"code\":200}}"));

		let client = spy_client(&spy);
		let session = Session::with_access_token("tok");
		let post = RequestDescriptor::post("media/9/comments", true)
			.with_params(Params::new().with("text", "great shot!"));
		let delete = RequestDescriptor::delete("media/9/comments/77", true)
			.with_params(Params::new().with("ignored", "yes"));

		client.execute(&session, &post).await.expect("POST should succeed.");
		client.execute(&session, &delete).await.expect("DELETE should succeed.");

		let sent = spy.requests();

		assert_eq!(sent[0].method, Method::Post);
		assert_eq!(sent[0].url.query(), Some("access_token=tok"));
		assert_eq!(sent[0].body.as_deref(), Some("text=great+shot%21"));
		assert_eq!(sent[0].header("Content-Type"), Some("application/x-www-form-urlencoded"));
		assert_eq!(sent[1].method, Method::Delete);
		assert_eq!(
			sent[1].url.as_str(),
			"https://api.instagram.com/v1/media/9/comments/77?access_token=tok"
		);
		assert_eq!(sent[1].body, None);
	}

	#[tokio::test]
	async fn empty_body_fails_after_recording_rate_limit() {
		let spy = SpyTransport::replying(raw_response(
			"HTTP/1.1 200 OK",
			&[("X-Ratelimit-Remaining", "10")],
			"",
		));
		let client = spy_client(&spy);
		let session = Session::new();
		let err = client
			.execute(&session, &RequestDescriptor::get("media/popular", false))
			.await
			.expect_err("Empty bodies must fail.");

		assert!(matches!(
			err,
			Error::EmptyResponseBody { status_line: Some(ref line) } if line == "HTTP/1.1 200 OK"
		));
		assert_eq!(session.rate_limit(), Some(10));
	}

	#[tokio::test]
	async fn malformed_header_fails_after_recording_rate_limit() {
		let spy = SpyTransport::replying(
			"HTTP/1.1 200 OK\r\nX-Ratelimit-Remaining: 3\r\nnot-a-header\r\n\r\n{}",
		);
		let client = spy_client(&spy);
		let session = Session::new();
		let err = client
			.execute(&session, &RequestDescriptor::get("media/popular", false))
			.await
			.expect_err("Malformed headers must fail.");

		assert!(matches!(err, Error::MalformedHeader { .. }));
		assert_eq!(session.rate_limit(), Some(3));
	}

	#[tokio::test]
	async fn missing_rate_limit_header_keeps_previous_value() {
		let spy = SpyTransport::replying(ok_json("{}"));
		let client = spy_client(&spy);
		let session = Session::new();

		session.rate_limit.observe(99);
		client
			.execute(&session, &RequestDescriptor::get("media/popular", false))
			.await
			.expect("Dispatch should succeed.");

		assert_eq!(session.rate_limit(), Some(99));
	}

	#[tokio::test]
	async fn traversal_endpoints_never_reach_the_transport() {
		let spy = SpyTransport::default();
		let client = spy_client(&spy);
		let session = Session::with_access_token("secret-tok");

		for endpoint in ["../../oauth/access_token", "tags/..", "media//likes", "./media/1", ""] {
			let err = client
				.execute(&session, &RequestDescriptor::get(endpoint, true))
				.await
				.expect_err("Dot and empty segments must fail.");

			assert!(
				matches!(err, Error::InvalidEndpoint { endpoint: ref rejected } if rejected == endpoint),
				"Unexpected error for `{endpoint}`: {err:?}."
			);
		}

		assert_eq!(spy.calls(), 0);
	}

	#[tokio::test]
	async fn query_and_fragment_characters_stay_in_the_path() {
		let spy = SpyTransport::replying(ok_json("{}"));
		let client = spy_client(&spy);

		client
			.execute(&Session::new(), &RequestDescriptor::get("media/a?b#c", false))
			.await
			.expect("Dispatch should succeed.");

		let sent = spy.requests().pop().expect("One request should be recorded.");

		assert_eq!(sent.url.host_str(), Some("api.instagram.com"));
		assert_eq!(sent.url.path(), "/v1/media/a%3Fb%23c");
		assert_eq!(sent.url.query(), Some("client_id=test-key"));
		assert_eq!(sent.url.fragment(), None);
	}

	#[tokio::test]
	async fn transport_failures_surface_as_errors() {
		let spy = SpyTransport::default();

		spy.push_failure("connection refused");

		let client = spy_client(&spy);
		let err = client
			.execute(&Session::new(), &RequestDescriptor::get("media/popular", false))
			.await
			.expect_err("Transport failures must propagate.");

		assert!(matches!(err, Error::Transport(_)));
		assert_eq!(spy.calls(), 1);
	}
}
