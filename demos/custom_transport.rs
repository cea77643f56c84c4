//! Plugs a hand-written [`HttpTransport`] into the client.
//!
//! 1. Implement [`HttpTransport::send`] so it resolves to the raw response: status line, header
//!    lines, a blank line, then the body.
//! 2. Report failures as [`TransportError::network`] or [`TransportError::timeout`].
//! 3. Hand the transport to [`Client::with_transport`]; signing, auth selection and rate-limit
//!    tracking work the same as with the reqwest transport.

// std
use std::{
	collections::HashMap,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
};
// crates.io
use color_eyre::Result;
// self
use instagram_client::{
	Client,
	auth::Session,
	config::ClientConfig,
	error::TransportError,
	http::{HttpTransport, TransportFuture, TransportRequest},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::builder("demo-key", "demo-secret", "https://app.example.com/cb")
		.build()?;
	let transport = FixtureTransport::default()
		.serve("/v1/media/popular", "{\"meta\":{\"code\":200},\"data\":[{\"id\":\"7\"}]}")
		.serve("/v1/tags/snow", "{\"meta\":{\"code\":200},\"data\":{\"name\":\"snow\"}}");
	let client = Client::with_transport(config, transport).with_signed_requests(true);
	let session = Session::new();
	let popular = client.popular_media(&session).await?;

	println!("Popular media: {}.", popular["data"]);
	println!("Calls left after the first request: {:?}.", session.rate_limit());

	let tag = client.tag(&session, "snow").await?;

	println!("Tag: {}.", tag["data"]["name"]);

	match client.location(&session, "1").await {
		Ok(body) => println!("Fixture unexpectedly answered: {body}."),
		Err(e) => println!("Transport failure surfaced by the client: {e}."),
	}

	Ok(())
}

/// Serves canned JSON bodies by request path.
#[derive(Default)]
struct FixtureTransport {
	routes: HashMap<String, &'static str>,
}
impl FixtureTransport {
	fn serve(mut self, path: &str, body: &'static str) -> Self {
		self.routes.insert(path.to_owned(), body);

		self
	}
}
impl HttpTransport for FixtureTransport {
	fn send(&self, request: TransportRequest) -> TransportFuture<'_> {
		let body = self.routes.get(request.url.path()).copied();
		let path = request.url.path().to_owned();

		Box::pin(async move {
			let body = body.ok_or_else(|| TransportError::network(NoRoute(path)))?;
			let remaining = 5_000 - body.len();

			Ok(format!(
				"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nX-Ratelimit-Remaining: {remaining}\r\n\r\n{body}"
			)
			.into_bytes())
		})
	}
}

#[derive(Debug)]
struct NoRoute(String);
impl Display for NoRoute {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "no fixture for {}", self.0)
	}
}
impl StdError for NoRoute {}
