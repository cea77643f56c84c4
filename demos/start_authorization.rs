//! Walks the login flow against a local mock of the Instagram endpoints: build the login URL,
//! check the `state` echoed on the redirect, trade the code for a token, then call an
//! authenticated endpoint with the stored token.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use instagram_client::{
	Client,
	auth::Session,
	config::{ClientConfig, Timeouts},
	http::ReqwestTransport,
	reqwest::Client as ReqwestClient,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/access_token")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-token\",\"user\":{\"id\":\"1\",\"username\":\"demo\"}}",
			);
		})
		.await;
	let likes_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/users/self/media/liked")
				.query_param("access_token", "demo-token");
			then.status(200)
				.header("content-type", "application/json")
				.header("x-ratelimit-remaining", "4999")
				.body("{\"meta\":{\"code\":200},\"data\":[{\"id\":\"42\"}]}");
		})
		.await;
	let config = ClientConfig::builder("demo-key", "demo-secret", "https://app.example.com/cb")
		.api_base(server.url("/v1"))
		.authorize_url(server.url("/oauth/authorize"))
		.token_url(server.url("/oauth/access_token"))
		.build()?;
	let transport = ReqwestTransport::with_client(
		ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
		Timeouts::DEFAULT_CONNECT,
	);
	let client = Client::with_transport(config, transport);
	let login = client.login_session(["basic", "likes"])?;

	println!("Send the user to {}.", login.login_url);

	// Simulate the redirect handler receiving `state` and `code` back.
	login.validate_state(&login.state)?;

	let session = Session::new();
	let token = client.exchange_code_into(&session, "demo-code").await?;

	token_mock.assert_async().await;

	println!(
		"Logged in as {}.",
		token.user.and_then(|user| user.username).unwrap_or_else(|| "an unnamed user".into())
	);

	let likes = client.user_likes(&session, 10).await?;

	likes_mock.assert_async().await;

	println!("Liked media: {}.", likes["data"]);
	println!("Calls left this hour: {:?}.", session.rate_limit());

	Ok(())
}
