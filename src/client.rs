//! The API client: configuration, options, and the transport it drives.

// self
use crate::{
	_prelude::*,
	config::{ClientConfig, ClientOptions},
	http::HttpTransport,
	sign::RequestSigner,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = Client<ReqwestTransport>;

/// Issues API calls and token exchanges for one registered application.
///
/// The client holds only immutable state (configuration, options, transport). Per-user
/// mutable state lives in a [`Session`](crate::auth::Session) that callers pass by reference,
/// so one client can serve many users.
pub struct Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Application credentials and endpoint URLs.
	pub config: ClientConfig,
	/// Signing and timeout options.
	pub options: ClientOptions,
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	pub(crate) signer: RequestSigner,
}
impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(config: ClientConfig, transport: impl Into<Arc<T>>) -> Self {
		let signer = RequestSigner::new(config.api_secret.clone());

		Self { config, options: ClientOptions::default(), transport: transport.into(), signer }
	}

	/// Replaces the request options.
	pub fn with_options(mut self, options: ClientOptions) -> Self {
		self.options = options;

		self
	}

	/// Enables or disables request signing.
	pub fn with_signed_requests(mut self, enabled: bool) -> Self {
		self.options.signed_requests = enabled;

		self
	}

	/// Signer keyed by the configured API secret.
	pub fn signer(&self) -> &RequestSigner {
		&self.signer
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
	/// Creates a client backed by a reqwest transport using the default options.
	pub fn new(config: ClientConfig) -> Result<Self> {
		Self::with_reqwest_options(config, ClientOptions::default())
	}

	/// Creates a client backed by a reqwest transport built for `options`.
	pub fn with_reqwest_options(config: ClientConfig, options: ClientOptions) -> Result<Self> {
		let transport = ReqwestTransport::new(options.timeouts.connect())?;

		Ok(Self::with_transport(config, transport).with_options(options))
	}
}
impl<T> Clone for Client<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			options: self.options,
			transport: Arc::clone(&self.transport),
			signer: self.signer.clone(),
		}
	}
}
impl<T> Debug for Client<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("api_key", &self.config.api_key)
			.field("endpoints", &self.config.endpoints)
			.field("options", &self.options)
			.finish()
	}
}
