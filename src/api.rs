//! Endpoint operations.
//!
//! Each operation assembles a [`RequestDescriptor`] and dispatches it like
//! [`Client::execute`], labeled with its own method name in spans and metrics. Bodies decode
//! into [`serde_json::Value`]; statuses of 400 and above become [`Error::Api`] carrying the
//! `meta` object the API reports.

pub mod locations;
pub mod media;
pub mod relationship;
pub mod tags;
pub mod users;

pub use relationship::RelationshipAction;

// self
use crate::{
	_prelude::*,
	auth::Session,
	client::Client,
	http::{HttpTransport, ResponseEnvelope},
	obs::Operation,
	request::{Params, RequestDescriptor},
};

/// Search radius in metres used when callers have no preference.
pub const DEFAULT_DISTANCE: u32 = 1_000;

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Runs `request` under the endpoint label `operation` and decodes the reply.
	pub(crate) async fn call(
		&self,
		operation: &'static str,
		session: &Session,
		request: RequestDescriptor,
	) -> Result<serde_json::Value> {
		let envelope = self.execute_as(Operation::Endpoint(operation), session, &request).await?;

		into_value(&envelope)
	}
}

/// Decodes an envelope, turning error statuses into [`Error::Api`].
pub fn into_value(envelope: &ResponseEnvelope) -> Result<serde_json::Value> {
	match envelope.status_code() {
		Some(status) if status >= 400 => Err(api_error(status, &envelope.body)),
		_ => envelope.value(),
	}
}

fn api_error(status: u16, body: &[u8]) -> Error {
	let value = serde_json::from_slice::<serde_json::Value>(body).unwrap_or_default();
	let meta = value.get("meta").unwrap_or(&value);
	let field = |name: &str| meta.get(name).and_then(|v| v.as_str()).map(str::to_owned);

	Error::Api { status, error_type: field("error_type"), message: field("error_message") }
}

/// Adds the `count` parameter for list endpoints; a zero limit leaves the server default.
pub(crate) fn with_count(request: RequestDescriptor, limit: u32) -> RequestDescriptor {
	if limit > 0 { request.with_params(Params::new().with("count", limit)) } else { request }
}
