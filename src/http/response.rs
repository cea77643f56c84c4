//! Raw response splitting and the decoded-on-demand response envelope.

// std
use std::borrow::Cow;
// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	http::header::{self, HeaderMap},
};

/// Splits a raw response at the first blank line into `(header block, body)`.
///
/// A response without a blank line is treated as headers only.
pub fn split_raw(raw: &[u8]) -> (&[u8], &[u8]) {
	match raw.windows(4).position(|window| window == b"\r\n\r\n") {
		Some(idx) => (&raw[..idx], &raw[idx + 4..]),
		None => (raw, &[]),
	}
}

/// Status, headers, and undecoded body of one API response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseEnvelope {
	/// First line of the response, e.g. `HTTP/1.1 200 OK`.
	pub status_line: String,
	/// Response headers.
	pub headers: HeaderMap,
	/// Raw body bytes; never empty for envelopes produced by the dispatcher.
	pub body: Vec<u8>,
}
impl ResponseEnvelope {
	/// Numeric status code from the status line.
	pub fn status_code(&self) -> Option<u16> {
		header::parse_status_code(&self.status_line)
	}

	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		self.status_code().is_some_and(|code| (200..300).contains(&code))
	}

	/// Looks up a header case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		header::find_header(&self.headers, name)
	}

	/// Body as text, replacing invalid UTF-8.
	pub fn text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}

	/// Decodes the body into `T`, reporting the JSON path of any mismatch.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		decode_json(&self.body, self.status_code())
	}

	/// Decodes the body into a generic JSON value.
	pub fn value(&self) -> Result<serde_json::Value> {
		self.json()
	}
}

pub(crate) fn decode_json<T>(body: &[u8], status: Option<u16>) -> Result<T>
where
	T: DeserializeOwned,
{
	let deserializer = &mut serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(deserializer).map_err(|source| Error::Decode { source, status })
}
