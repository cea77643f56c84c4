//! Cursor pagination: reading the `pagination` object of a list response and deriving the
//! request for the following page.

// crates.io
use percent_encoding::percent_decode_str;
// self
use crate::{
	_prelude::*,
	auth::Session,
	client::Client,
	http::{HttpTransport, ResponseEnvelope},
	obs::Operation,
	request::{ParamValue, Params, RequestDescriptor},
};

/// Pagination hints returned alongside a list response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationDescriptor {
	/// Absolute URL of the next page; `None` once the listing is exhausted.
	pub next_url: Option<String>,
	/// Max-id cursor used by media listings.
	pub next_max_id: Option<String>,
	/// Opaque cursor used by user listings.
	pub next_cursor: Option<String>,
}
impl PaginationDescriptor {
	/// Reads the `pagination` object of a decoded response body.
	///
	/// Fails with [`Error::PaginationUnsupported`] when the body carries no `pagination` field
	/// or the field is `null`. Numeric cursor values are rendered as strings.
	pub fn from_body(body: &serde_json::Value) -> Result<Self> {
		let pagination = body
			.get("pagination")
			.filter(|value| !value.is_null())
			.ok_or(Error::PaginationUnsupported { reason: "response has no pagination object" })?;
		let field = |name: &str| pagination.get(name).and_then(scalar_string);

		Ok(Self {
			next_url: field("next_url"),
			next_max_id: field("next_max_id"),
			next_cursor: field("next_cursor"),
		})
	}

	/// Returns true when another page exists.
	pub fn has_next(&self) -> bool {
		self.next_url.is_some()
	}
}

/// Derives the request for the page after `prior`.
///
/// Returns `Ok(None)` when there is no prior descriptor, no `next_url`, or a `next_url` without
/// a query string. The endpoint is `next_url`'s percent-decoded path with `api_base` stripped; a
/// URL outside the base fails with [`Error::PaginationUnsupported`]. The request authenticates
/// with the bearer token exactly when the next URL carries an `access_token`.
pub fn next_request(
	api_base: &str,
	prior: Option<&PaginationDescriptor>,
	limit: u32,
) -> Result<Option<RequestDescriptor>> {
	let Some(next_url) = prior.and_then(|p| p.next_url.as_deref()) else {
		return Ok(None);
	};
	let Some((path, query)) = next_url.split_once('?') else {
		return Ok(None);
	};
	let endpoint = path.strip_prefix(api_base).ok_or(Error::PaginationUnsupported {
		reason: "next page URL lies outside the API base",
	})?;
	let endpoint = percent_decode_str(endpoint).decode_utf8_lossy();
	let requires_auth = query.contains("access_token");
	let params = match prior {
		Some(PaginationDescriptor { next_max_id: Some(max_id), .. }) =>
			Params::new().with("max_id", max_id.as_str()),
		Some(PaginationDescriptor { next_cursor, .. }) =>
			Params::new().with("cursor", ParamValue::from(next_cursor.clone())),
		None => Params::new(),
	}
	.with("count", limit);

	Ok(Some(RequestDescriptor::get(endpoint.into_owned(), requires_auth).with_params(params)))
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Request for the page after `prior`, relative to this client's API base.
	pub fn next_page_request(
		&self,
		prior: Option<&PaginationDescriptor>,
		limit: u32,
	) -> Result<Option<RequestDescriptor>> {
		next_request(self.config.api_base(), prior, limit)
	}

	/// Fetches the page following the decoded list response `body`.
	///
	/// Returns `Ok(None)` once the listing is exhausted.
	pub async fn paginate(
		&self,
		session: &Session,
		body: &serde_json::Value,
		limit: u32,
	) -> Result<Option<ResponseEnvelope>> {
		let descriptor = PaginationDescriptor::from_body(body)?;
		let Some(request) = self.next_page_request(Some(&descriptor), limit)? else {
			return Ok(None);
		};

		self.execute_as(Operation::Paginate, session, &request).await.map(Some)
	}
}

fn scalar_string(value: &serde_json::Value) -> Option<String> {
	match value {
		serde_json::Value::String(s) => Some(s.clone()),
		serde_json::Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}
