//! Request descriptors, typed parameter maps, and auth-mode selection.

// crates.io
use url::form_urlencoded;
// self
use crate::{_prelude::*, auth::AccessToken, config::ClientConfig};

/// HTTP methods the API accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// Parameters travel in the query string.
	Get,
	/// Parameters travel in a form-encoded body.
	Post,
	/// Parameters are dropped; the target is the endpoint path itself.
	Delete,
}
impl Method {
	/// Returns the HTTP verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Scalar parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
	/// Text value.
	Str(String),
	/// Integer value.
	Int(i64),
	/// Floating-point value (coordinates).
	Float(f64),
	/// Explicitly absent value; skipped on serialization.
	Absent,
}
impl ParamValue {
	/// Renders the wire representation, or `None` for [`ParamValue::Absent`].
	pub fn render(&self) -> Option<String> {
		match self {
			Self::Str(value) => Some(value.clone()),
			Self::Int(value) => Some(value.to_string()),
			Self::Float(value) => Some(value.to_string()),
			Self::Absent => None,
		}
	}
}
impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}
impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}
impl From<i64> for ParamValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}
impl From<u32> for ParamValue {
	fn from(value: u32) -> Self {
		Self::Int(value.into())
	}
}
impl From<f64> for ParamValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}
impl<T> From<Option<T>> for ParamValue
where
	T: Into<ParamValue>,
{
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Absent, Into::into)
	}
}

/// Parameter map ordered by key.
///
/// [`Params::pairs`] is the single serialization used for signing, query strings, and form
/// bodies, so every consumer observes the same order and the same absent-value handling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params(BTreeMap<String, ParamValue>);
impl Params {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a value and returns the map for chaining.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.insert(key, value);

		self
	}

	/// Inserts or replaces a value.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
		self.0.insert(key.into(), value.into());
	}

	/// Looks up a value by key.
	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.0.get(key)
	}

	/// Number of entries, absent values included.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the map has no entries.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Key-sorted `(key, rendered value)` pairs with absent values skipped.
	pub fn pairs(&self) -> impl Iterator<Item = (&str, String)> {
		self.0.iter().filter_map(|(key, value)| value.render().map(|v| (key.as_str(), v)))
	}

	/// `application/x-www-form-urlencoded` rendering of [`Params::pairs`].
	pub fn to_form(&self) -> String {
		let mut form = form_urlencoded::Serializer::new(String::new());

		for (key, value) in self.pairs() {
			form.append_pair(key, &value);
		}

		form.finish()
	}
}
impl<K, V> FromIterator<(K, V)> for Params
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}

/// How a request authenticates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthMode {
	/// Static application key, sent as `client_id`.
	ApiKey,
	/// Per-user bearer token, sent as `access_token`.
	Bearer(AccessToken),
}
impl AuthMode {
	/// Query parameter carrying the credential.
	pub const fn param_name(&self) -> &'static str {
		match self {
			Self::ApiKey => "client_id",
			Self::Bearer(_) => "access_token",
		}
	}

	/// `(name, value)` pair consumed by URL building and signing alike.
	pub fn query_pair<'a>(&'a self, config: &'a ClientConfig) -> (&'static str, &'a str) {
		match self {
			Self::ApiKey => (self.param_name(), config.api_key.as_str()),
			Self::Bearer(token) => (self.param_name(), token.expose()),
		}
	}
}

/// Transient description of one API call.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
	/// Path relative to the API base, e.g. `media/123/comments`.
	pub endpoint: String,
	/// Authenticate with the session's bearer token instead of the API key.
	pub requires_auth: bool,
	/// Optional parameters.
	pub params: Option<Params>,
	/// HTTP method.
	pub method: Method,
}
impl RequestDescriptor {
	/// Creates a descriptor without parameters.
	pub fn new(endpoint: impl Into<String>, requires_auth: bool, method: Method) -> Self {
		Self { endpoint: endpoint.into(), requires_auth, params: None, method }
	}

	/// Shorthand for a `GET` descriptor.
	pub fn get(endpoint: impl Into<String>, requires_auth: bool) -> Self {
		Self::new(endpoint, requires_auth, Method::Get)
	}

	/// Shorthand for a `POST` descriptor.
	pub fn post(endpoint: impl Into<String>, requires_auth: bool) -> Self {
		Self::new(endpoint, requires_auth, Method::Post)
	}

	/// Shorthand for a `DELETE` descriptor.
	pub fn delete(endpoint: impl Into<String>, requires_auth: bool) -> Self {
		Self::new(endpoint, requires_auth, Method::Delete)
	}

	/// Attaches parameters.
	pub fn with_params(mut self, params: Params) -> Self {
		self.params = Some(params);

		self
	}
}
