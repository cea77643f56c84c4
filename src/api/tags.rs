//! Tag endpoints.

// self
use crate::{
	_prelude::*,
	api,
	auth::Session,
	client::Client,
	http::HttpTransport,
	request::{Params, RequestDescriptor},
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Tags whose names start with `name`.
	pub async fn search_tags(&self, session: &Session, name: &str) -> Result<serde_json::Value> {
		let request =
			RequestDescriptor::get("tags/search", false).with_params(Params::new().with("q", name));

		self.call("search_tags", session, request).await
	}

	/// Metadata for one tag.
	pub async fn tag(&self, session: &Session, name: &str) -> Result<serde_json::Value> {
		let request = RequestDescriptor::get(format!("tags/{name}"), false);

		self.call("tag", session, request).await
	}

	/// Recently tagged media.
	pub async fn tag_media(
		&self,
		session: &Session,
		name: &str,
		limit: u32,
	) -> Result<serde_json::Value> {
		let request = RequestDescriptor::get(format!("tags/{name}/media/recent"), false);

		self.call("tag_media", session, api::with_count(request, limit)).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	#[tokio::test]
	async fn tag_media_decodes_data_and_pagination() {
		let spy = SpyTransport::replying(raw_response(
			"HTTP/1.1 200 OK",
			&[("Content-Type", "application/json; charset=utf-8")],
			"{\"pagination\":{\"next_max_tag_id\":\"5\"},\"meta\":{\"code\":200},\"data\":[{\"id\":\"1\"}]}",
		));
		let client = spy_client(&spy);
		let body = client.tag_media(&Session::new(), "snow", 20).await.expect("Call should succeed.");

		assert_eq!(body["data"][0]["id"], "1");
		assert_eq!(
			spy.requests()[0].url.as_str(),
			"https://api.instagram.com/v1/tags/snow/media/recent?client_id=test-key&count=20"
		);
	}
}
