//! Media, like, and comment endpoints.

// self
use crate::{
	_prelude::*,
	auth::Session,
	client::Client,
	http::HttpTransport,
	request::{Params, RequestDescriptor},
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Media taken within `distance` metres of a coordinate, optionally bounded in time.
	pub async fn search_media(
		&self,
		session: &Session,
		lat: f64,
		lng: f64,
		distance: u32,
		min_timestamp: Option<OffsetDateTime>,
		max_timestamp: Option<OffsetDateTime>,
	) -> Result<serde_json::Value> {
		let params = Params::new()
			.with("lat", lat)
			.with("lng", lng)
			.with("distance", distance)
			.with("min_timestamp", min_timestamp.map(OffsetDateTime::unix_timestamp))
			.with("max_timestamp", max_timestamp.map(OffsetDateTime::unix_timestamp));

		let request = RequestDescriptor::get("media/search", false).with_params(params);

		self.call("search_media", session, request).await
	}

	/// One media object.
	///
	/// Authenticates with the session's token when one is present, otherwise with the API key.
	pub async fn media(&self, session: &Session, id: &str) -> Result<serde_json::Value> {
		let request = RequestDescriptor::get(format!("media/{id}"), session.credentials.is_set());

		self.call("media", session, request).await
	}

	/// Currently popular media.
	pub async fn popular_media(&self, session: &Session) -> Result<serde_json::Value> {
		let request = RequestDescriptor::get("media/popular", false);

		self.call("popular_media", session, request).await
	}

	/// Users who liked `id`.
	pub async fn media_likes(&self, session: &Session, id: &str) -> Result<serde_json::Value> {
		let request = RequestDescriptor::get(format!("media/{id}/likes"), true);

		self.call("media_likes", session, request).await
	}

	/// Likes `id` as the authenticated user.
	pub async fn like_media(&self, session: &Session, id: &str) -> Result<serde_json::Value> {
		let request = RequestDescriptor::post(format!("media/{id}/likes"), true);

		self.call("like_media", session, request).await
	}

	/// Removes the authenticated user's like from `id`.
	pub async fn unlike_media(&self, session: &Session, id: &str) -> Result<serde_json::Value> {
		let request = RequestDescriptor::delete(format!("media/{id}/likes"), true);

		self.call("unlike_media", session, request).await
	}

	/// Comments on `id`.
	pub async fn media_comments(&self, session: &Session, id: &str) -> Result<serde_json::Value> {
		let request = RequestDescriptor::get(format!("media/{id}/comments"), false);

		self.call("media_comments", session, request).await
	}

	/// Posts a comment on `id`.
	pub async fn add_media_comment(
		&self,
		session: &Session,
		id: &str,
		text: &str,
	) -> Result<serde_json::Value> {
		let request = RequestDescriptor::post(format!("media/{id}/comments"), true)
			.with_params(Params::new().with("text", text));

		self.call("add_media_comment", session, request).await
	}

	/// Deletes comment `comment_id` from `id`.
	pub async fn delete_media_comment(
		&self,
		session: &Session,
		id: &str,
		comment_id: &str,
	) -> Result<serde_json::Value> {
		let request = RequestDescriptor::delete(format!("media/{id}/comments/{comment_id}"), true);

		self.call("delete_media_comment", session, request).await
	}
}
