//! User, relationship, and user-media endpoints.

// self
use crate::{
	_prelude::*,
	api::{self, RelationshipAction},
	auth::Session,
	client::Client,
	http::HttpTransport,
	request::{Params, RequestDescriptor},
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Media the authenticated user has liked.
	pub async fn user_likes(&self, session: &Session, limit: u32) -> Result<serde_json::Value> {
		let request = RequestDescriptor::get("users/self/media/liked", true);

		self.call("user_likes", session, api::with_count(request, limit)).await
	}

	/// Users `id` follows; pass `"self"` for the authenticated user.
	pub async fn user_follows(
		&self,
		session: &Session,
		id: &str,
		limit: u32,
	) -> Result<serde_json::Value> {
		let request = RequestDescriptor::get(format!("users/{id}/follows"), true);

		self.call("user_follows", session, api::with_count(request, limit)).await
	}

	/// Users following `id`; pass `"self"` for the authenticated user.
	pub async fn user_followers(
		&self,
		session: &Session,
		id: &str,
		limit: u32,
	) -> Result<serde_json::Value> {
		let request = RequestDescriptor::get(format!("users/{id}/followed-by"), true);

		self.call("user_followers", session, api::with_count(request, limit)).await
	}

	/// Relationship between the authenticated user and `id`.
	pub async fn user_relationship(&self, session: &Session, id: &str) -> Result<serde_json::Value> {
		let request = RequestDescriptor::get(format!("users/{id}/relationship"), true);

		self.call("user_relationship", session, request).await
	}

	/// Applies `action` to the relationship with `user`.
	///
	/// `action` is parsed first; an unknown action fails with
	/// [`Error::InvalidRelationshipAction`] without contacting the API.
	pub async fn modify_relationship(
		&self,
		session: &Session,
		action: &str,
		user: &str,
	) -> Result<serde_json::Value> {
		let action = action.parse::<RelationshipAction>()?;
		let request = RequestDescriptor::post(format!("users/{user}/relationship"), true)
			.with_params(Params::new().with("action", action.as_str()));

		self.call("modify_relationship", session, request).await
	}

	/// Recent media published by `id`.
	///
	/// Authenticates with the session's token when one is present, otherwise with the API key.
	pub async fn user_media(
		&self,
		session: &Session,
		id: &str,
		limit: u32,
	) -> Result<serde_json::Value> {
		let request = RequestDescriptor::get(
			format!("users/{id}/media/recent"),
			session.credentials.is_set(),
		);

		self.call("user_media", session, api::with_count(request, limit)).await
	}
}
