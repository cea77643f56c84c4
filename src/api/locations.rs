//! Location endpoints.

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
	/// Metadata for one location.
	pub async fn location(&self, session: &Session, id: &str) -> Result<serde_json::Value> {
		let request = RequestDescriptor::get(format!("locations/{id}"), false);

		self.call("location", session, request).await
	}

	/// Recent media tagged at a location.
	pub async fn location_media(&self, session: &Session, id: &str) -> Result<serde_json::Value> {
		let request = RequestDescriptor::get(format!("locations/{id}/media/recent"), false);

		self.call("location_media", session, request).await
	}

	/// Locations within `distance` metres of a coordinate.
	pub async fn search_locations(
		&self,
		session: &Session,
		lat: f64,
		lng: f64,
		distance: u32,
	) -> Result<serde_json::Value> {
		let params = Params::new().with("lat", lat).with("lng", lng).with("distance", distance);

		let request = RequestDescriptor::get("locations/search", false).with_params(params);

		self.call("search_locations", session, request).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	#[tokio::test]
	async fn search_locations_sends_coordinates() {
		let spy = SpyTransport::replying(raw_response("HTTP/1.1 200 OK", &[], "{\"data\":[]}"));
		let client = spy_client(&spy).with_signed_requests(true);

		client
			.search_locations(&Session::new(), -33.5, 151.25, crate::api::DEFAULT_DISTANCE)
			.await
			.expect("Call should succeed.");

		let sent = spy.requests().pop().expect("One request should be recorded.");
		let pairs = sent.url.query_pairs().into_owned().collect::<BTreeMap<_, _>>();
		let params = Params::new().with("lat", -33.5).with("lng", 151.25).with("distance", 1_000_u32);
		let expected =
			client.signer().sign("locations/search", ("client_id", TEST_API_KEY), Some(&params));

		assert_eq!(pairs.get("lat").map(String::as_str), Some("-33.5"));
		assert_eq!(pairs.get("distance").map(String::as_str), Some("1000"));
		assert_eq!(pairs.get("sig"), Some(&expected));
	}
}
