//! Module containing [`YoutubeClient`], the [`DataSource`] talking to the YouTube Data API v3

use reqwest::blocking::{
	Client,
	Response,
};

use super::config::ApiConfig;
use crate::{
	data::record_set::RecordSet,
	traits::data_source::{
		DataSource,
		PLAYLIST_PAGE_SIZE,
	},
};

/// Blocking client for the YouTube Data API v3
#[derive(Debug, Clone)]
pub struct YoutubeClient {
	/// The underlying HTTP client
	client: Client,
	/// Key, base URL and timeout
	config: ApiConfig,
}

impl YoutubeClient {
	/// Create a new instance of [`YoutubeClient`]
	pub fn new(config: ApiConfig) -> Result<Self, crate::Error> {
		let client = Client::builder()
			.user_agent(concat!("ytinfo/", env!("CARGO_PKG_VERSION")))
			.timeout(config.timeout())
			.build()?;

		return Ok(Self { client, config });
	}

	/// Get the config this client was created with
	pub fn config(&self) -> &ApiConfig {
		return &self.config;
	}

	/// Send a GET request for `resource` with the given query and decode the [`RecordSet`]
	fn get(&self, resource: &str, query: &[(&str, &str)]) -> Result<RecordSet, crate::Error> {
		let url = self.config.endpoint(resource);
		trace!("GET {} {:?}", url, query);

		let response = self
			.client
			.get(&url)
			.query(query)
			.query(&[("key", self.config.api_key())])
			.send()?;

		return decode_response(response);
	}
}

/// Map a non-success status to [`crate::error::ErrorInner::ApiStatus`], otherwise decode the body
fn decode_response(response: Response) -> Result<RecordSet, crate::Error> {
	let status = response.status();

	if !status.is_success() {
		// the error body is only used for the message, failing to read it should not hide the status
		let body = response.text().unwrap_or_default();
		let message = api_error_message(&body).unwrap_or_else(|| {
			return status.canonical_reason().unwrap_or("Unknown Status").to_owned();
		});

		return Err(crate::Error::api_status(status.as_u16(), message));
	}

	return Ok(response.json::<RecordSet>()?);
}

/// Try to get `error.message` from a API error body
fn api_error_message(body: &str) -> Option<String> {
	let value: serde_json::Value = serde_json::from_str(body).ok()?;

	return value.pointer("/error/message")?.as_str().map(ToOwned::to_owned);
}

impl DataSource for YoutubeClient {
	fn fetch_channel(&self, channel_id: &str) -> Result<RecordSet, crate::Error> {
		return self.get("channels", &[("id", channel_id), ("part", "snippet,statistics")]);
	}

	fn fetch_video(&self, video_id: &str) -> Result<RecordSet, crate::Error> {
		return self.get("videos", &[
			("id", video_id),
			("part", "snippet,statistics,contentDetails"),
		]);
	}

	fn fetch_playlist(&self, playlist_id: &str) -> Result<RecordSet, crate::Error> {
		let page_size = PLAYLIST_PAGE_SIZE.to_string();
		return self.get("playlists", &[
			("id", playlist_id),
			("part", "snippet,contentDetails"),
			("maxResults", page_size.as_str()),
		]);
	}

	fn fetch_video_in_playlist(&self, video_id: &str, playlist_id: &str) -> Result<RecordSet, crate::Error> {
		return self.get("playlistItems", &[
			("part", "snippet"),
			("playlistId", playlist_id),
			("videoId", video_id),
		]);
	}

	fn list_playlist_items(&self, playlist_id: &str, page_token: Option<&str>) -> Result<RecordSet, crate::Error> {
		let page_size = PLAYLIST_PAGE_SIZE.to_string();
		let mut query = vec![
			("playlistId", playlist_id),
			("part", "snippet,contentDetails"),
			("maxResults", page_size.as_str()),
		];
		if let Some(token) = page_token {
			query.push(("pageToken", token));
		}

		return self.get("playlistItems", &query);
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_api_error_message() {
		let body = r#"{"error": {"code": 404, "message": "The playlist identified with the request's playlistId parameter cannot be found.", "errors": []}}"#;

		assert_eq!(
			Some("The playlist identified with the request's playlistId parameter cannot be found.".to_owned()),
			api_error_message(body)
		);
		assert_eq!(None, api_error_message("<html>Bad Gateway</html>"));
		assert_eq!(None, api_error_message(r#"{"error": {"code": 500}}"#));
	}

	#[test]
	fn test_new() {
		let client = YoutubeClient::new(ApiConfig::new("somekey")).expect("Expected client to build");

		assert_eq!("somekey", client.config().api_key());
	}

	#[test]
	fn test_unreachable_is_transport() {
		// port 9 (discard) on localhost is not expected to have a HTTP server
		let client = YoutubeClient::new(
			ApiConfig::new("somekey")
				.with_base_url("http://127.0.0.1:9")
				.with_timeout(std::time::Duration::from_secs(2)),
		)
		.expect("Expected client to build");

		let err = client
			.fetch_video("9lO06Zxhu88")
			.expect_err("Expected Assert to test Result to be ERR");
		assert!(err.is_transport());
	}
}
