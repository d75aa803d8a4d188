//! Module containing [`ApiConfig`]

use std::time::Duration;

/// Environment variable the API key is read from
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Base URL of the YouTube Data API v3
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Default timeout for a single request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`super::youtube::YoutubeClient`]
#[derive(Clone, PartialEq)]
pub struct ApiConfig {
	/// The API key sent with every request
	api_key:  String,
	/// The base URL, without a trailing slash
	base_url: String,
	/// Timeout for a single request
	timeout:  Duration,
}

impl ApiConfig {
	/// Create a new instance of [`ApiConfig`] with the default base URL and timeout
	pub fn new<K: Into<String>>(api_key: K) -> Self {
		return Self {
			api_key:  api_key.into(),
			base_url: DEFAULT_BASE_URL.to_owned(),
			timeout:  DEFAULT_TIMEOUT,
		};
	}

	/// Create a new instance of [`ApiConfig`] with the key from [`API_KEY_ENV`]
	pub fn from_env() -> Result<Self, crate::Error> {
		let key = std::env::var(API_KEY_ENV)
			.ok()
			.filter(|v| return !v.trim().is_empty())
			.ok_or_else(|| {
				return crate::Error::other(format!("Environment variable \"{}\" is not set", API_KEY_ENV));
			})?;

		return Ok(Self::new(key));
	}

	/// Builder function to set a different base URL (like a local mock server)
	#[must_use]
	pub fn with_base_url<U: AsRef<str>>(mut self, base_url: U) -> Self {
		self.base_url = base_url.as_ref().trim_end_matches('/').to_owned();

		return self;
	}

	/// Builder function to set the request timeout
	#[must_use]
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		return self;
	}

	/// Get the API key
	pub fn api_key(&self) -> &str {
		return &self.api_key;
	}

	/// Get the base URL
	pub fn base_url(&self) -> &str {
		return &self.base_url;
	}

	/// Get the request timeout
	pub fn timeout(&self) -> Duration {
		return self.timeout;
	}

	/// Get the full URL for a API resource (like "videos")
	pub fn endpoint(&self, resource: &str) -> String {
		return format!("{}/{}", self.base_url, resource);
	}
}

// custom Debug, so that the key does not end up in logs
impl std::fmt::Debug for ApiConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		return f
			.debug_struct("ApiConfig")
			.field("api_key", &"<redacted>")
			.field("base_url", &self.base_url)
			.field("timeout", &self.timeout)
			.finish();
	}
}
