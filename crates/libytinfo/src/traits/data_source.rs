//! Module for the [`DataSource`] trait, the only way entities talk to the remote API

use crate::data::record_set::RecordSet;

/// The remote lookups used to hydrate entities
///
/// Every lookup returns a [`RecordSet`], a empty set means "not found" and must not be returned as a error
/// Errors are reserved for transport problems, see [`crate::Error::is_transport`]
pub trait DataSource {
	/// Lookup a single channel by id (parts `snippet,statistics`)
	fn fetch_channel(&self, channel_id: &str) -> Result<RecordSet, crate::Error>;
	/// Lookup a single video by id (parts `snippet,statistics,contentDetails`)
	fn fetch_video(&self, video_id: &str) -> Result<RecordSet, crate::Error>;
	/// Lookup a single playlist by id (parts `snippet,contentDetails`)
	fn fetch_playlist(&self, playlist_id: &str) -> Result<RecordSet, crate::Error>;
	/// Lookup the playlist-item linking `video_id` into `playlist_id`, empty if the video is not a member
	fn fetch_video_in_playlist(&self, video_id: &str, playlist_id: &str) -> Result<RecordSet, crate::Error>;
	/// Get one page (at most [`PLAYLIST_PAGE_SIZE`] items) of the items of `playlist_id`
	/// `page_token` is the continuation token from the previous page, [`None`] for the first page
	fn list_playlist_items(&self, playlist_id: &str, page_token: Option<&str>) -> Result<RecordSet, crate::Error>;
}

/// The amount of playlist items requested per page
pub const PLAYLIST_PAGE_SIZE: u8 = 50;

// Implemented so that a `&YoutubeClient` or `Box<dyn DataSource>` can be passed where a source is expected
impl<T: DataSource + ?Sized> DataSource for &T {
	fn fetch_channel(&self, channel_id: &str) -> Result<RecordSet, crate::Error> {
		return (**self).fetch_channel(channel_id);
	}

	fn fetch_video(&self, video_id: &str) -> Result<RecordSet, crate::Error> {
		return (**self).fetch_video(video_id);
	}

	fn fetch_playlist(&self, playlist_id: &str) -> Result<RecordSet, crate::Error> {
		return (**self).fetch_playlist(playlist_id);
	}

	fn fetch_video_in_playlist(&self, video_id: &str, playlist_id: &str) -> Result<RecordSet, crate::Error> {
		return (**self).fetch_video_in_playlist(video_id, playlist_id);
	}

	fn list_playlist_items(&self, playlist_id: &str, page_token: Option<&str>) -> Result<RecordSet, crate::Error> {
		return (**self).list_playlist_items(playlist_id, page_token);
	}
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
	fn fetch_channel(&self, channel_id: &str) -> Result<RecordSet, crate::Error> {
		return (**self).fetch_channel(channel_id);
	}

	fn fetch_video(&self, video_id: &str) -> Result<RecordSet, crate::Error> {
		return (**self).fetch_video(video_id);
	}

	fn fetch_playlist(&self, playlist_id: &str) -> Result<RecordSet, crate::Error> {
		return (**self).fetch_playlist(playlist_id);
	}

	fn fetch_video_in_playlist(&self, video_id: &str, playlist_id: &str) -> Result<RecordSet, crate::Error> {
		return (**self).fetch_video_in_playlist(video_id, playlist_id);
	}

	fn list_playlist_items(&self, playlist_id: &str, page_token: Option<&str>) -> Result<RecordSet, crate::Error> {
		return (**self).list_playlist_items(playlist_id, page_token);
	}
}

/// In-memory [`DataSource`] for tests
#[cfg(test)]
pub mod test_utils {
	use super::*;
	use serde_json::{
		Value,
		json,
	};
	use std::{
		cell::RefCell,
		collections::HashMap,
	};

	/// A scripted playlist page, either a page of video ids or a failure
	#[derive(Debug, Clone)]
	pub enum MockPage {
		/// A page with the given video ids and continuation token
		Ok(Vec<&'static str>, Option<&'static str>),
		/// A transport failure
		Fail,
	}

	/// [`DataSource`] backed by maps, missing entries are returned as a empty [`RecordSet`]
	#[derive(Debug, Default)]
	pub struct MockSource {
		pub channels:    HashMap<String, RecordSet>,
		pub videos:      HashMap<String, RecordSet>,
		pub playlists:   HashMap<String, RecordSet>,
		/// Keyed by "(video_id, playlist_id)"
		pub memberships: HashMap<(String, String), RecordSet>,
		/// Pages per playlist, the page token is the index into this list (first page has no token)
		pub pages:       HashMap<String, Vec<MockPage>>,
		/// Video ids for which [`DataSource::fetch_video`] fails with a transport error
		pub failing:     Vec<String>,
		/// All calls made, in order, for asserting on call counts
		pub calls:       RefCell<Vec<String>>,
	}

	impl MockSource {
		/// Builder function to add a video record
		pub fn with_video(mut self, id: &str, title: &str, likes: u64, duration: &str) -> Self {
			self.videos.insert(id.to_owned(), video_set(id, title, likes, duration));

			return self;
		}

		/// Builder function to add scripted pages for a playlist
		pub fn with_pages(mut self, playlist_id: &str, pages: Vec<MockPage>) -> Self {
			self.pages.insert(playlist_id.to_owned(), pages);

			return self;
		}

		/// Count how many calls started with `prefix`
		pub fn count_calls(&self, prefix: &str) -> usize {
			return self.calls.borrow().iter().filter(|v| return v.starts_with(prefix)).count();
		}

		fn record(&self, call: String) {
			self.calls.borrow_mut().push(call);
		}
	}

	/// Create a [`RecordSet`] like the API returns for a video
	pub fn video_set(id: &str, title: &str, likes: u64, duration: &str) -> RecordSet {
		return RecordSet::new(vec![json!({
			"kind": "youtube#video",
			"id": id,
			"snippet": { "title": title, "localized": { "title": title } },
			"statistics": { "viewCount": (likes * 10).to_string(), "likeCount": likes.to_string() },
			"contentDetails": { "duration": duration }
		})]);
	}

	/// Create a playlist-items page item referencing `video_id`
	pub fn playlist_item(video_id: &str) -> Value {
		return json!({
			"kind": "youtube#playlistItem",
			"snippet": { "resourceId": { "kind": "youtube#video", "videoId": video_id } }
		});
	}

	impl DataSource for MockSource {
		fn fetch_channel(&self, channel_id: &str) -> Result<RecordSet, crate::Error> {
			self.record(format!("channel:{}", channel_id));
			return Ok(self.channels.get(channel_id).cloned().unwrap_or_default());
		}

		fn fetch_video(&self, video_id: &str) -> Result<RecordSet, crate::Error> {
			self.record(format!("video:{}", video_id));
			if self.failing.iter().any(|v| return v == video_id) {
				return Err(crate::Error::api_status(503, "Service Unavailable"));
			}
			return Ok(self.videos.get(video_id).cloned().unwrap_or_default());
		}

		fn fetch_playlist(&self, playlist_id: &str) -> Result<RecordSet, crate::Error> {
			self.record(format!("playlist:{}", playlist_id));
			return Ok(self.playlists.get(playlist_id).cloned().unwrap_or_default());
		}

		fn fetch_video_in_playlist(&self, video_id: &str, playlist_id: &str) -> Result<RecordSet, crate::Error> {
			self.record(format!("membership:{}:{}", video_id, playlist_id));
			return Ok(self
				.memberships
				.get(&(video_id.to_owned(), playlist_id.to_owned()))
				.cloned()
				.unwrap_or_default());
		}

		fn list_playlist_items(&self, playlist_id: &str, page_token: Option<&str>) -> Result<RecordSet, crate::Error> {
			self.record(format!("items:{}:{}", playlist_id, page_token.unwrap_or("")));
			let Some(pages) = self.pages.get(playlist_id) else {
				return Ok(RecordSet::default());
			};
			let index: usize = match page_token {
				Some(token) => token
					.parse()
					.map_err(|_| return crate::Error::api_status(400, "invalid page token"))?,
				None => 0,
			};

			return match pages.get(index) {
				Some(MockPage::Ok(ids, next)) => {
					let set = RecordSet::new(ids.iter().map(|v| return playlist_item(v)).collect());
					Ok(match next {
						Some(next) => set.with_next_page_token(*next),
						None => set,
					})
				},
				Some(MockPage::Fail) => Err(crate::Error::api_status(500, "Backend Error")),
				None => Err(crate::Error::api_status(400, "invalid page token")),
			};
		}
	}
}
