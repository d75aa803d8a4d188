//! Module containing [`Video`]

use chrono::TimeDelta;
use std::path::{
	Path,
	PathBuf,
};

use super::{
	Source,
	UNKNOWN_TITLE,
	write_snapshot,
};
use crate::{
	data::{
		duration::parse_iso8601_duration,
		record_set::RecordSet,
	},
	traits::data_source::DataSource,
};

/// URL template for a video, the id is appended
pub const VIDEO_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// A YouTube video, hydrated once and read-only afterwards
///
/// The raw record is not accessible:
///
/// ```compile_fail
/// # use libytinfo::entity::video::Video;
/// let video = Video::from_snapshot("9Bv2zltQKQA.json").unwrap();
/// let _ = video.record;
/// ```
///
/// Neither can fields be changed:
///
/// ```compile_fail
/// # use libytinfo::entity::video::Video;
/// let mut video = Video::from_snapshot("9Bv2zltQKQA.json").unwrap();
/// video.like_count = Some(0);
/// ```
#[derive(Clone, PartialEq)]
pub struct Video {
	video_id:   Option<String>,
	title:      Option<String>,
	url:        Option<String>,
	view_count: Option<u64>,
	like_count: Option<u64>,
	duration:   Option<TimeDelta>,
	/// The record the fields were computed from, only kept for [`Video::to_snapshot`]
	record:     RecordSet,
}

impl Video {
	/// Fetch a video by id from `source`
	pub fn fetch<D: DataSource + ?Sized, I: Into<String>>(source: &D, video_id: I) -> Result<Self, crate::Error> {
		return Self::from_source(Some(source), Source::live(video_id));
	}

	/// Load a video from a snapshot file
	pub fn from_snapshot<P: AsRef<Path>>(path: P) -> Result<Self, crate::Error> {
		return Self::from_source::<dyn DataSource>(None, Source::snapshot(path));
	}

	/// Hydrate a video from `from`
	///
	/// `source` is only required for [`Source::Live`]
	/// A duration that is present but not valid ISO 8601 is a error, a missing one is not
	pub fn from_source<D: DataSource + ?Sized>(source: Option<&D>, from: Source) -> Result<Self, crate::Error> {
		let hydrated = from.hydrate(|id| {
			let Some(source) = source else {
				return Err(crate::Error::invalid_construction_arguments(
					"A live video requires a data source",
				));
			};
			return source.fetch_video(id);
		})?;
		let record = hydrated.record;

		let duration = match record.first_str("/contentDetails/duration") {
			Some(v) => Some(parse_iso8601_duration(v)?),
			None => None,
		};

		return Ok(Self {
			video_id: hydrated.id,
			title: record.first_str("/snippet/localized/title").map(ToOwned::to_owned),
			// the url uses the id the API echoed back, not the requested one
			url: record
				.first_str("/id")
				.map(|id| return format!("{}{}", VIDEO_URL_PREFIX, id)),
			view_count: record.first_count("/statistics/viewCount")?,
			like_count: record.first_count("/statistics/likeCount")?,
			duration,
			record,
		});
	}

	/// Get the video id
	pub fn video_id(&self) -> Option<&str> {
		return self.video_id.as_deref();
	}

	/// Get the (localized) video title
	pub fn title(&self) -> Option<&str> {
		return self.title.as_deref();
	}

	/// Get the watch url (like `https://www.youtube.com/watch?v=9lO06Zxhu88`)
	pub fn url(&self) -> Option<&str> {
		return self.url.as_deref();
	}

	/// Get the view count
	pub fn view_count(&self) -> Option<u64> {
		return self.view_count;
	}

	/// Get the like count, [`None`] if the video was not found or likes are hidden
	pub fn like_count(&self) -> Option<u64> {
		return self.like_count;
	}

	/// Get the duration
	pub fn duration(&self) -> Option<TimeDelta> {
		return self.duration;
	}

	/// Get the duration in whole seconds
	pub fn duration_seconds(&self) -> Option<i64> {
		return self.duration.map(|v| return v.num_seconds());
	}

	/// Write the full record as `<video_id>.json` into `dir`
	pub fn to_snapshot<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, crate::Error> {
		return write_snapshot(&self.record, self.video_id(), dir);
	}
}

impl std::fmt::Display for Video {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		return write!(f, "{}", self.title().unwrap_or(UNKNOWN_TITLE));
	}
}

impl std::fmt::Debug for Video {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		return write!(f, "Video(video_id={})", self.video_id().unwrap_or("None"));
	}
}
