//! Module containing [`PlaylistVideo`], a [`Video`] checked for membership in a playlist

use chrono::TimeDelta;

use super::{
	Source,
	UNKNOWN_TITLE,
	video::Video,
};
use crate::{
	data::record_set::RecordSet,
	traits::data_source::DataSource,
};

/// Result of the membership lookup of a [`PlaylistVideo`]
#[derive(Debug, Clone, PartialEq)]
pub enum Membership {
	/// The video is in the playlist with this id
	Member(String),
	/// The video is not in the playlist, contains a message naming the video
	NotMember(String),
}

/// A [`Video`] plus whether it is part of a given playlist
///
/// The video is fully hydrated before the membership is looked up, so that the "not a member" message can name it
///
/// Neither the video nor the membership can be reached or replaced directly:
///
/// ```compile_fail
/// # use libytinfo::{entity::{Source, playlist_video::PlaylistVideo}, traits::data_source::DataSource};
/// let pv = PlaylistVideo::from_sources::<dyn DataSource>(None, Source::snapshot("v.json"), Source::snapshot("m.json")).unwrap();
/// let _ = pv.video;
/// ```
///
/// ```compile_fail
/// # use libytinfo::{entity::{Source, playlist_video::{Membership, PlaylistVideo}}, traits::data_source::DataSource};
/// let mut pv = PlaylistVideo::from_sources::<dyn DataSource>(None, Source::snapshot("v.json"), Source::snapshot("m.json")).unwrap();
/// pv.membership = Membership::NotMember(String::new());
/// ```
#[derive(Clone, PartialEq)]
pub struct PlaylistVideo {
	video:      Video,
	membership: Membership,
}

impl PlaylistVideo {
	/// Fetch a video and its membership in `playlist_id` from `source`
	pub fn fetch<D, V, P>(source: &D, video_id: V, playlist_id: P) -> Result<Self, crate::Error>
	where
		D: DataSource + ?Sized,
		V: Into<String>,
		P: Into<String>,
	{
		return Self::from_sources(Some(source), Source::live(video_id), Source::live(playlist_id));
	}

	/// Hydrate the video from `video_from`, then the membership from `playlist_from`
	///
	/// For a live membership lookup `playlist_from` is [`Source::Live`] with the playlist id,
	/// for a snapshot it is the saved playlist-item lookup
	pub fn from_sources<D: DataSource + ?Sized>(
		source: Option<&D>,
		video_from: Source,
		playlist_from: Source,
	) -> Result<Self, crate::Error> {
		let video = Video::from_source(source, video_from)?;

		// second pass, only after the video is complete
		let membership_record = match playlist_from {
			Source::Live(playlist_id) => {
				let (Some(source), Some(video_id)) = (source, video.video_id()) else {
					return Err(crate::Error::invalid_construction_arguments(
						"A live membership lookup requires a data source and a video id",
					));
				};
				debug!("Looking up membership of \"{}\" in \"{}\"", video_id, playlist_id);
				source.fetch_video_in_playlist(video_id, &playlist_id)?
			},
			Source::Snapshot(path) => RecordSet::from_file(path)?,
			Source::Record(record) => record,
		};

		let membership = membership_from_record(&membership_record, &video)?;

		return Ok(Self { video, membership });
	}

	/// Get the inner [`Video`]
	pub fn video(&self) -> &Video {
		return &self.video;
	}

	/// Get the membership result
	pub fn membership(&self) -> &Membership {
		return &self.membership;
	}

	/// Get whether the video is a member of the playlist
	pub fn is_member(&self) -> bool {
		return matches!(self.membership, Membership::Member(_));
	}

	/// Get the playlist id the video was found in, or a message that it is not a member
	pub fn playlist_membership_id(&self) -> &str {
		return match &self.membership {
			Membership::Member(v) | Membership::NotMember(v) => v,
		};
	}

	/// See [`Video::video_id`]
	pub fn video_id(&self) -> Option<&str> {
		return self.video.video_id();
	}

	/// See [`Video::title`]
	pub fn title(&self) -> Option<&str> {
		return self.video.title();
	}

	/// See [`Video::url`]
	pub fn url(&self) -> Option<&str> {
		return self.video.url();
	}

	/// See [`Video::view_count`]
	pub fn view_count(&self) -> Option<u64> {
		return self.video.view_count();
	}

	/// See [`Video::like_count`]
	pub fn like_count(&self) -> Option<u64> {
		return self.video.like_count();
	}

	/// See [`Video::duration`]
	pub fn duration(&self) -> Option<TimeDelta> {
		return self.video.duration();
	}
}

/// Compute the [`Membership`] from a playlist-item lookup
/// A non-empty lookup without a playlist id is malformed
fn membership_from_record(record: &RecordSet, video: &Video) -> Result<Membership, crate::Error> {
	if record.is_empty() {
		return Ok(Membership::NotMember(format!(
			"Video \"{}\" is not in the given playlist",
			video.title().unwrap_or(UNKNOWN_TITLE)
		)));
	}

	return record
		.first_str("/snippet/playlistId")
		.map(|v| return Membership::Member(v.to_owned()))
		.ok_or_else(|| {
			return crate::Error::malformed_record("Expected a playlist item to have \"snippet.playlistId\"");
		});
}

impl std::fmt::Display for PlaylistVideo {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		return std::fmt::Display::fmt(&self.video, f);
	}
}

impl std::fmt::Debug for PlaylistVideo {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		return write!(
			f,
			"PlaylistVideo(video_id={}, playlist_membership_id={})",
			self.video_id().unwrap_or("None"),
			self.playlist_membership_id()
		);
	}
}
