//! Module containing [`Playlist`] and the aggregations over its member videos

use chrono::TimeDelta;
use std::path::{
	Path,
	PathBuf,
};

use super::{
	Source,
	UNKNOWN_TITLE,
	pager::PlaylistItemPager,
	video::Video,
	write_snapshot,
};
use crate::{
	data::record_set::RecordSet,
	traits::data_source::DataSource,
};

/// URL template for a playlist, the id is appended
pub const PLAYLIST_URL_PREFIX: &str = "https://www.youtube.com/playlist?list=";

/// Enum to represent why the aggregation callback was called plus extra arguments
#[derive(Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum AggregateProgress {
	/// Variant that indicates that a aggregation has started (clear / reset progress bar)
	/// Will always be called
	Starting,
	/// Variant for the amount of member videos that will be fetched [size hint]
	/// Will always be called
	SizeHint(usize),
	/// Variant for increasing the progress [increase by elements, current index]
	/// Called once for each member video, after it has been fetched
	Increase(usize, usize),
	/// Variant that indicates that a aggregation has finished (finish progress bar) [members that contributed]
	/// Not called when the aggregation fails
	Finished(usize),
}

/// A YouTube playlist, hydrated once and read-only afterwards
///
/// The member video ids are only enumerated for a live playlist, a snapshot has no member ids
/// and both aggregations are empty for it
///
/// The raw record is not accessible:
///
/// ```compile_fail
/// # use libytinfo::entity::playlist::Playlist;
/// let playlist = Playlist::from_snapshot("PLguYHBi01DWr4bRWc4uaguASmo7lW4GCb.json").unwrap();
/// let _ = playlist.record;
/// ```
///
/// And the member ids cannot be changed:
///
/// ```compile_fail
/// # use libytinfo::entity::playlist::Playlist;
/// let mut playlist = Playlist::from_snapshot("PLguYHBi01DWr4bRWc4uaguASmo7lW4GCb.json").unwrap();
/// playlist.member_video_ids = None;
/// ```
#[derive(Clone, PartialEq)]
pub struct Playlist {
	playlist_id:      Option<String>,
	title:            Option<String>,
	url:              Option<String>,
	member_video_ids: Option<Vec<String>>,
	/// Whether the enumeration of member ids stopped early because of a error
	truncated:        bool,
	/// The record the fields were computed from, only kept for [`Playlist::to_snapshot`]
	record:           RecordSet,
}

impl Playlist {
	/// Fetch a playlist by id from `source` and enumerate all its member video ids
	pub fn fetch<D: DataSource + ?Sized, I: Into<String>>(source: &D, playlist_id: I) -> Result<Self, crate::Error> {
		return Self::from_source(Some(source), Source::live(playlist_id));
	}

	/// Load a playlist from a snapshot file, no member ids are enumerated
	pub fn from_snapshot<P: AsRef<Path>>(path: P) -> Result<Self, crate::Error> {
		return Self::from_source::<dyn DataSource>(None, Source::snapshot(path));
	}

	/// Hydrate a playlist from `from`
	///
	/// For [`Source::Live`] the member ids are enumerated right away, a failing page truncates the
	/// enumeration instead of failing the construction (see [`Playlist::is_truncated`])
	pub fn from_source<D: DataSource + ?Sized>(source: Option<&D>, from: Source) -> Result<Self, crate::Error> {
		let live = from.is_live();
		let hydrated = from.hydrate(|id| {
			let Some(source) = source else {
				return Err(crate::Error::invalid_construction_arguments(
					"A live playlist requires a data source",
				));
			};
			return source.fetch_playlist(id);
		})?;
		let record = hydrated.record;

		let (member_video_ids, truncated) = match (live, source, hydrated.id.as_deref()) {
			(true, Some(source), Some(id)) => {
				let mut pager = PlaylistItemPager::new(source, id);
				let ids = pager.collect_ids();
				debug!("Playlist \"{}\" has {} member videos", id, ids.len());

				(Some(ids), pager.error().is_some())
			},
			_ => (None, false),
		};

		let url = match (record.is_empty(), hydrated.id.as_deref()) {
			(false, Some(id)) => Some(format!("{}{}", PLAYLIST_URL_PREFIX, id)),
			_ => None,
		};

		return Ok(Self {
			playlist_id: hydrated.id,
			title: record.first_str("/snippet/title").map(ToOwned::to_owned),
			url,
			member_video_ids,
			truncated,
			record,
		});
	}

	/// Get the playlist id
	pub fn playlist_id(&self) -> Option<&str> {
		return self.playlist_id.as_deref();
	}

	/// Get the playlist title
	pub fn title(&self) -> Option<&str> {
		return self.title.as_deref();
	}

	/// Get the playlist url (like `https://www.youtube.com/playlist?list=PLguYHBi01DWr4bRWc4uaguASmo7lW4GCb`)
	pub fn url(&self) -> Option<&str> {
		return self.url.as_deref();
	}

	/// Get the enumerated member video ids in playlist order, [`None`] if the playlist was not loaded live
	pub fn member_video_ids(&self) -> Option<&[String]> {
		return self.member_video_ids.as_deref();
	}

	/// Get whether the member enumeration stopped early, in which case the member ids are only a prefix
	pub fn is_truncated(&self) -> bool {
		return self.truncated;
	}

	/// Member ids, empty if none were enumerated
	fn member_ids(&self) -> &[String] {
		return self.member_video_ids.as_deref().unwrap_or(&[]);
	}

	/// Iterate over the member videos, each is fetched from `source` when the iterator reaches it
	///
	/// Nothing is cached, every call fetches every member again
	pub fn member_videos<'a, D: DataSource + ?Sized>(
		&'a self,
		source: &'a D,
	) -> impl Iterator<Item = Result<Video, crate::Error>> + 'a {
		return self
			.member_ids()
			.iter()
			.map(move |id| return Video::fetch(source, id.as_str()));
	}

	/// Get the sum of the durations of all member videos, see [`Playlist::total_duration_with_progress`]
	pub fn total_duration<D: DataSource + ?Sized>(&self, source: &D) -> Result<TimeDelta, crate::Error> {
		return self.total_duration_with_progress(source, |_| {});
	}

	/// Get the sum of the durations of all member videos
	///
	/// Members without a duration (like a deleted video) are skipped, a failing fetch fails the whole aggregation
	/// Zero for a playlist without members
	pub fn total_duration_with_progress<D: DataSource + ?Sized, S: FnMut(AggregateProgress)>(
		&self,
		source: &D,
		mut pgcb: S,
	) -> Result<TimeDelta, crate::Error> {
		pgcb(AggregateProgress::Starting);
		pgcb(AggregateProgress::SizeHint(self.member_ids().len()));

		let mut total = TimeDelta::zero();
		let mut counted = 0usize;

		for (index, video) in self.member_videos(source).enumerate() {
			let video = video?;
			pgcb(AggregateProgress::Increase(1, index));

			let Some(duration) = video.duration() else {
				warn!(
					"Skipping member \"{}\" of the total duration, it has no duration",
					video.video_id().unwrap_or("None")
				);
				continue;
			};

			total = total
				.checked_add(&duration)
				.ok_or_else(|| return crate::Error::other("Total playlist duration overflowed"))?;
			counted += 1;
		}

		info!(
			"Total duration of {} members of \"{}\" is {}s",
			counted,
			self.playlist_id().unwrap_or("None"),
			total.num_seconds()
		);
		pgcb(AggregateProgress::Finished(counted));

		return Ok(total);
	}

	/// Get the member video with the most likes, see [`Playlist::best_video_with_progress`]
	pub fn best_video<D: DataSource + ?Sized>(&self, source: &D) -> Result<Option<Video>, crate::Error> {
		return self.best_video_with_progress(source, |_| {});
	}

	/// Get the member video with the strictly highest like count
	///
	/// On a tie the member that comes first in the playlist wins
	/// Members without a like count (hidden or not found) are never picked
	/// A member with 0 likes is still a candidate, so it wins when no member has more
	/// Returns [`None`] if no member has a like count, a failing fetch fails the whole aggregation
	pub fn best_video_with_progress<D: DataSource + ?Sized, S: FnMut(AggregateProgress)>(
		&self,
		source: &D,
		mut pgcb: S,
	) -> Result<Option<Video>, crate::Error> {
		pgcb(AggregateProgress::Starting);
		pgcb(AggregateProgress::SizeHint(self.member_ids().len()));

		let mut best: Option<(u64, Video)> = None;
		let mut candidates = 0usize;

		for (index, video) in self.member_videos(source).enumerate() {
			let video = video?;
			pgcb(AggregateProgress::Increase(1, index));

			let Some(likes) = video.like_count() else {
				debug!(
					"Member \"{}\" has no like count, not a candidate",
					video.video_id().unwrap_or("None")
				);
				continue;
			};
			candidates += 1;

			// strictly greater, so that the earliest member keeps a tie
			let is_better = match &best {
				Some((best_likes, _)) => likes > *best_likes,
				None => true,
			};
			if is_better {
				best = Some((likes, video));
			}
		}

		pgcb(AggregateProgress::Finished(candidates));

		return Ok(best.map(|(_, video)| return video));
	}

	/// Get the url of [`Playlist::best_video`]
	pub fn best_video_url<D: DataSource + ?Sized>(&self, source: &D) -> Result<Option<String>, crate::Error> {
		return Ok(self
			.best_video(source)?
			.and_then(|video| return video.url().map(ToOwned::to_owned)));
	}

	/// Write the full playlist record as `<playlist_id>.json` into `dir`
	///
	/// The member ids are not part of the snapshot
	pub fn to_snapshot<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, crate::Error> {
		return write_snapshot(&self.record, self.playlist_id(), dir);
	}
}

impl std::fmt::Display for Playlist {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		return write!(f, "YouTube-playlist: {}", self.title().unwrap_or(UNKNOWN_TITLE));
	}
}

impl std::fmt::Debug for Playlist {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		return write!(f, "Playlist(playlist_id={})", self.playlist_id().unwrap_or("None"));
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::traits::data_source::test_utils::{
		MockPage,
		MockSource,
	};
	use serde_json::json;
	use std::sync::RwLock;

	const PLAYLIST_ID: &str = "PLguYHBi01DWr4bRWc4uaguASmo7lW4GCb";
	const PLAYLIST_TITLE: &str = "Редакция. АнтиТревел";

	/// Test utility function for easy callbacks
	fn callback_counter(c: &RwLock<Vec<AggregateProgress>>) -> impl FnMut(AggregateProgress) + '_ {
		return |imp| {
			c.write().expect("write failed").push(imp);
		};
	}

	fn playlist_set(id: &str, title: &str) -> RecordSet {
		return serde_json::from_value(json!({
			"kind": "youtube#playlistListResponse",
			"pageInfo": { "totalResults": 1, "resultsPerPage": 50 },
			"items": [{
				"kind": "youtube#playlist",
				"id": id,
				"snippet": { "title": title, "channelTitle": "Редакция" },
				"contentDetails": { "itemCount": 3 }
			}]
		}))
		.expect("Expected the fixture to deserialize");
	}

	/// Three members over two pages, durations 6738s, 11253s and 2400s
	fn source() -> MockSource {
		let mut source = MockSource::default()
			.with_video("BBotskuyw_M", "Пушкин: наше все?", 18491, "PT1H52M18S")
			.with_video("9lO06Zxhu88", "Russian Silicon Valley", 976215, "PT3H7M33S")
			.with_video("9Bv2zltQKQA", "Последний город в Европе", 1190871, "PT40M")
			.with_pages(PLAYLIST_ID, vec![
				MockPage::Ok(vec!["BBotskuyw_M", "9lO06Zxhu88"], Some("1")),
				MockPage::Ok(vec!["9Bv2zltQKQA"], None),
			]);
		source
			.playlists
			.insert(PLAYLIST_ID.to_owned(), playlist_set(PLAYLIST_ID, PLAYLIST_TITLE));

		return source;
	}

	#[test]
	fn test_get_attributes() {
		let source = source();
		let playlist = Playlist::fetch(&source, PLAYLIST_ID).expect("Expected fetch to be OK");

		assert_eq!(Some(PLAYLIST_ID), playlist.playlist_id());
		assert_eq!(Some(PLAYLIST_TITLE), playlist.title());
		assert_eq!(
			Some("https://www.youtube.com/playlist?list=PLguYHBi01DWr4bRWc4uaguASmo7lW4GCb"),
			playlist.url()
		);
		assert_eq!(
			Some(
				&[
					"BBotskuyw_M".to_owned(),
					"9lO06Zxhu88".to_owned(),
					"9Bv2zltQKQA".to_owned()
				][..]
			),
			playlist.member_video_ids()
		);
		assert!(!playlist.is_truncated());
	}

	#[test]
	fn test_display() {
		let source = source();
		let playlist = Playlist::fetch(&source, PLAYLIST_ID).expect("Expected fetch to be OK");

		assert_eq!("YouTube-playlist: Редакция. АнтиТревел", playlist.to_string());
		assert_eq!(
			"Playlist(playlist_id=PLguYHBi01DWr4bRWc4uaguASmo7lW4GCb)",
			format!("{:?}", playlist)
		);
	}

	#[test]
	fn test_total_duration() {
		let source = source();
		let playlist = Playlist::fetch(&source, PLAYLIST_ID).expect("Expected fetch to be OK");

		assert_eq!(
			TimeDelta::seconds(6738 + 11253 + 2400),
			playlist.total_duration(&source).expect("Expected aggregation to be OK")
		);
	}

	#[test]
	fn test_total_duration_progress() {
		let source = source();
		let playlist = Playlist::fetch(&source, PLAYLIST_ID).expect("Expected fetch to be OK");
		let pgcounter = RwLock::new(Vec::<AggregateProgress>::new());

		playlist
			.total_duration_with_progress(&source, callback_counter(&pgcounter))
			.expect("Expected aggregation to be OK");

		assert_eq!(
			vec![
				AggregateProgress::Starting,
				AggregateProgress::SizeHint(3),
				AggregateProgress::Increase(1, 0),
				AggregateProgress::Increase(1, 1),
				AggregateProgress::Increase(1, 2),
				AggregateProgress::Finished(3)
			],
			*pgcounter.read().expect("read failed")
		);
	}

	#[test]
	fn test_total_duration_skips_missing() {
		let source = source().with_pages(PLAYLIST_ID, vec![MockPage::Ok(
			vec!["BBotskuyw_M", "deleted", "9lO06Zxhu88"],
			None,
		)]);
		let playlist = Playlist::fetch(&source, PLAYLIST_ID).expect("Expected fetch to be OK");
		let pgcounter = RwLock::new(Vec::<AggregateProgress>::new());

		assert_eq!(
			TimeDelta::seconds(6738 + 11253),
			playlist
				.total_duration_with_progress(&source, callback_counter(&pgcounter))
				.expect("Expected aggregation to be OK")
		);
		assert_eq!(
			Some(&AggregateProgress::Finished(2)),
			pgcounter.read().expect("read failed").last()
		);
	}

	#[test]
	fn test_aggregation_fails_on_transport() {
		let mut source = source();
		source.failing.push("9lO06Zxhu88".to_owned());
		let playlist = Playlist::fetch(&source, PLAYLIST_ID).expect("Expected fetch to be OK");

		let err = playlist
			.total_duration(&source)
			.expect_err("Expected Assert to test Result to be ERR");
		assert!(err.is_transport());

		let err = playlist
			.best_video(&source)
			.expect_err("Expected Assert to test Result to be ERR");
		assert!(err.is_transport());
	}

	#[test]
	fn test_best_video() {
		let source = source();
		let playlist = Playlist::fetch(&source, PLAYLIST_ID).expect("Expected fetch to be OK");

		let best = playlist
			.best_video(&source)
			.expect("Expected aggregation to be OK")
			.expect("Expected a best video");
		assert_eq!(Some("9Bv2zltQKQA"), best.video_id());
		assert_eq!(
			Some("https://www.youtube.com/watch?v=9Bv2zltQKQA".to_owned()),
			playlist.best_video_url(&source).expect("Expected aggregation to be OK")
		);
	}

	#[test]
	fn test_best_video_tie_keeps_earliest() {
		let source = MockSource::default()
			.with_video("first", "First", 500, "PT1M")
			.with_video("second", "Second", 700, "PT1M")
			.with_video("third", "Third", 700, "PT1M")
			.with_pages("PLtie", vec![MockPage::Ok(vec!["first", "second", "third"], None)]);
		let playlist = Playlist::fetch(&source, "PLtie").expect("Expected fetch to be OK");

		assert_eq!(
			Some("https://www.youtube.com/watch?v=second".to_owned()),
			playlist.best_video_url(&source).expect("Expected aggregation to be OK")
		);
	}

	#[test]
	fn test_best_video_zero_likes() {
		let source = MockSource::default()
			.with_video("nolikes", "No Likes", 0, "PT1M")
			.with_pages("PLzero", vec![MockPage::Ok(vec!["missing", "nolikes"], None)]);
		let playlist = Playlist::fetch(&source, "PLzero").expect("Expected fetch to be OK");

		assert_eq!(
			Some("https://www.youtube.com/watch?v=nolikes".to_owned()),
			playlist.best_video_url(&source).expect("Expected aggregation to be OK")
		);
	}

	#[test]
	fn test_aggregations_do_not_cache() {
		let source = source();
		let playlist = Playlist::fetch(&source, PLAYLIST_ID).expect("Expected fetch to be OK");

		playlist.total_duration(&source).expect("Expected aggregation to be OK");
		playlist.best_video(&source).expect("Expected aggregation to be OK");

		assert_eq!(2, source.count_calls("video:9Bv2zltQKQA"));
		assert_eq!(6, source.count_calls("video:"));
		// enumeration only happens once, at construction
		assert_eq!(2, source.count_calls("items:"));
	}

	#[test]
	fn test_truncated_enumeration() {
		let source = source().with_pages(PLAYLIST_ID, vec![
			MockPage::Ok(vec!["BBotskuyw_M", "9lO06Zxhu88"], Some("1")),
			MockPage::Fail,
		]);
		let playlist = Playlist::fetch(&source, PLAYLIST_ID).expect("Expected fetch to be OK");

		assert!(playlist.is_truncated());
		assert_eq!(2, playlist.member_video_ids().map(<[String]>::len).unwrap_or(0));
		assert_eq!(
			TimeDelta::seconds(6738 + 11253),
			playlist.total_duration(&source).expect("Expected aggregation to be OK")
		);
	}

	#[test]
	fn test_incorrect_playlist_id() {
		let source = MockSource::default();
		let playlist = Playlist::fetch(&source, "test").expect("Expected fetch to be OK");

		assert_eq!(Some("test"), playlist.playlist_id());
		assert_eq!(None, playlist.title());
		assert_eq!(None, playlist.url());
		assert_eq!(Some(&[][..]), playlist.member_video_ids());
		assert_eq!(
			TimeDelta::zero(),
			playlist.total_duration(&source).expect("Expected aggregation to be OK")
		);
		assert_eq!(None, playlist.best_video_url(&source).expect("Expected aggregation to be OK"));
	}

	#[test]
	fn test_from_snapshot() {
		let dir = tempfile::tempdir().expect("Expected a temporary directory");
		let path = dir.path().join("playlist.json");
		playlist_set("PLv_zOGKKxVpj-n2qLkEM2Hj96LO6uqgQw", "[Вся правда о НАТО]")
			.write_to_file(&path)
			.expect("Expected write to be OK");

		let playlist = Playlist::from_snapshot(&path).expect("Expected the snapshot to load");
		assert_eq!(Some("[Вся правда о НАТО]"), playlist.title());
		assert_eq!(
			Some("https://www.youtube.com/playlist?list=PLv_zOGKKxVpj-n2qLkEM2Hj96LO6uqgQw"),
			playlist.url()
		);
		assert_eq!(None, playlist.member_video_ids());

		let source = MockSource::default();
		assert_eq!(
			TimeDelta::zero(),
			playlist.total_duration(&source).expect("Expected aggregation to be OK")
		);
		assert_eq!(None, playlist.best_video(&source).expect("Expected aggregation to be OK"));
		assert!(source.calls.borrow().is_empty());
	}

	#[test]
	fn test_to_snapshot() {
		let dir = tempfile::tempdir().expect("Expected a temporary directory");
		let source = source();
		let playlist = Playlist::fetch(&source, PLAYLIST_ID).expect("Expected fetch to be OK");

		let path = playlist.to_snapshot(dir.path()).expect("Expected export to be OK");
		assert_eq!(dir.path().join(format!("{}.json", PLAYLIST_ID)), path);

		let loaded = Playlist::from_snapshot(&path).expect("Expected the snapshot to load");
		assert_eq!(playlist.title(), loaded.title());
		assert_eq!(playlist.url(), loaded.url());
	}

	#[test]
	fn test_live_without_source() {
		assert_eq!(
			Err(crate::Error::invalid_construction_arguments(
				"A live playlist requires a data source"
			)),
			Playlist::from_source::<MockSource>(None, Source::live(PLAYLIST_ID))
		);
	}
}
