//! Module containing [`PlaylistItemPager`], the paginated enumeration of playlist members

use std::collections::HashSet;

use crate::{
	data::record_set::RecordSet,
	traits::data_source::DataSource,
};

/// State of a [`PlaylistItemPager`]
#[derive(Debug, Clone, PartialEq)]
pub enum PagerState {
	/// No page fetched yet
	Initial,
	/// The next page has this continuation token
	Next(String),
	/// The last page has been fetched
	Done,
	/// A page fetch failed, no more pages will be fetched
	Failed,
}

/// Iterator over the video ids of a playlist, one page ([`crate::traits::data_source::PLAYLIST_PAGE_SIZE`] items) per step
///
/// A failed page fetch ends the iteration, the ids of earlier pages stay valid (best-effort collection)
/// The error is kept and can be read with [`PlaylistItemPager::error`]
pub struct PlaylistItemPager<'a, D: DataSource + ?Sized> {
	/// Where to fetch pages from
	source:      &'a D,
	/// The playlist to enumerate
	playlist_id: String,
	/// Current state
	state:       PagerState,
	/// Amount of successfully fetched pages
	pages:       usize,
	/// The error that ended the iteration, if any
	error:       Option<crate::Error>,
	/// Every continuation token handed out so far
	seen_tokens: HashSet<String>,
}

impl<'a, D: DataSource + ?Sized> PlaylistItemPager<'a, D> {
	/// Create a new instance of [`PlaylistItemPager`] in [`PagerState::Initial`]
	pub fn new<I: Into<String>>(source: &'a D, playlist_id: I) -> Self {
		return Self {
			source,
			playlist_id: playlist_id.into(),
			state: PagerState::Initial,
			pages: 0,
			error: None,
			seen_tokens: HashSet::new(),
		};
	}

	/// Get the current state
	pub fn state(&self) -> &PagerState {
		return &self.state;
	}

	/// Get the amount of successfully fetched pages
	pub fn pages(&self) -> usize {
		return self.pages;
	}

	/// Get the error that ended the iteration, if it ended by a error
	pub fn error(&self) -> Option<&crate::Error> {
		return self.error.as_ref();
	}

	/// Get whether all pages have been fetched without a error
	pub fn is_complete(&self) -> bool {
		return self.state == PagerState::Done;
	}

	/// Reset to [`PagerState::Initial`], the next step will fetch the first page again
	pub fn restart(&mut self) {
		self.state = PagerState::Initial;
		self.pages = 0;
		self.error = None;
		self.seen_tokens.clear();
	}

	/// Fetch all remaining pages and collect their video ids
	pub fn collect_ids(&mut self) -> Vec<String> {
		let mut ids = Vec::new();
		for page in self.by_ref() {
			ids.extend(page);
		}

		return ids;
	}

	/// Move to [`PagerState::Failed`] and keep the error
	fn fail(&mut self, err: crate::Error) {
		if err.is_transport() {
			warn!(
				"Enumerating playlist \"{}\" stopped after {} pages because of a transport error: {}",
				self.playlist_id, self.pages, err
			);
		} else {
			warn!(
				"Enumerating playlist \"{}\" stopped after {} pages: {}",
				self.playlist_id, self.pages, err
			);
		}
		self.state = PagerState::Failed;
		self.error = Some(err);
	}
}

impl<D: DataSource + ?Sized> Iterator for PlaylistItemPager<'_, D> {
	type Item = Vec<String>;

	fn next(&mut self) -> Option<Self::Item> {
		let token = match &self.state {
			PagerState::Initial => None,
			PagerState::Next(token) => Some(token.clone()),
			PagerState::Done | PagerState::Failed => return None,
		};

		let page = match self.source.list_playlist_items(&self.playlist_id, token.as_deref()) {
			Ok(v) => v,
			Err(err) => {
				self.fail(err);
				return None;
			},
		};
		self.pages += 1;

		let ids = video_ids_of_page(&page);

		self.state = match page.next_page_token() {
			// a token that comes back (directly or in a cycle) would never end
			Some(next) if self.seen_tokens.contains(next) => {
				warn!(
					"Playlist \"{}\" returned the page token \"{}\" again, stopping",
					self.playlist_id, next
				);
				PagerState::Done
			},
			Some(next) => {
				debug!("Playlist \"{}\" has a next page \"{}\"", self.playlist_id, next);
				self.seen_tokens.insert(next.to_owned());
				PagerState::Next(next.to_owned())
			},
			None => PagerState::Done,
		};

		return Some(ids);
	}
}

/// Get the video ids of a playlist-items page in order, items without a video id are skipped
pub fn video_ids_of_page(page: &RecordSet) -> Vec<String> {
	return page
		.items()
		.iter()
		.filter_map(|item| {
			let id = item
				.pointer("/snippet/resourceId/videoId")
				.or_else(|| return item.pointer("/contentDetails/videoId"))
				.and_then(|v| return v.as_str());
			if id.is_none() {
				warn!("Skipping a playlist item without a video id");
			}

			return id.map(ToOwned::to_owned);
		})
		.collect();
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::traits::data_source::test_utils::{
		MockPage,
		MockSource,
	};
	use serde_json::json;

	#[test]
	fn test_single_page() {
		let source = MockSource::default().with_pages("PL1", vec![MockPage::Ok(vec!["a", "b", "c"], None)]);
		let mut pager = PlaylistItemPager::new(&source, "PL1");

		assert_eq!(&PagerState::Initial, pager.state());
		assert_eq!(vec!["a", "b", "c"], pager.collect_ids());
		assert!(pager.is_complete());
		assert_eq!(1, pager.pages());
		assert_eq!(None, pager.error());
	}

	#[test]
	fn test_multiple_pages_keep_order() {
		let source = MockSource::default().with_pages("PL1", vec![
			MockPage::Ok(vec!["a", "b"], Some("1")),
			MockPage::Ok(vec!["c", "d"], Some("2")),
			MockPage::Ok(vec!["e"], None),
		]);
		let mut pager = PlaylistItemPager::new(&source, "PL1");

		assert_eq!(Some(vec!["a".to_owned(), "b".to_owned()]), pager.next());
		assert_eq!(&PagerState::Next("1".to_owned()), pager.state());
		assert_eq!(vec!["c", "d", "e"], pager.collect_ids());
		assert!(pager.is_complete());
		assert_eq!(3, pager.pages());

		assert_eq!(
			vec!["items:PL1:", "items:PL1:1", "items:PL1:2"],
			*source.calls.borrow()
		);
	}

	#[test]
	fn test_failure_on_second_page_truncates() {
		let source = MockSource::default().with_pages("PL1", vec![
			MockPage::Ok(vec!["a", "b"], Some("1")),
			MockPage::Fail,
			MockPage::Ok(vec!["e"], None),
		]);
		let mut pager = PlaylistItemPager::new(&source, "PL1");

		assert_eq!(vec!["a", "b"], pager.collect_ids());
		assert_eq!(&PagerState::Failed, pager.state());
		assert!(!pager.is_complete());
		assert_eq!(1, pager.pages());
		assert!(pager.error().expect("Expected a error to be kept").is_transport());

		// no more fetches after a failure
		assert_eq!(None, pager.next());
		assert_eq!(2, source.count_calls("items:"));
	}

	#[test]
	fn test_failure_on_first_page() {
		let source = MockSource::default().with_pages("PL1", vec![MockPage::Fail]);
		let mut pager = PlaylistItemPager::new(&source, "PL1");

		assert_eq!(Vec::<String>::new(), pager.collect_ids());
		assert_eq!(&PagerState::Failed, pager.state());
	}

	#[test]
	fn test_restart() {
		let source = MockSource::default().with_pages("PL1", vec![
			MockPage::Ok(vec!["a"], Some("1")),
			MockPage::Ok(vec!["b"], None),
		]);
		let mut pager = PlaylistItemPager::new(&source, "PL1");

		assert_eq!(vec!["a", "b"], pager.collect_ids());
		pager.restart();
		assert_eq!(&PagerState::Initial, pager.state());
		assert_eq!(vec!["a", "b"], pager.collect_ids());
		assert_eq!(4, source.count_calls("items:"));
	}

	#[test]
	fn test_empty_page_with_token_continues() {
		let source = MockSource::default().with_pages("PL1", vec![
			MockPage::Ok(vec![], Some("1")),
			MockPage::Ok(vec!["b"], None),
		]);

		assert_eq!(vec!["b"], PlaylistItemPager::new(&source, "PL1").collect_ids());
	}

	#[test]
	fn test_repeated_token_stops() {
		let source = MockSource::default().with_pages("PL1", vec![
			MockPage::Ok(vec!["a"], Some("1")),
			MockPage::Ok(vec!["b"], Some("1")),
		]);
		let mut pager = PlaylistItemPager::new(&source, "PL1");

		assert_eq!(vec!["a", "b"], pager.collect_ids());
		assert!(pager.is_complete());
		assert_eq!(2, source.count_calls("items:"));
	}

	#[test]
	fn test_cycling_tokens_stop() {
		let source = MockSource::default().with_pages("PL1", vec![
			MockPage::Ok(vec!["a"], Some("1")),
			MockPage::Ok(vec!["b"], Some("2")),
			MockPage::Ok(vec!["c"], Some("1")),
		]);
		let mut pager = PlaylistItemPager::new(&source, "PL1");

		assert_eq!(3, pager.by_ref().take(20).count());
		assert!(pager.is_complete());
		assert_eq!(3, source.count_calls("items:"));

		// a restart forgets the tokens of the earlier run
		pager.restart();
		assert_eq!(vec!["a"], pager.next().expect("Expected a first page"));
		assert_eq!(&PagerState::Next("1".to_owned()), pager.state());
	}

	#[test]
	fn test_video_ids_of_page() {
		let page = RecordSet::new(vec![
			json!({ "snippet": { "resourceId": { "videoId": "a" } } }),
			json!({ "contentDetails": { "videoId": "b" } }),
			json!({ "snippet": { "title": "Deleted video" } }),
			json!({ "snippet": { "resourceId": { "videoId": "c" } }, "contentDetails": { "videoId": "c" } }),
		]);

		assert_eq!(vec!["a", "b", "c"], video_ids_of_page(&page));
	}
}
