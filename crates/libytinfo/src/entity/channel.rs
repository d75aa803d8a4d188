//! Module containing [`Channel`]

use std::{
	any::Any,
	path::{
		Path,
		PathBuf,
	},
};

use super::{
	Source,
	UNKNOWN_TITLE,
	write_snapshot,
};
use crate::{
	data::record_set::RecordSet,
	traits::data_source::DataSource,
};

/// A YouTube channel, hydrated once and read-only afterwards
///
/// The raw record is not accessible, only the computed fields are:
///
/// ```compile_fail
/// # use libytinfo::entity::channel::Channel;
/// let channel = Channel::from_snapshot("UCMCgOm8GZkHp8zJ6l7_hIuA.json").unwrap();
/// let _ = channel.record;
/// ```
///
/// And fields cannot be changed after construction:
///
/// ```compile_fail
/// # use libytinfo::entity::channel::Channel;
/// let mut channel = Channel::from_snapshot("UCMCgOm8GZkHp8zJ6l7_hIuA.json").unwrap();
/// channel.title = Some("new".to_owned());
/// ```
#[derive(Clone, PartialEq)]
pub struct Channel {
	channel_id:       Option<String>,
	title:            Option<String>,
	description:      Option<String>,
	link:             Option<String>,
	subscriber_count: Option<u64>,
	video_count:      Option<u64>,
	view_count:       Option<u64>,
	/// The record the fields were computed from, only kept for [`Channel::to_snapshot`]
	record:           RecordSet,
}

impl Channel {
	/// Fetch a channel by id from `source`
	pub fn fetch<D: DataSource + ?Sized, I: Into<String>>(source: &D, channel_id: I) -> Result<Self, crate::Error> {
		return Self::from_source(Some(source), Source::live(channel_id));
	}

	/// Load a channel from a snapshot file
	pub fn from_snapshot<P: AsRef<Path>>(path: P) -> Result<Self, crate::Error> {
		return Self::from_source::<dyn DataSource>(None, Source::snapshot(path));
	}

	/// Hydrate a channel from `from`
	///
	/// `source` is only required for [`Source::Live`], without it a live source is a [`crate::error::ErrorInner::InvalidConstructionArguments`]
	pub fn from_source<D: DataSource + ?Sized>(source: Option<&D>, from: Source) -> Result<Self, crate::Error> {
		let hydrated = from.hydrate(|id| {
			let Some(source) = source else {
				return Err(crate::Error::invalid_construction_arguments(
					"A live channel requires a data source",
				));
			};
			return source.fetch_channel(id);
		})?;
		let record = hydrated.record;

		return Ok(Self {
			channel_id: hydrated.id,
			title: record.first_str("/snippet/title").map(ToOwned::to_owned),
			description: record.first_str("/snippet/description").map(ToOwned::to_owned),
			link: record.first_str("/snippet/customUrl").map(ToOwned::to_owned),
			subscriber_count: record.first_count("/statistics/subscriberCount")?,
			video_count: record.first_count("/statistics/videoCount")?,
			view_count: record.first_count("/statistics/viewCount")?,
			record,
		});
	}

	/// Get the channel id
	pub fn channel_id(&self) -> Option<&str> {
		return self.channel_id.as_deref();
	}

	/// Get the channel title
	pub fn title(&self) -> Option<&str> {
		return self.title.as_deref();
	}

	/// Get the channel description
	pub fn description(&self) -> Option<&str> {
		return self.description.as_deref();
	}

	/// Get the channel custom url (like `@vdud`)
	pub fn link(&self) -> Option<&str> {
		return self.link.as_deref();
	}

	/// Get the subscriber count, [`None`] if the channel was not found or the count is hidden
	pub fn subscriber_count(&self) -> Option<u64> {
		return self.subscriber_count;
	}

	/// Get the amount of public videos
	pub fn video_count(&self) -> Option<u64> {
		return self.video_count;
	}

	/// Get the total view count
	pub fn view_count(&self) -> Option<u64> {
		return self.view_count;
	}

	/// Get the size of the channel, which is the subscriber count
	/// This is the only place where a unknown count is treated as `0`
	pub fn size(&self) -> u64 {
		return self.subscriber_count.unwrap_or(0);
	}

	/// Add the subscriber counts of both channels
	/// Returns [`None`] if either count is unknown
	pub fn add_subscribers(&self, other: &Channel) -> Option<u64> {
		return Some(self.subscriber_count?.saturating_add(other.subscriber_count?));
	}

	/// Get whether this channel has more subscribers than `other`
	/// Returns [`None`] if either count is unknown
	pub fn gt(&self, other: &Channel) -> Option<bool> {
		return Some(self.subscriber_count? > other.subscriber_count?);
	}

	/// Get whether this channel has less subscribers than `other`, the mirror of [`Channel::gt`]
	pub fn lt(&self, other: &Channel) -> Option<bool> {
		return other.gt(self);
	}

	/// Like [`Channel::add_subscribers`], but for a operand of unknown type
	/// Returns [`crate::error::ErrorInner::InvalidOperandType`] if `other` is not a [`Channel`]
	pub fn try_add(&self, other: &dyn Any) -> Result<Option<u64>, crate::Error> {
		return Ok(self.add_subscribers(downcast_operand(other, "add")?));
	}

	/// Like [`Channel::gt`], but for a operand of unknown type
	/// Returns [`crate::error::ErrorInner::InvalidOperandType`] if `other` is not a [`Channel`]
	pub fn try_gt(&self, other: &dyn Any) -> Result<Option<bool>, crate::Error> {
		return Ok(self.gt(downcast_operand(other, "compare")?));
	}

	/// Write the full record as `<channel_id>.json` into `dir`, which can later be loaded with [`Channel::from_snapshot`]
	pub fn to_snapshot<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, crate::Error> {
		return write_snapshot(&self.record, self.channel_id(), dir);
	}
}

/// Get `other` as a [`Channel`] or a [`crate::error::ErrorInner::InvalidOperandType`]
fn downcast_operand<'a>(other: &'a dyn Any, operation: &str) -> Result<&'a Channel, crate::Error> {
	return other.downcast_ref::<Channel>().ok_or_else(|| {
		return crate::Error::invalid_operand_type(format!(
			"Cannot {} a Channel with something that is not a Channel",
			operation
		));
	});
}

impl std::fmt::Display for Channel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		return write!(f, "YouTube-channel: {}", self.title().unwrap_or(UNKNOWN_TITLE));
	}
}

// custom Debug, to show the developer-facing form without the record
impl std::fmt::Debug for Channel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		return write!(f, "Channel(channel_id={})", self.channel_id().unwrap_or("None"));
	}
}
