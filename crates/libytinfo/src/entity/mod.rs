//! Module for the read-only entities ([`channel::Channel`], [`video::Video`], [`playlist_video::PlaylistVideo`], [`playlist::Playlist`])
//!
//! Every entity is hydrated exactly once from a [`Source`], computes all its fields at construction and never changes afterwards

use std::path::{
	Path,
	PathBuf,
};

use crate::data::record_set::RecordSet;

pub mod channel;
pub mod pager;
pub mod playlist;
pub mod playlist_video;
pub mod video;

/// Text used in user-facing strings when a entity has no title
pub const UNKNOWN_TITLE: &str = "<unknown>";

/// Where to hydrate a entity from, exactly one source is allowed
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
	/// Fetch the record from a [`crate::traits::data_source::DataSource`] by id
	Live(String),
	/// Load a snapshot file (a JSON [`RecordSet`]), no fetch is done
	Snapshot(PathBuf),
	/// Use a already loaded [`RecordSet`] verbatim, no fetch is done
	Record(RecordSet),
}

impl Source {
	/// Create a [`Source::Live`]
	pub fn live<I: Into<String>>(id: I) -> Self {
		return Self::Live(id.into());
	}

	/// Create a [`Source::Snapshot`]
	pub fn snapshot<P: AsRef<Path>>(path: P) -> Self {
		return Self::Snapshot(path.as_ref().to_path_buf());
	}

	/// Create a [`Source`] from two optional arguments (like from the command line)
	///
	/// Returns [`crate::error::ErrorInner::InvalidConstructionArguments`] if neither or both are given
	pub fn from_options<I, P>(id: Option<I>, snapshot: Option<P>) -> Result<Self, crate::Error>
	where
		I: Into<String>,
		P: AsRef<Path>,
	{
		return match (id, snapshot) {
			(Some(id), None) => Ok(Self::live(id)),
			(None, Some(path)) => Ok(Self::snapshot(path)),
			(None, None) => Err(crate::Error::invalid_construction_arguments(
				"Expected either a id or a snapshot, got neither",
			)),
			(Some(_), Some(_)) => Err(crate::Error::invalid_construction_arguments(
				"Expected either a id or a snapshot, got both",
			)),
		};
	}

	/// Get whether this source requires a fetch
	pub fn is_live(&self) -> bool {
		return matches!(self, Self::Live(_));
	}

	/// Resolve this source to a record, calling `fetch` only for [`Source::Live`]
	///
	/// The returned id is the given id for [`Source::Live`], otherwise the `id` of the first record item (if any)
	pub(crate) fn hydrate<F>(self, fetch: F) -> Result<Hydrated, crate::Error>
	where
		F: FnOnce(&str) -> Result<RecordSet, crate::Error>,
	{
		return match self {
			Self::Live(id) => {
				debug!("Hydrating \"{}\" from a live fetch", id);
				let record = fetch(&id)?;
				Ok(Hydrated { id: Some(id), record })
			},
			Self::Snapshot(path) => {
				debug!("Hydrating from snapshot \"{}\"", path.to_string_lossy());
				Ok(Hydrated::from_record(RecordSet::from_file(&path)?))
			},
			Self::Record(record) => Ok(Hydrated::from_record(record)),
		};
	}
}

/// The result of [`Source::hydrate`], only used while constructing a entity
#[derive(Debug)]
pub(crate) struct Hydrated {
	/// The primary id of the entity, if known
	pub id:     Option<String>,
	/// The record the fields are computed from
	pub record: RecordSet,
}

impl Hydrated {
	/// Use the record id as the primary id
	fn from_record(record: RecordSet) -> Self {
		let id = record.first_str("/id").map(ToOwned::to_owned);

		return Self { id, record };
	}
}

/// Write `record` as `<id>.json` into `dir`, returns the written path
pub(crate) fn write_snapshot<P: AsRef<Path>>(
	record: &RecordSet,
	id: Option<&str>,
	dir: P,
) -> Result<PathBuf, crate::Error> {
	let id = id.ok_or_else(|| {
		return crate::Error::missing_identifier("Cannot export a snapshot without a primary id");
	})?;
	let path = dir.as_ref().join(format!("{}.json", id));
	info!("Writing snapshot to \"{}\"", path.to_string_lossy());
	record.write_to_file(&path)?;

	return Ok(path);
}

#[cfg(test)]
mod test {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_from_options() {
		assert_eq!(
			Ok(Source::Live("someid".to_owned())),
			Source::from_options(Some("someid"), None::<&Path>)
		);
		assert_eq!(
			Ok(Source::Snapshot(PathBuf::from("/some/file.json"))),
			Source::from_options(None::<String>, Some("/some/file.json"))
		);
		assert_eq!(
			Err(crate::Error::invalid_construction_arguments(
				"Expected either a id or a snapshot, got neither"
			)),
			Source::from_options(None::<String>, None::<&Path>)
		);
		assert_eq!(
			Err(crate::Error::invalid_construction_arguments(
				"Expected either a id or a snapshot, got both"
			)),
			Source::from_options(Some("someid"), Some("/some/file.json"))
		);
	}

	#[test]
	fn test_hydrate_live_calls_fetch() {
		let hydrated = Source::live("someid")
			.hydrate(|id| {
				assert_eq!("someid", id);
				return Ok(RecordSet::default());
			})
			.expect("Expected hydrate to be OK");

		assert_eq!(Some("someid".to_owned()), hydrated.id);
		assert!(hydrated.record.is_empty());
	}

	#[test]
	fn test_hydrate_record_does_not_fetch() {
		let record = RecordSet::new(vec![json!({ "id": "recordid" })]);
		let hydrated = Source::Record(record.clone())
			.hydrate(|_| panic!("Expected no fetch for a record source"))
			.expect("Expected hydrate to be OK");

		assert_eq!(Some("recordid".to_owned()), hydrated.id);
		assert_eq!(record, hydrated.record);
	}

	#[test]
	fn test_write_snapshot_requires_id() {
		let dir = tempfile::tempdir().expect("Expected a temporary directory");

		assert_eq!(
			Err(crate::Error::missing_identifier(
				"Cannot export a snapshot without a primary id"
			)),
			write_snapshot(&RecordSet::default(), None, dir.path())
		);

		let path = write_snapshot(&RecordSet::default(), Some("someid"), dir.path()).expect("Expected write to be OK");
		assert_eq!(dir.path().join("someid.json"), path);
		assert!(path.exists());
	}
}
