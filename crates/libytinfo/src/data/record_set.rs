//! Module containing [`RecordSet`], the envelope every remote lookup and every snapshot uses

use serde::{
	Deserialize,
	Deserializer,
	Serialize,
};
use serde_json::{
	Map,
	Value,
};
use std::{
	io::{
		BufReader,
		Read,
		Write,
	},
	path::Path,
};

use crate::error::IOErrorToError;

/// The `{ "items": [...] }` envelope returned by every API lookup
///
/// A empty `items` is the "not found" signal, it is never treated as a error
/// All other top-level fields (like `kind`, `etag`, `pageInfo`) are kept as-is, so that a exported snapshot contains the full record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordSet {
	/// The records of this set, in response order
	#[serde(default, deserialize_with = "null_as_empty")]
	items:           Vec<Value>,
	/// Continuation token for paginated lookups
	#[serde(rename = "nextPageToken", default, skip_serializing_if = "Option::is_none")]
	next_page_token: Option<String>,
	/// All other top-level fields, untouched
	#[serde(flatten)]
	rest:            Map<String, Value>,
}

impl RecordSet {
	/// Create a new instance of [`RecordSet`] with the given items
	pub fn new(items: Vec<Value>) -> Self {
		return Self {
			items,
			next_page_token: None,
			rest: Map::new(),
		};
	}

	/// Builder function to add a continuation token
	#[must_use]
	pub fn with_next_page_token<T: Into<String>>(mut self, token: T) -> Self {
		self.next_page_token = Some(token.into());

		return self;
	}

	/// Get all items of this set
	pub fn items(&self) -> &[Value] {
		return &self.items;
	}

	/// Get the first (and commonly only) item of this set
	pub fn first(&self) -> Option<&Value> {
		return self.items.first();
	}

	/// Get whether this set has no items ("not found")
	pub fn is_empty(&self) -> bool {
		return self.items.is_empty();
	}

	/// Get the continuation token, a empty token is treated as absent
	pub fn next_page_token(&self) -> Option<&str> {
		return self.next_page_token.as_deref().filter(|v| return !v.is_empty());
	}

	/// Get a nested field of the first item by a JSON pointer (like `/snippet/title`)
	/// Returns [`None`] if there is no first item or the field does not exist
	pub fn first_field(&self, pointer: &str) -> Option<&Value> {
		return self.first()?.pointer(pointer).filter(|v| return !v.is_null());
	}

	/// Get a nested string field of the first item
	/// Non-string values are treated as absent
	pub fn first_str(&self, pointer: &str) -> Option<&str> {
		return self.first_field(pointer)?.as_str();
	}

	/// Get a nested count of the first item
	/// The API sends counts as strings (`"10300000"`), but plain integers are also accepted
	pub fn first_count(&self, pointer: &str) -> Result<Option<u64>, crate::Error> {
		let Some(value) = self.first_field(pointer) else {
			return Ok(None);
		};

		return parse_count(value, pointer).map(Some);
	}

	/// Read a [`RecordSet`] from a reader containing JSON
	/// `location` is only used for error messages
	pub fn from_reader<R: Read, P: AsRef<Path>>(reader: R, location: P) -> Result<Self, crate::Error> {
		return serde_json::from_reader(reader).map_err(|err| return crate::Error::malformed_snapshot(err, location));
	}

	/// Load a snapshot file written by [`RecordSet::write_to_file`] (or saved from the API directly)
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, crate::Error> {
		let path = path.as_ref();
		debug!("Loading snapshot from \"{}\"", path.to_string_lossy());
		let file = std::fs::File::open(path).attach_path_err(path)?;

		return Self::from_reader(BufReader::new(file), path);
	}

	/// Write the current [`RecordSet`] to a writer, pretty-printed with tab indentation
	pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<(), crate::Error> {
		let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
		let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
		self.serialize(&mut serializer)?;

		return Ok(());
	}

	/// Write the current [`RecordSet`] to a File at `path`
	pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), crate::Error> {
		let path = path.as_ref();
		let mut file_writer = std::fs::File::create(path).attach_path_err(path)?;

		return self.write_to_writer(&mut file_writer);
	}
}

/// Deserialize `"items": null` the same as a missing `items`
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
	return Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default());
}

/// Parse a count value that is either a string of digits or a JSON integer
fn parse_count(value: &Value, pointer: &str) -> Result<u64, crate::Error> {
	return match value {
		Value::String(v) => v.trim().parse::<u64>().map_err(|_| {
			return crate::Error::malformed_record(format!("Expected \"{}\" to be a count, got \"{}\"", pointer, v));
		}),
		Value::Number(v) => v.as_u64().ok_or_else(|| {
			return crate::Error::malformed_record(format!(
				"Expected \"{}\" to be a non-negative integer, got \"{}\"",
				pointer, v
			));
		}),
		_ => Err(crate::Error::malformed_record(format!(
			"Expected \"{}\" to be a string or a number",
			pointer
		))),
	};
}
