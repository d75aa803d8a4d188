//! Module for the Error type this library uses

use std::{
	backtrace::Backtrace,
	io::Error as ioError,
	path::Path,
};

/// Macro to not repeat having to do multiple implementations of a [ErrorInner] variant with the same string type
macro_rules! fn_string {
	($fn_name:ident, $fortype:expr) => {
		#[doc = concat!("Create a new [Self] as [", stringify!($fortype), "]")]
		pub fn $fn_name<M>(msg: M) -> Self
		where
			M: Into<String>,
		{
			return Self::new($fortype(msg.into()));
		}
	};
}

/// Error type for libytinfo, contains a backtrace, wrapper around [ErrorInner]
#[derive(Debug)]
pub struct Error {
	/// The actual error
	source:    ErrorInner,
	/// The backtrace for the error
	backtrace: Backtrace,
}

impl Error {
	/// Construct a new [Error] instance based on [ErrorInner]
	pub fn new(source: ErrorInner) -> Self {
		return Self {
			source,
			backtrace: Backtrace::capture(),
		};
	}

	/// Get the backtrace that is stored
	pub fn get_backtrace(&self) -> &Backtrace {
		return &self.backtrace;
	}

	/// Get the inner error kind
	pub fn inner(&self) -> &ErrorInner {
		return &self.source;
	}

	/// Get whether this error came from talking to the remote API (connection, timeout, non-success status)
	/// Used by the playlist pager to decide on truncation
	pub fn is_transport(&self) -> bool {
		return matches!(
			self.source,
			ErrorInner::TransportFailure(_) | ErrorInner::ApiStatus(_, _)
		);
	}

	/// Create a new [Self] as [ErrorInner::ApiStatus]
	pub fn api_status<M>(status: u16, msg: M) -> Self
	where
		M: Into<String>,
	{
		return Self::new(ErrorInner::ApiStatus(status, msg.into()));
	}

	/// Create a new [Self] as [ErrorInner::MalformedSnapshot] with the path of the snapshot attached
	pub fn malformed_snapshot<P>(err: serde_json::Error, path: P) -> Self
	where
		P: AsRef<Path>,
	{
		return Self::new(ErrorInner::MalformedSnapshot(
			err,
			format_path(path.as_ref().to_string_lossy().to_string()),
		));
	}

	fn_string!(other, ErrorInner::Other);
	fn_string!(invalid_construction_arguments, ErrorInner::InvalidConstructionArguments);
	fn_string!(invalid_operand_type, ErrorInner::InvalidOperandType);
	fn_string!(malformed_duration, ErrorInner::MalformedDuration);
	fn_string!(malformed_record, ErrorInner::MalformedRecord);
	fn_string!(missing_identifier, ErrorInner::MissingIdentifier);
}

impl PartialEq for Error {
	fn eq(&self, other: &Self) -> bool {
		return self.source == other.source;
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		return self.source.fmt(f);
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		return self.source.source();
	}
}

// implement all From<> variants that ErrorInner also implements
impl<T> From<T> for Error
where
	T: Into<ErrorInner>,
{
	fn from(value: T) -> Self {
		return Self::new(value.into());
	}
}

/// Error type for "ytinfo", implements all Error types that could happen in this lib
#[derive(thiserror::Error, Debug)]
pub enum ErrorInner {
	/// Wrapper Variant for [`std::io::Error`]
	/// Argument 1 (String) is up to the implementation to set, commonly the path
	#[error("IoError: {0}; {1}")]
	IoError(std::io::Error, String),
	/// Variant for serde-json Errors not tied to a snapshot file
	#[error("SerdeJSONError: {0}")]
	SerdeJSONError(#[from] serde_json::Error),
	/// Variant for when a request to the remote API could not be completed
	#[error("TransportFailure: {0}")]
	TransportFailure(#[from] reqwest::Error),
	/// Variant for when the remote API answered with a non-success status
	#[error("ApiStatus: {0}; {1}")]
	ApiStatus(u16, String),

	/// Variant for when a entity was constructed without exactly one source
	#[error("InvalidConstructionArguments: {0}")]
	InvalidConstructionArguments(String),
	/// Variant for when a channel operator got a right operand that is not a channel
	#[error("InvalidOperandType: {0}")]
	InvalidOperandType(String),
	/// Variant for when a ISO 8601 duration could not be parsed
	#[error("MalformedDuration: {0}")]
	MalformedDuration(String),
	/// Variant for when a snapshot file did not contain a valid record set
	#[error("MalformedSnapshot: {0}; {1}")]
	MalformedSnapshot(serde_json::Error, String),
	/// Variant for when a field is present in a record, but has the wrong shape
	#[error("MalformedRecord: {0}")]
	MalformedRecord(String),
	/// Variant for when a identifier is required (like for exporting), but none is known
	#[error("MissingIdentifier: {0}")]
	MissingIdentifier(String),
	/// Variant for Other messages
	#[error("Other: {0}")]
	Other(String),
}

// this is custom, some errors like "std::io::Error" do not implement "PartialEq", but some inner type may do
impl PartialEq for ErrorInner {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::IoError(l0, l1), Self::IoError(r0, r1)) => return l0.kind() == r0.kind() && l1 == r1,
			(Self::SerdeJSONError(l0), Self::SerdeJSONError(r0)) => return l0.to_string() == r0.to_string(),
			(Self::TransportFailure(l0), Self::TransportFailure(r0)) => return l0.to_string() == r0.to_string(),
			(Self::ApiStatus(l0, l1), Self::ApiStatus(r0, r1)) => return l0 == r0 && l1 == r1,

			(Self::InvalidConstructionArguments(l0), Self::InvalidConstructionArguments(r0)) => return l0 == r0,
			(Self::InvalidOperandType(l0), Self::InvalidOperandType(r0)) => return l0 == r0,
			(Self::MalformedDuration(l0), Self::MalformedDuration(r0)) => return l0 == r0,
			(Self::MalformedSnapshot(l0, l1), Self::MalformedSnapshot(r0, r1)) => {
				return l0.to_string() == r0.to_string() && l1 == r1;
			},
			(Self::MalformedRecord(l0), Self::MalformedRecord(r0)) => return l0 == r0,
			(Self::MissingIdentifier(l0), Self::MissingIdentifier(r0)) => return l0 == r0,
			(Self::Other(l0), Self::Other(r0)) => return l0 == r0,

			(_, _) => return false,
		}
	}
}

/// Helper function to keep consistent formatting
#[inline]
fn format_path(msg: String) -> String {
	return format!("Path \"{}\"", msg);
}

/// Helper function to keep consistent formatting
#[inline]
fn format_location(msg: &str) -> String {
	return format!("Location \"{}\"", msg);
}

/// Trait to map [std::io::Error] into [Error]
pub trait IOErrorToError<T> {
	/// Map a [std::io::Error] to [Error] with a [std::path::Path] attached
	fn attach_path_err<P: AsRef<Path>>(self, path: P) -> Result<T, crate::Error>;
	/// Map a [std::io::Error] to [Error] with a location attached (for when [IOErrorToError::attach_path_err] is not applicable)
	fn attach_location_err<L: AsRef<str>>(self, location: L) -> Result<T, crate::Error>;
}

impl<T> IOErrorToError<T> for Result<T, ioError> {
	fn attach_path_err<P: AsRef<Path>>(self, path: P) -> Result<T, crate::Error> {
		return match self {
			Ok(v) => Ok(v),
			Err(e) => Err(crate::Error::new(ErrorInner::IoError(
				e,
				format_path(path.as_ref().to_string_lossy().to_string()),
			))),
		};
	}

	fn attach_location_err<L: AsRef<str>>(self, location: L) -> Result<T, crate::Error> {
		return match self {
			Ok(v) => Ok(v),
			Err(e) => Err(crate::Error::new(ErrorInner::IoError(
				e,
				format_location(location.as_ref()),
			))),
		};
	}
}
