//! Module for all Logger related things

use colored::{
	Color,
	Colorize,
};
use flexi_logger::{
	DeferredNow,
	LogSpecification,
	Logger,
	LoggerHandle,
	Record,
	style,
};

/// Function for setting up the logger, defaults to "warn" unless "RUST_LOG" is set
#[inline]
pub fn setup_logger() -> Result<LoggerHandle, crate::Error> {
	let handle = Logger::try_with_env_or_str("warn")
		.map_err(|err| return crate::Error::other(format!("Could not parse the log specification: {err}")))?
		.adaptive_format_for_stderr(flexi_logger::AdaptiveFormat::Custom(log_format, color_log_format))
		.log_to_stderr()
		.start()
		.map_err(|err| return crate::Error::other(format!("Could not start the logger: {err}")))?;

	return Ok(handle);
}

/// Get the log specification for a cli verbosity (0 - WARN, 1 - INFO, 2 - DEBUG, 3 - TRACE)
pub fn spec_for_verbosity(verbosity: u8) -> Result<LogSpecification, crate::Error> {
	let level = match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		3 => "trace",
		_ => {
			return Err(crate::Error::other(
				"Expected verbosity integer range between 0 and 3 (inclusive)",
			));
		},
	};

	return LogSpecification::parse(level)
		.map_err(|err| return crate::Error::other(format!("Could not parse log level \"{level}\": {err}")));
}

/// ISO 8601 Time Format for logging
/// format to be "1977-11-30T13:30:30.000+0200"
pub const ISO8601_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Logging format for non-interactive output
/// Not Colored and not padded
///
/// Example Lines:
/// `[2022-03-02T13:42:43.374+0100 ERROR module]: test line`
/// `[2022-03-02T13:42:43.374+0100 WARN module::deeper]: test line`
pub fn log_format(w: &mut dyn std::io::Write, now: &mut DeferredNow, record: &Record) -> Result<(), std::io::Error> {
	return write!(
		w,
		"[{} {} {}]: {}", // dont pad anything for non-interactive logs
		now.format(ISO8601_TIME_FORMAT),
		record.level(),
		record.module_path().unwrap_or("<unnamed module>"),
		&record.args()
	);
}

/// Logging format for a tty
/// Colored and padded
///
/// Example Lines:
/// `[2022-03-02T13:42:43.374+0100 ERROR module]: test line`
/// `[2022-03-02T13:42:43.374+0100 WARN  module::deeper]: test line`
pub fn color_log_format(
	w: &mut dyn std::io::Write,
	now: &mut DeferredNow,
	record: &Record,
) -> Result<(), std::io::Error> {
	let level = record.level();
	return write!(
		w,
		"[{} {} {}]: {}",
		now.format(ISO8601_TIME_FORMAT).to_string().color(Color::BrightBlack), // Bright Black = Grey
		style(level).paint(format!("{level:5}")), // padded here, because the color characters would count in the format string
		record.module_path().unwrap_or("<unnamed module>"),
		&record.args()
	);
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_spec_for_verbosity() {
		for verbosity in 0..=3 {
			assert!(spec_for_verbosity(verbosity).is_ok());
		}

		assert_eq!(
			Err(crate::Error::other(
				"Expected verbosity integer range between 0 and 3 (inclusive)"
			)),
			spec_for_verbosity(4).map(|_| return ())
		);
	}
}
