//! Module for parsing and formatting ISO 8601 durations (like `PT3H7M41S`)

use chrono::TimeDelta;
use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for the duration forms the API uses: weeks, days and a time part with hours, minutes and (fractional) seconds
/// Years and Months are not supported, because they have no fixed length
static ISO8601_DURATION_REGEX: Lazy<Regex> = Lazy::new(|| {
	return Regex::new(
		r"^P(?:(?P<weeks>\d+)W)?(?:(?P<days>\d+)D)?(?:T(?:(?P<hours>\d+)H)?(?:(?P<minutes>\d+)M)?(?:(?P<seconds>\d+)(?:[.,](?P<fraction>\d{1,9}))?S)?)?$",
	)
	.unwrap();
});

/// Parse a ISO 8601 duration string into a [`TimeDelta`]
///
/// A string that does not match is a error, not a absent value
pub fn parse_iso8601_duration<I: AsRef<str>>(input: I) -> Result<TimeDelta, crate::Error> {
	let input = input.as_ref();
	let malformed = || return crate::Error::malformed_duration(format!("Could not parse \"{}\" as a ISO 8601 duration", input));

	// the regex allows all parts to be empty, which is not a valid duration ("P" or "PT")
	if input.len() <= 1 || input.ends_with('T') {
		return Err(malformed());
	}

	let cap = ISO8601_DURATION_REGEX.captures(input).ok_or_else(malformed)?;

	let mut total_seconds: i64 = 0;
	for (name, multiplier) in [
		("weeks", 7 * 24 * 60 * 60),
		("days", 24 * 60 * 60),
		("hours", 60 * 60),
		("minutes", 60),
		("seconds", 1),
	] {
		let Some(part) = cap.name(name) else {
			continue;
		};
		let value: i64 = part.as_str().parse().map_err(|_| return malformed())?;
		total_seconds = value
			.checked_mul(multiplier)
			.and_then(|v| return total_seconds.checked_add(v))
			.ok_or_else(malformed)?;
	}

	let nanos: i64 = match cap.name("fraction") {
		Some(fraction) => {
			// pad to 9 digits, "5" is 500_000_000 nanoseconds
			let padded = format!("{:0<9}", fraction.as_str());
			padded.parse().map_err(|_| return malformed())?
		},
		None => 0,
	};

	let seconds = TimeDelta::try_seconds(total_seconds).ok_or_else(malformed)?;

	return seconds.checked_add(&TimeDelta::nanoseconds(nanos)).ok_or_else(malformed);
}

/// Format a [`TimeDelta`] as `H:MM:SS` (hours are not wrapped into days)
///
/// Example: 11253 seconds are formatted as `3:07:33`
pub fn format_duration(duration: &TimeDelta) -> String {
	let total = duration.num_seconds();
	let sign = if total < 0 { "-" } else { "" };
	let total = total.unsigned_abs();

	return format!(
		"{}{}:{:02}:{:02}",
		sign,
		total / 3600,
		(total % 3600) / 60,
		total % 60
	);
}
