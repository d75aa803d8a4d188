//! Utils for the `ytinfo` binary

use crate::clap_conf::CliDerive;
use indicatif::{
	ProgressBar,
	ProgressDrawTarget,
};
use libytinfo::{
	api::{
		config::ApiConfig,
		youtube::YoutubeClient,
	},
	entity::playlist::AggregateProgress,
};
use std::time::Duration;

/// Helper function to set the progressbar to a draw target if mode is interactive
pub fn set_progressbar(bar: &ProgressBar, main_args: &CliDerive) {
	if main_args.is_interactive() {
		bar.set_draw_target(ProgressDrawTarget::stderr());
	}
}

/// Build the [`ApiConfig`] from the cli arguments (which also include the environment)
pub fn api_config(main_args: &CliDerive) -> Result<ApiConfig, crate::Error> {
	let Some(api_key) = main_args.api_key.as_ref() else {
		return Err(crate::Error::other(
			"A API key is required for live lookups, set \"--api-key\" or \"YOUTUBE_API_KEY\"",
		));
	};

	let mut config = ApiConfig::new(api_key.as_str());

	if let Some(base_url) = &main_args.api_base_url {
		config = config.with_base_url(base_url);
	}

	if let Some(timeout) = main_args.timeout_secs {
		config = config.with_timeout(Duration::from_secs(timeout));
	}

	return Ok(config);
}

/// Create a [`YoutubeClient`] if `needed`, so that snapshot-only commands do not require a API key
pub fn data_source(main_args: &CliDerive, needed: bool) -> Result<Option<YoutubeClient>, crate::Error> {
	if !needed {
		debug!("No live lookup requested, not creating a API client");
		return Ok(None);
	}

	return Ok(Some(YoutubeClient::new(api_config(main_args)?)?));
}

/// Format a optional value for display, [`None`] is shown as "None"
pub fn format_option<T: std::fmt::Display>(value: Option<T>) -> String {
	return match value {
		Some(v) => v.to_string(),
		None => "None".to_owned(),
	};
}

/// Print a single "name: value" line
pub fn print_field<T: std::fmt::Display>(name: &str, value: Option<T>) {
	println!("  {:<18} {}", format!("{name}:"), format_option(value));
}

/// Create the progress callback for a playlist aggregation named `what`
pub fn aggregate_progress<'a>(
	bar: &'a ProgressBar,
	main_args: &'a CliDerive,
	what: &'a str,
) -> impl FnMut(AggregateProgress) + 'a {
	return move |imp| {
		if main_args.is_interactive() {
			match imp {
				AggregateProgress::Starting => bar.set_position(0),
				AggregateProgress::SizeHint(v) => bar.set_length(v.try_into().unwrap_or(u64::MAX)),
				AggregateProgress::Increase(c, _i) => bar.inc(c.try_into().unwrap_or(u64::MAX)),
				AggregateProgress::Finished(v) => bar.finish_with_message(format!("Finished {what}, {v} contributing videos")),
				_ => (),
			}
		} else {
			match imp {
				AggregateProgress::Starting => println!("Starting {what}"),
				AggregateProgress::SizeHint(v) => println!("{what} SizeHint: {v}"),
				AggregateProgress::Increase(c, i) => println!("{what} Increase: {c}, Current Index: {i}"),
				AggregateProgress::Finished(v) => println!("{what} Finished, Contributing Videos: {v}"),
				_ => (),
			}
		}
	};
}
