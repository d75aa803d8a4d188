#![allow(clippy::needless_return)]
#![warn(clippy::implicit_return)]

#[macro_use]
extern crate log;

use libytinfo::Error;

mod clap_conf;
use clap_conf::*;

mod commands;
mod logger;
mod utils;

/// Main
fn main() -> Result<(), crate::Error> {
	let mut logger_handle = logger::setup_logger()?;

	let cli_matches = CliDerive::custom_parse()?;

	info!("CLI Verbosity is {}", cli_matches.verbosity);

	// only override "RUST_LOG" (or the default) when a verbosity is explicitly given
	if cli_matches.verbosity > 0 {
		logger_handle.set_new_spec(logger::spec_for_verbosity(cli_matches.verbosity)?);
	}

	colored::control::set_override(cli_matches.enable_colors());

	match &cli_matches.subcommands {
		SubCommands::Channel(v) => commands::channel::command_channel(&cli_matches, v),
		SubCommands::Video(v) => commands::video::command_video(&cli_matches, v),
		SubCommands::PlaylistVideo(v) => commands::playlist_video::command_playlist_video(&cli_matches, v),
		SubCommands::Playlist(v) => commands::playlist::command_playlist(&cli_matches, v),
		SubCommands::Compare(v) => commands::compare::command_compare(&cli_matches, v),
		SubCommands::Completions(v) => commands::completions::command_completions(&cli_matches, v),
	}?;

	return Ok(());
}
