//! Module for Clap related structs (derived)

#![deny(missing_docs)] // comments are used for "--help" generation, so it should always be defined

use clap::{
	ArgAction,
	Args,
	Parser,
	Subcommand,
};
use is_terminal::IsTerminal;
use libytinfo::entity::Source;
use std::path::PathBuf;

/// Trait to check and transform all Command Structures
trait Check {
	/// Check and transform self to be correct
	fn check(&mut self) -> Result<(), crate::Error>;
}

#[derive(Debug, Parser, Clone, PartialEq)]
#[command(author, version = env!("YTINFO_VERSION"), about, long_about = None)]
#[command(bin_name("ytinfo"))]
#[command(args_override_self(true))] // specifying a argument multiple times overwrites the earlier ones
#[command(disable_help_subcommand(true))] // Disable subcommand "help", only "-h --help" should be used
#[command(subcommand_negates_reqs(true))]
pub struct CliDerive {
	/// Set Loggin verbosity (0 - Default - WARN, 1 - INFO, 2 - DEBUG, 3 - TRACE)
	#[arg(short, long, action = ArgAction::Count)]
	pub verbosity:    u8,
	/// YouTube Data API key, required for any live lookup
	#[arg(long = "api-key", env = "YOUTUBE_API_KEY", hide_env_values = true)]
	pub api_key:      Option<String>,
	/// Base url of the YouTube Data API, like "https://www.googleapis.com/youtube/v3"
	#[arg(long = "api-base-url", env = "YTINFO_API_BASE_URL")]
	pub api_base_url: Option<String>,
	/// Timeout for a single API request, in seconds
	#[arg(long = "timeout", env = "YTINFO_TIMEOUT")]
	pub timeout_secs: Option<u64>,
	/// Explicitly set interactive / not interactive
	#[arg(long = "interactive")]
	pub explicit_tty: Option<bool>,
	/// Force Color to be active in any mode
	#[arg(long = "color")]
	pub force_color:  bool,

	#[command(subcommand)]
	pub subcommands: SubCommands,
}

impl CliDerive {
	/// Execute clap::Parser::parse and apply custom validation and transformation logic
	pub fn custom_parse() -> Result<Self, crate::Error> {
		let mut parsed = Self::parse();

		Check::check(&mut parsed)?;

		return Ok(parsed);
	}

	/// Get if the mode is interactive or not
	#[must_use]
	pub fn is_interactive(&self) -> bool {
		if let Some(explicit) = self.explicit_tty {
			return explicit;
		}

		return std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
	}

	/// Get if the colors are enabled or not
	#[must_use]
	pub fn enable_colors(&self) -> bool {
		return self.force_color | self.is_interactive();
	}
}

impl Check for CliDerive {
	fn check(&mut self) -> Result<(), crate::Error> {
		if self.timeout_secs == Some(0) {
			return Err(crate::Error::other("Timeout has to be at least 1 second"));
		}

		return Check::check(&mut self.subcommands);
	}
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum SubCommands {
	/// Show a channel, optionally export it as a snapshot
	Channel(CommandChannel),
	/// Show a video
	Video(CommandVideo),
	/// Show a video and whether it is part of a playlist
	PlaylistVideo(CommandPlaylistVideo),
	/// Show a playlist, optionally with its total duration and best video
	Playlist(CommandPlaylist),
	/// Compare the subscribers of two channels
	Compare(CommandCompare),
	/// Generate shell completions
	Completions(CommandCompletions),
}

impl Check for SubCommands {
	fn check(&mut self) -> Result<(), crate::Error> {
		match self {
			SubCommands::Channel(v) => return Check::check(v),
			SubCommands::Video(v) => return Check::check(v),
			SubCommands::PlaylistVideo(v) => return Check::check(v),
			SubCommands::Playlist(v) => return Check::check(v),
			SubCommands::Compare(v) => return Check::check(v),
			SubCommands::Completions(v) => return Check::check(v),
		}
	}
}

/// Where to load a entity from, either a id or a snapshot file
#[derive(Debug, Args, Clone, PartialEq)]
pub struct EntityArgs {
	/// The id to fetch from the API
	pub id:       Option<String>,
	/// Load from a snapshot file instead of the API
	#[arg(long = "snapshot")]
	pub snapshot: Option<PathBuf>,
}

impl EntityArgs {
	/// Get the [`Source`] to hydrate from
	pub fn source(&self) -> Result<Source, crate::Error> {
		return Source::from_options(self.id.clone(), self.snapshot.as_ref());
	}
}

impl Check for EntityArgs {
	fn check(&mut self) -> Result<(), crate::Error> {
		self.source()?;

		return Ok(());
	}
}

/// Show a channel
#[derive(Debug, Parser, Clone, PartialEq)]
pub struct CommandChannel {
	#[command(flatten)]
	pub entity:     EntityArgs,
	/// Export the channel as "<channel_id>.json" into this directory
	#[arg(long = "export")]
	pub export_dir: Option<PathBuf>,
}

impl Check for CommandChannel {
	fn check(&mut self) -> Result<(), crate::Error> {
		return Check::check(&mut self.entity);
	}
}

/// Show a video
#[derive(Debug, Parser, Clone, PartialEq)]
pub struct CommandVideo {
	#[command(flatten)]
	pub entity:     EntityArgs,
	/// Export the video as "<video_id>.json" into this directory
	#[arg(long = "export")]
	pub export_dir: Option<PathBuf>,
}

impl Check for CommandVideo {
	fn check(&mut self) -> Result<(), crate::Error> {
		return Check::check(&mut self.entity);
	}
}

/// Show a video and its membership in a playlist
#[derive(Debug, Parser, Clone, PartialEq)]
pub struct CommandPlaylistVideo {
	#[command(flatten)]
	pub entity:            EntityArgs,
	/// The playlist id to lookup the membership in
	#[arg(long = "playlist")]
	pub playlist_id:       Option<String>,
	/// Load the membership lookup from a snapshot file instead of the API
	#[arg(long = "playlist-snapshot")]
	pub playlist_snapshot: Option<PathBuf>,
}

impl CommandPlaylistVideo {
	/// Get the [`Source`] for the membership lookup
	pub fn playlist_source(&self) -> Result<Source, crate::Error> {
		return Source::from_options(self.playlist_id.clone(), self.playlist_snapshot.as_ref());
	}
}

impl Check for CommandPlaylistVideo {
	fn check(&mut self) -> Result<(), crate::Error> {
		self.playlist_source()?;

		return Check::check(&mut self.entity);
	}
}

/// Show a playlist
#[derive(Debug, Parser, Clone, PartialEq)]
pub struct CommandPlaylist {
	#[command(flatten)]
	pub entity:         EntityArgs,
	/// Fetch every member video and sum up their durations
	#[arg(long = "total-duration")]
	pub total_duration: bool,
	/// Fetch every member video and show the one with the most likes
	#[arg(long = "best-video")]
	pub best_video:     bool,
	/// Export the playlist as "<playlist_id>.json" into this directory
	#[arg(long = "export")]
	pub export_dir:     Option<PathBuf>,
}

impl Check for CommandPlaylist {
	fn check(&mut self) -> Result<(), crate::Error> {
		return Check::check(&mut self.entity);
	}
}

/// Compare two channels by subscribers
#[derive(Debug, Parser, Clone, PartialEq)]
pub struct CommandCompare {
	/// Id of the first channel (positional ids are assigned to the first channel first)
	pub channel_a:  Option<String>,
	/// Id of the second channel
	pub channel_b:  Option<String>,
	/// Load the first channel from a snapshot file
	#[arg(long = "snapshot-a")]
	pub snapshot_a: Option<PathBuf>,
	/// Load the second channel from a snapshot file
	#[arg(long = "snapshot-b")]
	pub snapshot_b: Option<PathBuf>,
}

impl CommandCompare {
	/// Get the [`Source`] for both channels
	pub fn sources(&self) -> Result<(Source, Source), crate::Error> {
		// a single positional id belongs to the channel that has no snapshot
		let (id_a, id_b) = match (&self.channel_a, &self.channel_b, &self.snapshot_a) {
			(Some(id), None, Some(_)) => (None, Some(id.clone())),
			(a, b, _) => (a.clone(), b.clone()),
		};

		return Ok((
			Source::from_options(id_a, self.snapshot_a.as_ref())?,
			Source::from_options(id_b, self.snapshot_b.as_ref())?,
		));
	}
}

impl Check for CommandCompare {
	fn check(&mut self) -> Result<(), crate::Error> {
		self.sources()?;

		return Ok(());
	}
}

/// Generate shell completions
#[derive(Debug, Parser, Clone, PartialEq)]
pub struct CommandCompletions {
	/// Shell to generate completions for
	#[arg(value_enum)]
	pub shell:            clap_complete::Shell,
	/// Output path to write the completions to, default is to write to stdout
	#[arg(short = 'o', long = "out")]
	pub output_file_path: Option<PathBuf>,
}

impl Check for CommandCompletions {
	fn check(&mut self) -> Result<(), crate::Error> {
		return Ok(());
	}
}
