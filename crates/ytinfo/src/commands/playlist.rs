use std::sync::LazyLock;

use crate::{
	clap_conf::{
		CliDerive,
		CommandPlaylist,
	},
	utils,
};
use indicatif::{
	ProgressBar,
	ProgressStyle,
};
use libytinfo::{
	api::youtube::YoutubeClient,
	data::duration::format_duration,
	entity::playlist::Playlist,
};

/// Style for the aggregation progress bars
static AGGREGATE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
	return ProgressStyle::default_bar()
		.template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
		.expect("Expected ProgressStyle template to be valid")
		.progress_chars("#>-");
});

/// Handler function for the "playlist" subcommand
/// This function is mainly to keep the code structured and sorted
#[inline]
pub fn command_playlist(main_args: &CliDerive, sub_args: &CommandPlaylist) -> Result<(), crate::Error> {
	let from = sub_args.entity.source()?;
	let client = utils::data_source(main_args, from.is_live())?;

	let playlist = Playlist::from_source(client.as_ref(), from)?;

	println!("{playlist}");
	utils::print_field("Id", playlist.playlist_id());
	utils::print_field("Title", playlist.title());
	utils::print_field("Url", playlist.url());
	utils::print_field("Members", playlist.member_video_ids().map(<[String]>::len));

	if playlist.is_truncated() {
		println!("Warning: not all pages of the playlist could be fetched, the member list is incomplete");
	}

	if sub_args.total_duration || sub_args.best_video {
		match &client {
			Some(client) => aggregate(main_args, sub_args, &playlist, client)?,
			None => println!("Aggregations are not available for a playlist loaded from a snapshot"),
		}
	}

	if let Some(dir) = &sub_args.export_dir {
		let path = playlist.to_snapshot(dir)?;
		println!("Exported snapshot to \"{}\"", path.to_string_lossy());
	}

	return Ok(());
}

/// Run the requested aggregations, each with its own progress bar
fn aggregate(
	main_args: &CliDerive,
	sub_args: &CommandPlaylist,
	playlist: &Playlist,
	client: &YoutubeClient,
) -> Result<(), crate::Error> {
	if sub_args.total_duration {
		let bar: ProgressBar = ProgressBar::hidden().with_style(AGGREGATE_STYLE.clone());
		utils::set_progressbar(&bar, main_args);

		let total = playlist.total_duration_with_progress(client, utils::aggregate_progress(&bar, main_args, "Total Duration"))?;
		utils::print_field("Total duration", Some(format_duration(&total)));
	}

	if sub_args.best_video {
		let bar: ProgressBar = ProgressBar::hidden().with_style(AGGREGATE_STYLE.clone());
		utils::set_progressbar(&bar, main_args);

		let best = playlist.best_video_with_progress(client, utils::aggregate_progress(&bar, main_args, "Best Video"))?;
		utils::print_field("Best video", best.as_ref().and_then(|v| return v.url()));
		utils::print_field("Best video likes", best.as_ref().and_then(|v| return v.like_count()));
	}

	return Ok(());
}
