use crate::{
	clap_conf::{
		CliDerive,
		CommandPlaylistVideo,
	},
	commands::video::print_video_fields,
	utils,
};
use libytinfo::entity::playlist_video::PlaylistVideo;

/// Handler function for the "playlist-video" subcommand
/// This function is mainly to keep the code structured and sorted
#[inline]
pub fn command_playlist_video(main_args: &CliDerive, sub_args: &CommandPlaylistVideo) -> Result<(), crate::Error> {
	let video_from = sub_args.entity.source()?;
	let playlist_from = sub_args.playlist_source()?;
	let client = utils::data_source(main_args, video_from.is_live() || playlist_from.is_live())?;

	let video = PlaylistVideo::from_sources(client.as_ref(), video_from, playlist_from)?;

	println!("{video}");
	print_video_fields(video.video());
	utils::print_field("Member", Some(video.is_member()));
	utils::print_field("Playlist", Some(video.playlist_membership_id()));

	return Ok(());
}
