use crate::{
	clap_conf::{
		CliDerive,
		CommandVideo,
	},
	utils,
};
use libytinfo::{
	data::duration::format_duration,
	entity::video::Video,
};

/// Handler function for the "video" subcommand
/// This function is mainly to keep the code structured and sorted
#[inline]
pub fn command_video(main_args: &CliDerive, sub_args: &CommandVideo) -> Result<(), crate::Error> {
	let from = sub_args.entity.source()?;
	let client = utils::data_source(main_args, from.is_live())?;

	let video = Video::from_source(client.as_ref(), from)?;

	println!("{video}");
	print_video_fields(&video);

	if let Some(dir) = &sub_args.export_dir {
		let path = video.to_snapshot(dir)?;
		println!("Exported snapshot to \"{}\"", path.to_string_lossy());
	}

	return Ok(());
}

/// Print all fields of a [`Video`], shared with the "playlist-video" subcommand
pub fn print_video_fields(video: &Video) {
	utils::print_field("Id", video.video_id());
	utils::print_field("Title", video.title());
	utils::print_field("Url", video.url());
	utils::print_field("Views", video.view_count());
	utils::print_field("Likes", video.like_count());
	utils::print_field("Duration", video.duration().as_ref().map(format_duration));
}
