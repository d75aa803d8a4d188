use crate::{
	clap_conf::{
		CliDerive,
		CommandChannel,
	},
	utils,
};
use libytinfo::entity::channel::Channel;

/// Handler function for the "channel" subcommand
/// This function is mainly to keep the code structured and sorted
#[inline]
pub fn command_channel(main_args: &CliDerive, sub_args: &CommandChannel) -> Result<(), crate::Error> {
	let from = sub_args.entity.source()?;
	let client = utils::data_source(main_args, from.is_live())?;

	let channel = Channel::from_source(client.as_ref(), from)?;

	println!("{channel}");
	utils::print_field("Id", channel.channel_id());
	utils::print_field("Title", channel.title());
	utils::print_field("Description", channel.description());
	utils::print_field("Link", channel.link());
	utils::print_field("Subscribers", channel.subscriber_count());
	utils::print_field("Videos", channel.video_count());
	utils::print_field("Views", channel.view_count());

	if let Some(dir) = &sub_args.export_dir {
		let path = channel.to_snapshot(dir)?;
		println!("Exported snapshot to \"{}\"", path.to_string_lossy());
	}

	return Ok(());
}
