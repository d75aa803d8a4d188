use crate::{
	clap_conf::{
		CliDerive,
		CommandCompare,
	},
	utils,
};
use libytinfo::entity::channel::Channel;

/// Handler function for the "compare" subcommand
/// This function is mainly to keep the code structured and sorted
#[inline]
pub fn command_compare(main_args: &CliDerive, sub_args: &CommandCompare) -> Result<(), crate::Error> {
	let (from_a, from_b) = sub_args.sources()?;
	let client = utils::data_source(main_args, from_a.is_live() || from_b.is_live())?;

	let channel_a = Channel::from_source(client.as_ref(), from_a)?;
	let channel_b = Channel::from_source(client.as_ref(), from_b)?;

	println!("A: {channel_a} ({} subscribers)", utils::format_option(channel_a.subscriber_count()));
	println!("B: {channel_b} ({} subscribers)", utils::format_option(channel_b.subscriber_count()));
	utils::print_field("A + B", channel_a.add_subscribers(&channel_b));
	utils::print_field("A > B", channel_a.gt(&channel_b));
	utils::print_field("B > A", channel_b.gt(&channel_a));

	return Ok(());
}
