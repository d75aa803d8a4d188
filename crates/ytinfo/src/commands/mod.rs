//! Module for all commands

pub mod channel;
pub mod compare;
pub mod completions;
pub mod playlist;
pub mod playlist_video;
pub mod video;
