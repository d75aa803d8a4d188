//! Library of "ytinfo", read-only YouTube channel, video and playlist entities plus playlist aggregations
//!
//! Every entity is hydrated exactly once, either live through a [`traits::data_source::DataSource`]
//! (like [`api::youtube::YoutubeClient`]) or from a snapshot file, and is immutable afterwards

#![allow(clippy::needless_return)]
#![warn(clippy::implicit_return)]

#[macro_use]
extern crate log;

pub mod api;
pub mod data;
pub mod entity;
pub mod error;
pub mod traits;
pub use error::Error;

pub use chrono;
