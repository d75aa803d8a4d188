//! Module for the remote API [`crate::traits::data_source::DataSource`] implementation

pub mod config;
pub mod youtube;
