//! Module for the data types shared by all entities

pub mod duration;
pub mod record_set;
