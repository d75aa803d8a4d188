//! Module for various seam traits

pub mod data_source;
