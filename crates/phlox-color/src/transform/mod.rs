//! Value-to-color transforms and their serializable configuration.

pub mod color_map;
pub mod params;
