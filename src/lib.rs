//! quakewatch: recent earthquakes from the USGS FDSN event service for a
//! fixed bounding box and rolling months-back window, with substring
//! filtering over place and magnitude.

pub mod config;
pub mod feed;
pub mod filter;
pub mod logging;
pub mod model;
pub mod refresh;
pub mod share;
pub mod view;
