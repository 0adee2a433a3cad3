use anyhow::Result;
use async_trait::async_trait;

use crate::config::RegionBounds;
use crate::model::QuakeEvent;

mod usgs;

pub use usgs::{parse_feed, query_window, UsgsClient};

/// Seam between the presentation loop and the upstream service, so the loop
/// can be driven by a stub in tests.
#[async_trait]
pub trait QuakeFeed {
    /// One fetch cycle: a single outbound request, a complete event list or
    /// an error, never partial results. No caching between invocations.
    async fn fetch_recent(&self, bounds: RegionBounds, months_back: u32) -> Result<Vec<QuakeEvent>>;
}
