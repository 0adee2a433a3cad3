use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{Months, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::QuakeFeed;
use crate::config::{Config, RegionBounds};
use crate::model::QuakeEvent;

pub struct UsgsClient {
    client: Client,
    base: String,
}

impl UsgsClient {
    pub fn new(cfg: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(cfg.http_timeout_secs))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base: cfg.usgs_base.clone(),
        }
    }

    fn query_url(&self, bounds: RegionBounds, months_back: u32) -> Result<Url> {
        let (start, end) = query_window(Utc::now().date_naive(), months_back);
        let base = format!("{}/fdsnws/event/1/query", self.base);
        Url::parse_with_params(
            &base,
            &[
                ("format", "geojson".to_string()),
                ("starttime", start),
                ("endtime", end),
                ("minlatitude", bounds.min_latitude.to_string()),
                ("maxlatitude", bounds.max_latitude.to_string()),
                ("minlongitude", bounds.min_longitude.to_string()),
                ("maxlongitude", bounds.max_longitude.to_string()),
            ],
        )
        .with_context(|| format!("bad feed url: {}", base))
    }
}

/// Start and end of the query window, both `YYYY-MM-DD`. Subtracting
/// calendar months clamps to the last valid day of the target month.
pub fn query_window(today: NaiveDate, months_back: u32) -> (String, String) {
    let start = today
        .checked_sub_months(Months::new(months_back))
        .unwrap_or(today);
    (
        start.format("%Y-%m-%d").to_string(),
        today.format("%Y-%m-%d").to_string(),
    )
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    properties: Properties,
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Properties {
    place: String,
    mag: f64,
    time: i64,
}

#[derive(Deserialize)]
struct Geometry {
    // [longitude, latitude, depth]
    coordinates: Vec<f64>,
}

/// Parse a GeoJSON FeatureCollection body into events, upstream order
/// preserved. A missing or mistyped field fails the whole parse; the caller
/// never sees a partial list.
pub fn parse_feed(body: &str) -> Result<Vec<QuakeEvent>> {
    let collection: FeatureCollection =
        serde_json::from_str(body).context("malformed feed body")?;

    let mut events = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let coords = &feature.geometry.coordinates;
        if coords.len() < 2 {
            return Err(anyhow!(
                "feature has {} coordinates, need at least 2",
                coords.len()
            ));
        }
        events.push(QuakeEvent {
            place: feature.properties.place,
            magnitude: feature.properties.mag,
            longitude: coords[0],
            latitude: coords[1],
            occurred_at_ms: feature.properties.time,
        });
    }
    Ok(events)
}

#[async_trait]
impl QuakeFeed for UsgsClient {
    async fn fetch_recent(&self, bounds: RegionBounds, months_back: u32) -> Result<Vec<QuakeEvent>> {
        let url = self.query_url(bounds, months_back)?;
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(anyhow!("feed returned {}: {}", status, body));
        }
        parse_feed(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_query_window_six_months() {
        let (start, end) = query_window(d(2026, 8, 15), 6);
        assert_eq!(start, "2026-02-15");
        assert_eq!(end, "2026-08-15");
    }

    #[test]
    fn test_query_window_zero_months() {
        let (start, end) = query_window(d(2026, 8, 15), 0);
        assert_eq!(start, "2026-08-15");
        assert_eq!(end, "2026-08-15");
    }

    #[test]
    fn test_query_window_clamps_month_end() {
        // Aug 31 minus 6 months lands in February, which has no day 31.
        let (start, _) = query_window(d(2026, 8, 31), 6);
        assert_eq!(start, "2026-02-28");
        // Leap year February keeps the 29th.
        let (start, _) = query_window(d(2024, 3, 31), 1);
        assert_eq!(start, "2024-02-29");
    }

    #[test]
    fn test_query_window_crosses_year() {
        let (start, end) = query_window(d(2026, 1, 10), 6);
        assert_eq!(start, "2025-07-10");
        assert_eq!(end, "2026-01-10");
    }

    #[test]
    fn test_query_url_carries_all_parameters() {
        let cfg = Config::from_env();
        let client = UsgsClient::new(&cfg);
        let url = client.query_url(cfg.bounds, cfg.months_back).unwrap();
        let query = url.query().unwrap();
        assert!(url.as_str().starts_with("https://earthquake.usgs.gov/fdsnws/event/1/query?"));
        assert!(query.contains("format=geojson"));
        assert!(query.contains("starttime="));
        assert!(query.contains("endtime="));
        assert!(query.contains("minlatitude=-56"));
        assert!(query.contains("maxlatitude=-17"));
        assert!(query.contains("minlongitude=-76"));
        assert!(query.contains("maxlongitude=-66"));
    }

    #[test]
    fn test_parse_feed_missing_field_fails_whole_fetch() {
        // Second feature has no "mag"; the first must not leak out.
        let body = r#"{"features":[
            {"properties":{"place":"A","mag":4.0,"time":1},"geometry":{"coordinates":[-70.0,-30.0,10.0]}},
            {"properties":{"place":"B","time":2},"geometry":{"coordinates":[-70.0,-30.0,10.0]}}
        ]}"#;
        assert!(parse_feed(body).is_err());
    }

    #[test]
    fn test_parse_feed_mistyped_field_fails() {
        let body = r#"{"features":[
            {"properties":{"place":"A","mag":"strong","time":1},"geometry":{"coordinates":[-70.0,-30.0,10.0]}}
        ]}"#;
        assert!(parse_feed(body).is_err());
    }

    #[test]
    fn test_parse_feed_short_coordinates_fails() {
        let body = r#"{"features":[
            {"properties":{"place":"A","mag":4.0,"time":1},"geometry":{"coordinates":[-70.0]}}
        ]}"#;
        assert!(parse_feed(body).is_err());
    }

    #[test]
    fn test_parse_feed_coordinate_order_is_lon_lat() {
        let body = r#"{"features":[
            {"properties":{"place":"A","mag":4.0,"time":1},"geometry":{"coordinates":[-70.5,-33.4,55.0]}}
        ]}"#;
        let events = parse_feed(body).unwrap();
        assert_eq!(events[0].longitude, -70.5);
        assert_eq!(events[0].latitude, -33.4);
    }
}
