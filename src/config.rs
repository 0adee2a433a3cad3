/// Query region as min/max latitude and longitude in decimal degrees.
///
/// Bounds are not validated here; an inverted box simply yields an empty or
/// error response from the upstream service.
#[derive(Debug, Clone, Copy)]
pub struct RegionBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

#[derive(Clone)]
pub struct Config {
    pub usgs_base: String,
    pub bounds: RegionBounds,
    pub months_back: u32,
    pub http_timeout_secs: u64,
}

impl Config {
    /// Defaults cover the configured region (southern South America) and a
    /// six-month window; every field can be overridden from the environment.
    pub fn from_env() -> Self {
        Self {
            usgs_base: std::env::var("USGS_BASE")
                .unwrap_or_else(|_| "https://earthquake.usgs.gov".to_string()),
            bounds: RegionBounds {
                min_latitude: env_f64("MIN_LATITUDE", -56.0),
                max_latitude: env_f64("MAX_LATITUDE", -17.0),
                min_longitude: env_f64("MIN_LONGITUDE", -76.0),
                max_longitude: env_f64("MAX_LONGITUDE", -66.0),
            },
            months_back: std::env::var("MONTHS_BACK").ok().and_then(|v| v.parse().ok()).unwrap_or(6),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(15),
        }
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds_cover_configured_region() {
        let cfg = Config::from_env();
        assert!(cfg.bounds.min_latitude <= cfg.bounds.max_latitude);
        assert!(cfg.bounds.min_longitude <= cfg.bounds.max_longitude);
        assert_eq!(cfg.bounds.min_latitude, -56.0);
        assert_eq!(cfg.bounds.max_latitude, -17.0);
        assert_eq!(cfg.bounds.min_longitude, -76.0);
        assert_eq!(cfg.bounds.max_longitude, -66.0);
    }

    #[test]
    fn test_default_window_and_timeout() {
        let cfg = Config::from_env();
        assert_eq!(cfg.months_back, 6);
        assert_eq!(cfg.http_timeout_secs, 15);
        assert_eq!(cfg.usgs_base, "https://earthquake.usgs.gov");
    }
}
