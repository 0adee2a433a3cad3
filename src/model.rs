use serde::Serialize;

/// One seismic event as parsed from the upstream feed. Fields carry the
/// source JSON values verbatim: no unit conversion, no rounding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuakeEvent {
    pub place: String,
    pub magnitude: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Event occurrence time, epoch milliseconds.
    pub occurred_at_ms: i64,
}
