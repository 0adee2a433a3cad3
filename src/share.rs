use crate::model::QuakeEvent;

const MAPS_BASE: &str = "https://www.google.com/maps?q=";
const USGS_EVENTS_PAGE: &str = "https://earthquake.usgs.gov/earthquakes/";

/// Plain-text share message for one event: place, magnitude, a map link in
/// `?q={latitude},{longitude}` form, and the upstream catalog page. The
/// caller hands it to whatever share mechanism is available.
pub fn compose_share_message(event: &QuakeEvent) -> String {
    format!(
        "Earthquake near {}, magnitude {}.\nMap: {}{},{}\nDetails: {}",
        event.place,
        event.magnitude,
        MAPS_BASE,
        event.latitude,
        event.longitude,
        USGS_EVENTS_PAGE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_contains_place_magnitude_and_map_link() {
        let event = QuakeEvent {
            place: "offshore Y".to_string(),
            magnitude: 5.1,
            latitude: -33.4,
            longitude: -70.6,
            occurred_at_ms: 0,
        };
        let msg = compose_share_message(&event);
        assert!(msg.contains("offshore Y"));
        assert!(msg.contains("5.1"));
        assert!(msg.contains("https://www.google.com/maps?q=-33.4,-70.6"));
        assert!(msg.contains(USGS_EVENTS_PAGE));
    }

    #[test]
    fn test_map_link_is_latitude_then_longitude() {
        let event = QuakeEvent {
            place: "A".to_string(),
            magnitude: 4.0,
            latitude: -56.0,
            longitude: -17.0,
            occurred_at_ms: 0,
        };
        let msg = compose_share_message(&event);
        assert!(msg.contains("maps?q=-56,-17"));
    }
}
