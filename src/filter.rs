use crate::model::QuakeEvent;

/// Keep events whose lowercased place contains the query as a substring, or
/// whose magnitude's display string does. The query is trimmed and
/// lowercased first; an empty query matches everything. Input order is
/// preserved and the input slice is untouched.
pub fn filter_events(events: &[QuakeEvent], query: &str) -> Vec<QuakeEvent> {
    let needle = query.trim().to_lowercase();
    events
        .iter()
        .filter(|e| {
            e.place.to_lowercase().contains(&needle)
                || e.magnitude.to_string().contains(&needle)
        })
        .cloned()
        .collect()
}
