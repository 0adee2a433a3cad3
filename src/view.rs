use crate::filter::filter_events;
use crate::model::QuakeEvent;

/// Owns the displayed event list. The list is replaced wholesale on every
/// refresh and every filter submission; it is never mutated in place.
#[derive(Default)]
pub struct EventView {
    events: Vec<QuakeEvent>,
}

impl EventView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[QuakeEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuakeEvent> {
        self.events.get(index)
    }

    /// Replace the displayed list after a successful fetch. A failed fetch
    /// must not call this; the previous list stays on screen.
    pub fn set_events(&mut self, events: Vec<QuakeEvent>) {
        self.events = events;
    }

    /// Replace the displayed list with the filtered subsequence. Filtering
    /// is destructive until the next refresh restores the full list.
    pub fn apply_filter(&mut self, query: &str) {
        self.events = filter_events(&self.events, query);
    }

    /// Render one line per event. The empty list gets an explicit
    /// no-results indicator rather than rendering nothing.
    pub fn render(&self, now_ms: i64) -> String {
        if self.events.is_empty() {
            return "  (no earthquakes match)\n".to_string();
        }
        let mut out = String::new();
        for (i, e) in self.events.iter().enumerate() {
            out.push_str(&format!(
                "{:>3}  M{:<4}  {:<44}  {}\n",
                i + 1,
                e.magnitude,
                e.place,
                elapsed_since(now_ms, e.occurred_at_ms)
            ));
        }
        out
    }
}

/// Elapsed time between now and the event, coarsest two units only.
pub fn elapsed_since(now_ms: i64, event_ms: i64) -> String {
    let elapsed = (now_ms - event_ms).max(0);
    let seconds = (elapsed / 1_000) % 60;
    let minutes = (elapsed / 60_000) % 60;
    let hours = (elapsed / 3_600_000) % 24;
    let days = elapsed / 86_400_000;

    if days > 0 {
        format!("{}d {}h ago", days, hours)
    } else if hours > 0 {
        format!("{}h {}m ago", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s ago", minutes, seconds)
    } else {
        format!("{}s ago", seconds)
    }
}
