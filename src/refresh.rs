use std::sync::atomic::{AtomicU64, Ordering};

pub type RefreshToken = u64;

/// Serializes overlapping refreshes. Every initiated fetch takes a fresh
/// token; a completion may only be applied while its token is still the most
/// recently issued one. A refresh started while another is in flight
/// invalidates the earlier token, so the applied result is always that of
/// the most recently initiated request and stale completions are discarded
/// instead of silently overwriting newer data.
#[derive(Default)]
pub struct RefreshGuard {
    generation: AtomicU64,
}

impl RefreshGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh; all previously issued tokens become stale.
    pub fn begin(&self) -> RefreshToken {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a completion carrying this token is still the latest one.
    pub fn is_current(&self, token: RefreshToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_monotonic() {
        let guard = RefreshGuard::new();
        let a = guard.begin();
        let b = guard.begin();
        assert!(b > a);
    }

    #[test]
    fn test_single_refresh_is_current() {
        let guard = RefreshGuard::new();
        let token = guard.begin();
        assert!(guard.is_current(token));
    }

    #[test]
    fn test_newer_refresh_invalidates_older() {
        let guard = RefreshGuard::new();
        let first = guard.begin();
        let second = guard.begin();
        assert!(!guard.is_current(first), "older token must be stale");
        assert!(guard.is_current(second));
    }

    #[test]
    fn test_latest_initiated_wins_regardless_of_completion_order() {
        let guard = RefreshGuard::new();
        let first = guard.begin();
        let second = guard.begin();
        // The slow first fetch completes last; it must still be discarded.
        assert!(guard.is_current(second));
        assert!(!guard.is_current(first));
    }
}
