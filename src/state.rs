//! Shared, read-mostly dashboard state.
//!
//! The poller publishes each new [`Snapshot`] with one atomic pointer swap; readers
//! load an `Arc` and render from it without locking. A reader sees either the old
//! snapshot or the new one, never a mix.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::dashboard::Snapshot;

#[derive(Debug, Default)]
pub struct DashboardState {
    current: ArcSwapOption<Snapshot>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, snapshot: Snapshot) {
        self.current.store(Some(Arc::new(snapshot)));
    }

    /// `None` until the first successful refresh.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.load_full()
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::averager::Aggregation;

    #[test]
    fn replace_swaps_whole_snapshot() {
        let state = DashboardState::new();
        assert!(state.current().is_none());

        let at = DateTime::parse_from_rfc3339("2024-08-01T09:00:00Z").unwrap();
        state.replace(Snapshot::new("a.csv", Aggregation::default(), at));
        let held = state.current().unwrap();

        state.replace(Snapshot::new("b.csv", Aggregation::default(), at));

        // Earlier readers keep their snapshot.
        assert_eq!(held.source_file, "a.csv");
        assert_eq!(state.current().unwrap().source_file, "b.csv");
    }
}
