//! Status-observer trait for intake events.
//!
//! Inject an `Arc<dyn IntakeObserver>` via
//! [`crate::config::IntakeConfigBuilder::observer`] to receive every state
//! transition and history append as it happens.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a terminal spinner, a GUI channel, or a log sink
//! without the library knowing anything about how the host application
//! communicates. Transitions within one attempt are strictly sequential, so
//! implementations never see concurrent calls from the same session; the
//! trait is still `Send + Sync` so a session can be moved across tasks.

use crate::history::HistoryEntry;
use crate::session::IntakeStatus;
use std::sync::Arc;

/// Called by an [`crate::session::IntakeSession`] as an attempt progresses.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait IntakeObserver: Send + Sync {
    /// Called on every status transition, after the session state changed.
    fn on_status(&self, status: IntakeStatus) {
        let _ = status;
    }

    /// Called when a successful upload is recorded, before the session
    /// reaches `Success`.
    fn on_history_recorded(&self, entry: &HistoryEntry) {
        let _ = entry;
    }
}

/// A no-op implementation for callers that don't need events.
pub struct NoopObserver;

impl IntakeObserver for NoopObserver {}

/// Convenience alias matching the type stored in [`crate::config::IntakeConfig`].
pub type Observer = Arc<dyn IntakeObserver>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct TrackingObserver {
        transitions: Mutex<Vec<IntakeStatus>>,
        recorded: AtomicUsize,
    }

    impl IntakeObserver for TrackingObserver {
        fn on_status(&self, status: IntakeStatus) {
            self.transitions.lock().unwrap().push(status);
        }

        fn on_history_recorded(&self, _entry: &HistoryEntry) {
            self.recorded.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_observer_does_not_panic() {
        let obs = NoopObserver;
        obs.on_status(IntakeStatus::Processing);
        obs.on_history_recorded(&HistoryEntry::new("a.jpg", "data:image/jpeg;base64,AA=="));
    }

    #[test]
    fn tracking_observer_receives_events() {
        let obs = TrackingObserver {
            transitions: Mutex::new(Vec::new()),
            recorded: AtomicUsize::new(0),
        };
        obs.on_status(IntakeStatus::Processing);
        obs.on_status(IntakeStatus::Uploading);
        obs.on_history_recorded(&HistoryEntry::new("a.jpg", "data:image/jpeg;base64,AA=="));
        obs.on_status(IntakeStatus::Success);

        assert_eq!(
            *obs.transitions.lock().unwrap(),
            vec![
                IntakeStatus::Processing,
                IntakeStatus::Uploading,
                IntakeStatus::Success
            ]
        );
        assert_eq!(obs.recorded.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_observer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Observer>();
        let obs: Observer = Arc::new(NoopObserver);
        obs.on_status(IntakeStatus::Idle);
    }
}
