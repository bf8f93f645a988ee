//! Status and confirmation signals published by the scheduler

use std::time::Duration;
use tokio::time::Instant;

/// Saving indicator consumed by the hosting surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    /// No save in flight.
    #[default]
    Idle,
    /// A simulated save is running.
    Saving,
}

impl SaveStatus {
    /// True while a save is in flight.
    pub fn is_saving(self) -> bool {
        matches!(self, Self::Saving)
    }
}

/// One-shot save confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveSignal {
    /// A debounced autosave completed.
    AutoSaved,
    /// A user-triggered save was acknowledged.
    ManualSaved,
}

/// Throttle for user-visible "saved" confirmations.
///
/// Tracks when the previous confirmation was shown and suppresses any
/// that land inside the window. Presentation-only: the save itself has
/// already completed by the time this is consulted.
#[derive(Debug)]
pub struct SavedNotifier {
    window: Duration,
    last_emitted: Option<Instant>,
}

impl SavedNotifier {
    /// Create a notifier with the given suppression window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_emitted: None,
        }
    }

    /// Record a confirmation attempt at `now`.
    ///
    /// Returns true if the confirmation should be shown; the notifier then
    /// remembers `now` as the last emission. Suppressed attempts leave the
    /// window anchored at the previous emission.
    pub fn should_emit(&mut self, now: Instant) -> bool {
        match self.last_emitted {
            Some(prev) if now.duration_since(prev) < self.window => false,
            _ => {
                self.last_emitted = Some(now);
                true
            }
        }
    }
}
