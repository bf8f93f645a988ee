//! Autosave timing policy
//!
//! Two mechanisms keep save frequency under control:
//! 1. **Debounce delay**: after an edit, wait for a quiet period before
//!    saving, so rapid keystrokes coalesce into one save.
//! 2. **Minimum interval**: a fixed cooldown between completed saves even
//!    if edits keep arriving.
//!
//! Both are fixed constants with no backoff or adaptation.

use std::time::Duration;

/// Timing policy for the autosave scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavePolicy {
    /// Quiet period after the last edit before a save may fire.
    pub debounce: Duration,

    /// Minimum interval between completed saves.
    pub min_save_interval: Duration,

    /// Simulated latency of a save operation.
    pub save_latency: Duration,

    /// Minimum spacing between user-visible "saved" confirmations.
    pub notify_window: Duration,
}

impl SavePolicy {
    /// Default debounce delay (2 seconds).
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(2);

    /// Default minimum interval between saves (5 seconds).
    pub const DEFAULT_MIN_SAVE_INTERVAL: Duration = Duration::from_secs(5);

    /// Default simulated save latency (1.5 seconds).
    pub const DEFAULT_SAVE_LATENCY: Duration = Duration::from_millis(1500);

    /// Default saved-confirmation window (10 seconds).
    pub const DEFAULT_NOTIFY_WINDOW: Duration = Duration::from_secs(10);

    /// Create a policy with the default timings.
    pub fn new() -> Self {
        Self {
            debounce: Self::DEFAULT_DEBOUNCE,
            min_save_interval: Self::DEFAULT_MIN_SAVE_INTERVAL,
            save_latency: Self::DEFAULT_SAVE_LATENCY,
            notify_window: Self::DEFAULT_NOTIFY_WINDOW,
        }
    }

    /// Set the debounce delay.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the minimum interval between saves.
    pub fn with_min_save_interval(mut self, interval: Duration) -> Self {
        self.min_save_interval = interval;
        self
    }

    /// Set the simulated save latency.
    pub fn with_save_latency(mut self, latency: Duration) -> Self {
        self.save_latency = latency;
        self
    }

    /// Set the saved-confirmation window.
    pub fn with_notify_window(mut self, window: Duration) -> Self {
        self.notify_window = window;
        self
    }

    /// Decide whether a debounce firing may begin a save.
    ///
    /// `since_last_save` is `None` before the first save, which satisfies
    /// the cooldown trivially. A skipped firing is dropped outright; the
    /// scheduler never re-schedules it (the next edit re-arms the timer).
    pub fn save_decision(
        &self,
        is_saving: bool,
        since_last_save: Option<Duration>,
    ) -> SaveDecision {
        if is_saving {
            return SaveDecision::SkipInFlight;
        }
        if let Some(elapsed) = since_last_save {
            if elapsed < self.min_save_interval {
                return SaveDecision::SkipCooldown;
            }
        }
        SaveDecision::Begin
    }
}

impl Default for SavePolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of the debounce-expiry gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDecision {
    /// Start the save now.
    Begin,
    /// A save is already in flight; drop this firing.
    SkipInFlight,
    /// Too soon after the previous save; drop this firing.
    SkipCooldown,
}
