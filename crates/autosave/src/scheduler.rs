//! Debounced, rate-limited autosave scheduling
//!
//! Converts a stream of content-edit events into a bounded sequence of
//! simulated save operations. At most one debounce timer is armed at any
//! instant; a new edit cancels and replaces it. A firing that lands while
//! a save is in flight, or inside the minimum-interval cooldown, is
//! dropped without rescheduling; the next edit re-arms the timer.
//!
//! All timer handles are fields of the scheduler instance. Dropping the
//! scheduler (or calling [`AutosaveScheduler::shutdown`]) aborts anything
//! armed or in flight, and every timer callback is guarded so a stray
//! wakeup after teardown is a silent no-op.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

use crate::policy::{SaveDecision, SavePolicy};
use crate::signal::{SaveSignal, SaveStatus, SavedNotifier};

/// Receiving side of the scheduler's output signals.
pub struct SaveSignals {
    /// Saving indicator; the current value is the scheduler status.
    pub status: watch::Receiver<SaveStatus>,
    /// One-shot save confirmations.
    pub events: mpsc::UnboundedReceiver<SaveSignal>,
}

/// Debounce/rate-limit scheduler for simulated saves.
///
/// Owned by a single editor session; state is never shared across
/// surfaces. Must be used from within a tokio runtime, since every
/// suspension point is a tokio timer.
pub struct AutosaveScheduler {
    shared: Arc<Shared>,
}

struct Shared {
    policy: SavePolicy,
    status_tx: watch::Sender<SaveStatus>,
    signal_tx: mpsc::UnboundedSender<SaveSignal>,
    state: Mutex<SaveState>,
}

/// Mutable scheduler condition.
///
/// Locked only in non-async sections, never across an await.
struct SaveState {
    /// True while a simulated save is in flight.
    is_saving: bool,
    /// Completion time of the last save. `None` before the first save,
    /// which satisfies the cooldown trivially.
    last_save: Option<Instant>,
    /// The one outstanding scheduled save. At most one exists at a time.
    pending: Option<PendingTimer>,
    /// The in-flight save task, held for teardown cancellation.
    save_task: Option<JoinHandle<()>>,
    /// Confirmation throttle.
    notifier: SavedNotifier,
    /// Monotonic sequence for armed timers.
    timer_seq: u64,
    /// Set once at teardown; everything afterwards is a no-op.
    shut_down: bool,
}

/// An armed debounce timer.
///
/// The sequence number decides ownership: a callback whose sequence no
/// longer matches was superseded between wakeup and lock acquisition and
/// must not touch state, even if its abort lost the race.
struct PendingTimer {
    seq: u64,
    handle: JoinHandle<()>,
}

impl AutosaveScheduler {
    /// Create a scheduler and the signal receivers for its hosting surface.
    pub fn new(policy: SavePolicy) -> (Self, SaveSignals) {
        let (status_tx, status_rx) = watch::channel(SaveStatus::Idle);
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();

        let shared = Arc::new(Shared {
            policy,
            status_tx,
            signal_tx,
            state: Mutex::new(SaveState {
                is_saving: false,
                last_save: None,
                pending: None,
                save_task: None,
                notifier: SavedNotifier::new(policy.notify_window),
                timer_seq: 0,
                shut_down: false,
            }),
        });

        (
            Self { shared },
            SaveSignals {
                status: status_rx,
                events: signal_rx,
            },
        )
    }

    /// Record a content edit.
    ///
    /// Cancels any armed debounce timer and arms a fresh one. Never starts
    /// a save by itself; only the timer expiry can do that.
    pub fn content_changed(&self) {
        let mut state = self.shared.state.lock();
        if state.shut_down {
            return;
        }

        if let Some(prev) = state.pending.take() {
            prev.handle.abort();
        }

        state.timer_seq += 1;
        let seq = state.timer_seq;
        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            sleep(shared.policy.debounce).await;
            debounce_elapsed(&shared, seq);
        });
        state.pending = Some(PendingTimer { seq, handle });
        trace!("Debounce timer armed (seq {})", seq);
    }

    /// User-triggered save.
    ///
    /// Always acknowledged immediately; does not enter the in-flight or
    /// cooldown machinery and is never deduplicated.
    pub fn manual_save(&self) {
        let state = self.shared.state.lock();
        if state.shut_down {
            return;
        }
        debug!("Manual save acknowledged");
        let _ = self.shared.signal_tx.send(SaveSignal::ManualSaved);
    }

    /// Current saving indicator.
    pub fn is_saving(&self) -> bool {
        self.shared.state.lock().is_saving
    }

    /// Completion time of the last save, if any.
    pub fn last_save(&self) -> Option<Instant> {
        self.shared.state.lock().last_save
    }

    /// Tear the scheduler down.
    ///
    /// Aborts any armed timer and any in-flight save. Subsequent calls and
    /// stray timer wakeups are silent no-ops; nothing is published after
    /// this returns.
    pub fn shutdown(&self) {
        let mut state = self.shared.state.lock();
        if state.shut_down {
            return;
        }
        state.shut_down = true;

        if let Some(pending) = state.pending.take() {
            pending.handle.abort();
        }
        if let Some(save) = state.save_task.take() {
            save.abort();
        }
        debug!("Autosave scheduler shut down");
    }
}

impl Drop for AutosaveScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Debounce timer expiry: decide whether this firing may begin a save.
fn debounce_elapsed(shared: &Arc<Shared>, seq: u64) {
    let mut state = shared.state.lock();
    if state.shut_down {
        return;
    }

    // A newer edit may have replaced this timer between wakeup and lock.
    let owns_pending = matches!(&state.pending, Some(p) if p.seq == seq);
    if !owns_pending {
        return;
    }
    state.pending = None;

    let since_last = state.last_save.map(|t| t.elapsed());
    match shared.policy.save_decision(state.is_saving, since_last) {
        SaveDecision::Begin => {
            state.is_saving = true;
            let _ = shared.status_tx.send(SaveStatus::Saving);
            let task = Arc::clone(shared);
            state.save_task = Some(tokio::spawn(run_save(task)));
            debug!("Autosave started");
        }
        SaveDecision::SkipInFlight => debug!("Autosave dropped: save already in flight"),
        SaveDecision::SkipCooldown => debug!("Autosave dropped: within cooldown window"),
    }
}

/// Simulated save: latency only, cannot fail.
async fn run_save(shared: Arc<Shared>) {
    sleep(shared.policy.save_latency).await;

    let mut state = shared.state.lock();
    if state.shut_down {
        return;
    }

    let now = Instant::now();
    state.is_saving = false;
    state.last_save = Some(now);
    state.save_task = None;
    let _ = shared.status_tx.send(SaveStatus::Idle);
    if state.notifier.should_emit(now) {
        let _ = shared.signal_tx.send(SaveSignal::AutoSaved);
    }
    debug!("Autosave completed");
}
