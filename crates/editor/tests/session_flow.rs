//! End-to-end session flow: edits in, save signals out

use std::time::Duration;

use editor::{Document, EditorSession, SavePolicy, SaveSignal, SaveStatus};

/// Let spawned timer tasks run up to their next await point.
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

async fn advance_ms(ms: u64) {
    tokio::time::advance(Duration::from_millis(ms)).await;
    settle().await;
}

#[tokio::test(start_paused = true)]
async fn typing_burst_saves_once() {
    let doc = Document::new("Your Research Paper Title");
    let (mut session, mut signals) = EditorSession::open(doc, SavePolicy::default());

    session.apply_edit("The res");
    settle().await;
    advance_ms(500).await;
    session.apply_edit("The results demo");
    settle().await;
    advance_ms(500).await;
    session.apply_edit("The results demonstrate a correlation.");
    settle().await;

    // Debounce holds while the burst continues
    assert!(!session.is_saving());

    // Quiet period elapses; the one coalesced save runs
    advance_ms(2100).await;
    assert!(session.is_saving());
    advance_ms(1500).await;
    assert!(!session.is_saving());

    assert_eq!(signals.events.try_recv(), Ok(SaveSignal::AutoSaved));
    assert!(signals.events.try_recv().is_err());
    assert_eq!(
        session.document().content(),
        "The results demonstrate a correlation."
    );
}

#[tokio::test(start_paused = true)]
async fn status_signal_tracks_save_lifecycle() {
    let doc = Document::new("Paper");
    let (mut session, signals) = EditorSession::open(doc, SavePolicy::default());
    let mut status = signals.status;

    assert_eq!(*status.borrow(), SaveStatus::Idle);

    session.append_paragraph("A paragraph of prose.");
    settle().await;
    advance_ms(2000).await;
    assert_eq!(*status.borrow_and_update(), SaveStatus::Saving);

    advance_ms(1500).await;
    assert_eq!(*status.borrow_and_update(), SaveStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn manual_save_acknowledged_immediately() {
    let doc = Document::new("Paper");
    let (session, mut signals) = EditorSession::open(doc, SavePolicy::default());

    session.save_now();
    assert_eq!(signals.events.try_recv(), Ok(SaveSignal::ManualSaved));
}

#[tokio::test(start_paused = true)]
async fn close_cancels_pending_autosave() {
    let doc = Document::new("Paper");
    let (mut session, mut signals) = EditorSession::open(doc, SavePolicy::default());

    session.append_paragraph("Edited just before closing.");
    settle().await;
    session.close();

    advance_ms(60_000).await;
    assert_eq!(*signals.status.borrow(), SaveStatus::Idle);
    assert!(signals.events.try_recv().is_err());
}
