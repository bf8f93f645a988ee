//! Editor session lifecycle
//!
//! One session per open document. The session exclusively owns the
//! autosave scheduler; closing (or dropping) the session cancels any
//! armed autosave timer so no callback can mutate state after teardown.

use autosave::{AutosaveScheduler, SavePolicy, SaveSignals};
use tracing::debug;

use crate::Document;

/// A live writing-workspace session.
pub struct EditorSession {
    document: Document,
    scheduler: AutosaveScheduler,
}

impl EditorSession {
    /// Open a session, handing back the save signals for the surface to
    /// render.
    pub fn open(document: Document, policy: SavePolicy) -> (Self, SaveSignals) {
        let (scheduler, signals) = AutosaveScheduler::new(policy);
        debug!("Editor session opened: {}", document.title());
        (
            Self {
                document,
                scheduler,
            },
            signals,
        )
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Replace the document content. Arms the debounced autosave.
    pub fn apply_edit(&mut self, content: impl Into<String>) {
        self.document.set_content(content);
        self.scheduler.content_changed();
    }

    /// Append a paragraph. Arms the debounced autosave.
    pub fn append_paragraph(&mut self, text: &str) {
        self.document.append_paragraph(text);
        self.scheduler.content_changed();
    }

    /// Toolbar save. Always acknowledged immediately.
    pub fn save_now(&self) {
        self.scheduler.manual_save();
    }

    /// Current saving indicator.
    pub fn is_saving(&self) -> bool {
        self.scheduler.is_saving()
    }

    /// Close the session, cancelling any armed autosave.
    ///
    /// Dropping the session has the same effect; this makes the teardown
    /// point explicit at call sites.
    pub fn close(self) {
        debug!(
            "Editor session closed: {} ({} words)",
            self.document.title(),
            self.document.word_count()
        );
        self.scheduler.shutdown();
    }
}
