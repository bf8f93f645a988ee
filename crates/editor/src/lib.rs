//! Writing workspace for ResearchOwl
//!
//! The editor session is the surface that hosts the autosave scheduler:
//! it owns the document, forwards content edits, and tears the scheduler
//! down when the session closes.

pub mod document;
pub mod session;

pub use document::Document;
pub use session::EditorSession;

// Signal types the hosting surface renders
pub use autosave::{SavePolicy, SaveSignal, SaveSignals, SaveStatus};
