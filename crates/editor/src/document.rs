//! In-memory document model
//!
//! Documents are never persisted; saves are simulated by the autosave
//! pipeline for the surrounding surface.

/// A research document being written.
#[derive(Debug, Clone, Default)]
pub struct Document {
    title: String,
    content: String,
}

impl Document {
    /// Create an empty document.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
        }
    }

    /// Create a document with initial content.
    pub fn with_content(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Replace the full content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Append a paragraph, separated from existing content by a blank line.
    pub fn append_paragraph(&mut self, text: &str) {
        if !self.content.is_empty() {
            self.content.push_str("\n\n");
        }
        self.content.push_str(text);
    }

    /// Whitespace-separated word count for the status line.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}
