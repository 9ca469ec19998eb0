//! Open-document registry entries
//!
//! One `Document` per file the client currently has open, holding the
//! authoritative text as the client sees it. Rope-backed so incremental
//! change events stay cheap.

use ropey::Rope;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent};

/// The tracked text of one open document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Document content as rope for efficient edits
    rope: Rope,
    /// Document version from the client (increments on each change)
    version: i32,
}

impl Document {
    /// Create a new document from the didOpen text.
    pub fn new(text: String, version: i32) -> Self {
        Self {
            rope: Rope::from_str(&text),
            version,
        }
    }

    /// Get the document version
    pub fn version(&self) -> i32 {
        self.version
    }

    /// Get the full text
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Convert LSP position to byte offset
    fn position_to_offset(&self, pos: Position) -> Option<usize> {
        let line_idx = pos.line as usize;

        if line_idx >= self.rope.len_lines() {
            return None;
        }

        let line_start = self.rope.line_to_byte(line_idx);
        let line = self.rope.line(line_idx);

        // Convert character offset to byte offset within line
        let char_idx = pos.character as usize;
        let byte_offset: usize = line.chars().take(char_idx).map(|c| c.len_utf8()).sum();

        Some(line_start + byte_offset)
    }

    /// Apply a change event from the client: a ranged incremental edit or
    /// a full-document replace.
    pub fn apply_change(&mut self, change: TextDocumentContentChangeEvent, version: i32) {
        self.version = version;

        if let Some(range) = change.range {
            // Incremental update
            let start = self.position_to_offset(range.start).unwrap_or(0);
            let end = self
                .position_to_offset(range.end)
                .unwrap_or(self.rope.len_bytes());

            if start < end && end <= self.rope.len_bytes() {
                self.rope.remove(start..end);
            }

            if start <= self.rope.len_bytes() {
                self.rope.insert(start, &change.text);
            }
        } else {
            // Full document replace
            self.rope = Rope::from_str(&change.text);
        }
    }
}
