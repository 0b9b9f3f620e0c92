//! Host buffer contract and an in-memory implementation
//!
//! The engine never owns the document. It reads and writes through
//! [`HostBuffer`], which a rich-text editor implements over its own storage.
//! [`MemoryBuffer`] keeps text plus one optional format per byte and serves
//! the terminal viewer and the tests.

use std::path::Path;

use crate::error::Result;
use crate::section::floor_boundary;
use crate::syntax::{Format, Span};

/// Current selection in the host editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    /// Byte offset where the selection starts
    pub index: usize,
    /// Selected length in bytes (0 for a bare cursor)
    pub length: usize,
}

/// Operations the engine needs from the host editor
pub trait HostBuffer {
    /// Full document text
    fn text(&self) -> String;

    /// Document length in bytes
    fn len(&self) -> usize {
        self.text().len()
    }

    /// Check if the document is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the whole document
    fn set_text(&mut self, text: &str);

    /// Insert text at a byte offset
    fn insert_text(&mut self, offset: usize, text: &str);

    /// Drop all formatting from a range
    fn remove_format(&mut self, start: usize, length: usize);

    /// Apply a format to a range
    fn format_range(&mut self, start: usize, length: usize, format: &Format);

    /// Place the cursor
    fn set_selection(&mut self, offset: usize);

    /// Current selection, `None` when the editor has no focus
    fn selection(&self) -> Option<SelectionRange>;
}

/// A document held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    /// Document text
    text: String,
    /// Format of each byte (None = unformatted)
    formats: Vec<Option<Format>>,
    /// Selection, if any
    selection: Option<SelectionRange>,
    /// Buffer name (e.g. the file name)
    name: String,
}

impl MemoryBuffer {
    /// Create a buffer holding `text`
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            formats: vec![None; text.len()],
            selection: Some(SelectionRange { index: 0, length: 0 }),
            name: String::new(),
        }
    }

    /// Create a buffer from file contents
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut buffer = Self::new(&content);
        buffer.name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        Ok(buffer)
    }

    /// Get buffer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Borrow the document text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Remove `length` bytes at `offset`
    pub fn delete_text(&mut self, offset: usize, length: usize) {
        let start = floor_boundary(&self.text, offset);
        let end = floor_boundary(&self.text, start.saturating_add(length));
        self.text.replace_range(start..end, "");
        self.formats.drain(start..end);
        if let Some(sel) = self.selection.as_mut() {
            if sel.index > end {
                sel.index -= end - start;
            } else if sel.index > start {
                sel.index = start;
            }
        }
    }

    /// Select `length` bytes at `index`
    pub fn select(&mut self, index: usize, length: usize) {
        let index = floor_boundary(&self.text, index);
        let end = floor_boundary(&self.text, index.saturating_add(length));
        self.selection = Some(SelectionRange { index, length: end - index });
    }

    /// Drop the selection, as when the editor loses focus
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Format of the byte at `offset`
    pub fn format_at(&self, offset: usize) -> Option<Format> {
        self.formats.get(offset).copied().flatten()
    }

    /// Formatted runs in document order
    ///
    /// Adjacent bytes with the same format are merged; unformatted bytes
    /// produce no span.
    pub fn spans(&self) -> Vec<Span> {
        let mut spans: Vec<Span> = Vec::new();
        for (i, format) in self.formats.iter().enumerate() {
            let Some(format) = format else { continue };
            match spans.last_mut() {
                Some(last) if last.end == i && last.format == *format => last.end = i + 1,
                _ => spans.push(Span::new(i, i + 1, *format)),
            }
        }
        spans
    }

    fn clamp_range(&self, start: usize, length: usize) -> (usize, usize) {
        let start = start.min(self.text.len());
        let end = start.saturating_add(length).min(self.text.len());
        (start, end)
    }
}

impl HostBuffer for MemoryBuffer {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn len(&self) -> usize {
        self.text.len()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.formats = vec![None; text.len()];
        self.selection = Some(SelectionRange { index: 0, length: 0 });
    }

    fn insert_text(&mut self, offset: usize, text: &str) {
        let offset = floor_boundary(&self.text, offset);
        self.text.insert_str(offset, text);
        self.formats
            .splice(offset..offset, std::iter::repeat(None).take(text.len()));
        if let Some(sel) = self.selection.as_mut() {
            if sel.index > offset {
                sel.index += text.len();
            }
        }
    }

    fn remove_format(&mut self, start: usize, length: usize) {
        let (start, end) = self.clamp_range(start, length);
        self.formats[start..end].fill(None);
    }

    fn format_range(&mut self, start: usize, length: usize, format: &Format) {
        let (start, end) = self.clamp_range(start, length);
        self.formats[start..end].fill(Some(*format));
    }

    fn set_selection(&mut self, offset: usize) {
        let index = floor_boundary(&self.text, offset);
        self.selection = Some(SelectionRange { index, length: 0 });
    }

    fn selection(&self) -> Option<SelectionRange> {
        self.selection
    }
}
