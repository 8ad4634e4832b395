//! In-memory editor workspace.
//!
//! Holds [`Rope`] documents in reusable slots, one cursor per document and
//! one [`IndicatorLayer`] per document. Edits keep the indicators in step
//! with the text, which is all the navigation history relies on.

use crate::error::{NavError, NavResult};
use crate::workspace::indicator::IndicatorLayer;
use crate::workspace::{CursorNavigator, DocHandle, DocumentRegistry, MarkerId, MarkerSubstrate};
use ropey::Rope;
use std::cell::Cell;

/// An open text document.
#[derive(Debug, Clone)]
pub struct Document {
    path: Option<String>,
    text: Rope,
    cursor: usize,
    indicators: IndicatorLayer,
}

impl Document {
    fn new(path: Option<String>, text: &str) -> Self {
        Self {
            path,
            text: Rope::from_str(text),
            cursor: 0,
            indicators: IndicatorLayer::new(),
        }
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.text.len_chars() == 0
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn indicators(&self) -> &IndicatorLayer {
        &self.indicators
    }
}

/// A set of open documents plus focus.
///
/// Closed slots are reused by later opens, so an old [`DocHandle`] may end up
/// pointing at an unrelated file.
#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    slots: Vec<Option<Document>>,
    current: Option<DocHandle>,
    scan_steps: Cell<usize>,
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a document backed by `path` with the given contents and focuses it.
    pub fn open(&mut self, path: &str, text: &str) -> DocHandle {
        self.insert_document(Document::new(Some(path.to_string()), text))
    }

    /// Opens a document with no file name.
    pub fn open_untitled(&mut self, text: &str) -> DocHandle {
        self.insert_document(Document::new(None, text))
    }

    /// Closes `doc`, freeing its slot for reuse. Returns false if it was not open.
    pub fn close(&mut self, doc: DocHandle) -> bool {
        let Some(slot) = self.slots.get_mut(doc.0) else {
            return false;
        };
        if slot.take().is_none() {
            return false;
        }
        if self.current == Some(doc) {
            self.current = self.first_open();
        }
        true
    }

    /// Focuses `doc` without moving its cursor.
    pub fn set_current(&mut self, doc: DocHandle) -> NavResult<()> {
        self.document(doc)?;
        self.current = Some(doc);
        Ok(())
    }

    /// Moves the cursor of `doc` without focusing it, clamped to the text.
    pub fn set_cursor(&mut self, doc: DocHandle, offset: usize) -> NavResult<()> {
        let document = self.document_mut(doc)?;
        document.cursor = offset.min(document.len());
        Ok(())
    }

    /// Inserts `text` at `offset`, shifting tags and the cursor behind it.
    pub fn insert(&mut self, doc: DocHandle, offset: usize, text: &str) -> NavResult<()> {
        let document = self.document_mut(doc)?;
        if offset > document.len() {
            return Err(NavError::OffsetOutOfRange {
                offset,
                len: document.len(),
            });
        }
        let count = text.chars().count();
        document.text.insert(offset, text);
        document.indicators.insert(offset, count);
        if document.cursor >= offset {
            document.cursor += count;
        }
        Ok(())
    }

    /// Deletes `[start, end)`, dropping tags on the removed text.
    pub fn delete(&mut self, doc: DocHandle, start: usize, end: usize) -> NavResult<()> {
        let document = self.document_mut(doc)?;
        if start > end || end > document.len() {
            return Err(NavError::OffsetOutOfRange {
                offset: end,
                len: document.len(),
            });
        }
        document.text.remove(start..end);
        document.indicators.delete(start, end);
        if document.cursor >= end {
            document.cursor -= end - start;
        } else if document.cursor > start {
            document.cursor = start;
        }
        Ok(())
    }

    pub fn document(&self, doc: DocHandle) -> NavResult<&Document> {
        self.slots
            .get(doc.0)
            .and_then(Option::as_ref)
            .ok_or(NavError::InvalidDocument(doc))
    }

    fn document_mut(&mut self, doc: DocHandle) -> NavResult<&mut Document> {
        self.slots
            .get_mut(doc.0)
            .and_then(Option::as_mut)
            .ok_or(NavError::InvalidDocument(doc))
    }

    /// Iterates over open documents with their handles.
    pub fn documents(&self) -> impl Iterator<Item = (DocHandle, &Document)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|d| (DocHandle(i), d)))
    }

    /// Number of `range_end_from` calls served so far.
    ///
    /// Lets callers tell a cached-offset hit from a full indicator scan.
    pub fn scan_steps(&self) -> usize {
        self.scan_steps.get()
    }

    fn insert_document(&mut self, document: Document) -> DocHandle {
        let handle = match self.slots.iter().position(Option::is_none) {
            Some(free) => {
                self.slots[free] = Some(document);
                DocHandle(free)
            }
            None => {
                self.slots.push(Some(document));
                DocHandle(self.slots.len() - 1)
            }
        };
        self.current = Some(handle);
        handle
    }

    fn first_open(&self) -> Option<DocHandle> {
        self.documents().next().map(|(handle, _)| handle)
    }
}

impl DocumentRegistry for MemoryWorkspace {
    fn find_document(&self, path: &str) -> Option<DocHandle> {
        self.documents()
            .find(|(_, d)| d.path() == Some(path))
            .map(|(handle, _)| handle)
    }

    fn is_valid(&self, doc: DocHandle) -> bool {
        self.document(doc).is_ok()
    }

    fn file_identity(&self, doc: DocHandle) -> Option<&str> {
        self.document(doc).ok().and_then(Document::path)
    }

    fn current_document(&self) -> Option<DocHandle> {
        self.current.filter(|&doc| self.is_valid(doc))
    }
}

impl MarkerSubstrate for MemoryWorkspace {
    fn tag_unit_range(&mut self, doc: DocHandle, offset: usize, id: MarkerId) {
        if let Ok(document) = self.document_mut(doc) {
            let offset = offset.min(document.len());
            document.indicators.fill(offset, 1, id);
        }
    }

    fn clear_unit_range(&mut self, doc: DocHandle, offset: usize) {
        if let Ok(document) = self.document_mut(doc) {
            document.indicators.clear(offset, 1);
        }
    }

    fn marker_at(&self, doc: DocHandle, offset: usize) -> Option<MarkerId> {
        self.document(doc)
            .ok()
            .and_then(|d| d.indicators.value_at(offset))
    }

    fn range_end_from(&self, doc: DocHandle, offset: usize) -> usize {
        self.scan_steps.set(self.scan_steps.get() + 1);
        match self.document(doc) {
            Ok(d) => d.indicators.run_end(offset, d.len()),
            Err(_) => offset,
        }
    }
}

impl CursorNavigator for MemoryWorkspace {
    fn current_offset(&self, doc: DocHandle) -> usize {
        self.document(doc).map(Document::cursor).unwrap_or(0)
    }

    fn offset_of_line(&self, doc: DocHandle, line: usize) -> usize {
        let Ok(document) = self.document(doc) else {
            return 0;
        };
        // Lines past the last one clamp to the end of the text.
        let line = line.min(document.text.len_lines());
        document.text.line_to_char(line)
    }

    fn goto_offset(&mut self, doc: DocHandle, offset: usize) -> bool {
        let Ok(document) = self.document_mut(doc) else {
            return false;
        };
        if offset > document.len() {
            return false;
        }
        document.cursor = offset;
        self.current = Some(doc);
        true
    }
}
