//! Anchors: remembered positions that survive edits.
//!
//! An anchor stores the file it belongs to, a cached offset and a marker id.
//! The marker tag placed in the document is the source of truth for where
//! the anchor is; the cached offset only lets [`Anchor::refresh`] confirm the
//! common "nothing moved" case without scanning the document.

use crate::workspace::{DocHandle, DocumentRegistry, MarkerId, MarkerSubstrate};

/// Hands out marker ids. Zero is never returned.
#[derive(Debug, Clone, Default)]
pub struct MarkerIds {
    last: u64,
}

impl MarkerIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> MarkerId {
        self.last += 1;
        MarkerId(self.last)
    }

    /// The most recently issued id, or `MarkerId::INVALID` before the first.
    pub fn last(&self) -> MarkerId {
        MarkerId(self.last)
    }
}

/// A live document and offset an anchor currently resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub doc: DocHandle,
    pub offset: usize,
}

/// A remembered navigation point.
///
/// Each anchor owns exactly one marker tag.
#[derive(Debug, PartialEq, Eq)]
pub struct Anchor {
    /// Path of the document; stays meaningful after the document is closed.
    file: String,
    /// Last handle the file was seen under. May be stale.
    doc: Option<DocHandle>,
    offset: usize,
    marker: MarkerId,
}

impl Anchor {
    /// Creates an anchor at `offset` in `doc` and tags that unit with `marker`.
    pub(crate) fn set<W>(
        ws: &mut W,
        doc: DocHandle,
        file: String,
        offset: usize,
        marker: MarkerId,
    ) -> Self
    where
        W: MarkerSubstrate + ?Sized,
    {
        ws.tag_unit_range(doc, offset, marker);
        Self {
            file,
            doc: Some(doc),
            offset,
            marker,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Cached offset. Only trustworthy right after a successful refresh.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn marker(&self) -> MarkerId {
        self.marker
    }

    /// True once the marker tag has been lost for good.
    pub fn is_invalidated(&self) -> bool {
        !self.marker.is_valid()
    }

    /// Re-derives the live document and offset of this anchor.
    ///
    /// Returns `None` when the file is not open or the tag no longer exists.
    /// A tag that cannot be found anywhere in an open document invalidates
    /// the anchor permanently.
    pub fn refresh<W>(&mut self, ws: &W) -> Option<Resolved>
    where
        W: DocumentRegistry + MarkerSubstrate + ?Sized,
    {
        let doc = self.resolve_document(ws)?;
        if !self.marker.is_valid() {
            return None;
        }

        if ws.marker_at(doc, self.offset) == Some(self.marker) {
            return Some(Resolved {
                doc,
                offset: self.offset,
            });
        }

        let marker = self.marker;
        match TaggedRanges::new(ws, doc).find(|&(_, value)| value == Some(marker)) {
            Some((start, _)) => {
                self.offset = start;
                Some(Resolved { doc, offset: start })
            }
            None => {
                log::debug!(
                    "Marker {} for {} is gone, anchor invalidated",
                    self.marker,
                    self.file
                );
                self.marker = MarkerId::INVALID;
                None
            }
        }
    }

    /// True if this anchor is at `offset` in `file` after refreshing.
    pub(crate) fn matches<W>(&mut self, ws: &W, file: &str, offset: usize) -> bool
    where
        W: DocumentRegistry + MarkerSubstrate + ?Sized,
    {
        if self.file != file {
            return false;
        }
        self.refresh(ws);
        self.offset == offset
    }

    /// Destroys the anchor, removing its tag if it can still be found.
    pub(crate) fn clear<W>(mut self, ws: &mut W)
    where
        W: DocumentRegistry + MarkerSubstrate + ?Sized,
    {
        if let Some(found) = self.refresh(&*ws) {
            if ws.marker_at(found.doc, found.offset) == Some(self.marker) {
                ws.clear_unit_range(found.doc, found.offset);
            }
        }
    }

    fn resolve_document<W>(&mut self, ws: &W) -> Option<DocHandle>
    where
        W: DocumentRegistry + ?Sized,
    {
        let file = self.file.as_str();
        let cached = self
            .doc
            .filter(|&doc| ws.is_valid(doc) && ws.file_identity(doc) == Some(file));
        if cached.is_none() {
            self.doc = ws.find_document(&self.file);
        }
        self.doc
    }
}

/// Forward walk over the indicator runs of a document.
///
/// Yields `(start, value)` for each run starting at offset 0 and stops right
/// after the first run whose end does not advance past its start.
pub struct TaggedRanges<'a, W: ?Sized> {
    ws: &'a W,
    doc: DocHandle,
    pos: usize,
    done: bool,
}

impl<'a, W> TaggedRanges<'a, W>
where
    W: MarkerSubstrate + ?Sized,
{
    pub fn new(ws: &'a W, doc: DocHandle) -> Self {
        Self {
            ws,
            doc,
            pos: 0,
            done: false,
        }
    }
}

impl<W> Iterator for TaggedRanges<'_, W>
where
    W: MarkerSubstrate + ?Sized,
{
    type Item = (usize, Option<MarkerId>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let start = self.pos;
        let value = self.ws.marker_at(self.doc, start);
        let end = self.ws.range_end_from(self.doc, start);
        if end > start {
            self.pos = end;
        } else {
            self.done = true;
        }
        Some((start, value))
    }
}
