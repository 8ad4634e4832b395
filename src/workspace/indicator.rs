//! Run-length indicator layer for one document.
//!
//! Stores non-overlapping tagged ranges sorted by start offset. Text edits
//! are pushed through [`IndicatorLayer::insert`] and [`IndicatorLayer::delete`]
//! so tags keep covering the same text they were placed on.

use crate::workspace::MarkerId;

/// A half-open range `[start, end)` carrying a marker id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedRange {
    pub start: usize,
    pub end: usize,
    pub id: MarkerId,
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorLayer {
    ranges: Vec<TaggedRange>,
}

impl IndicatorLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn ranges(&self) -> &[TaggedRange] {
        &self.ranges
    }

    /// Tags `[start, start + width)` with `id`, replacing any overlapping tags.
    pub fn fill(&mut self, start: usize, width: usize, id: MarkerId) {
        if width == 0 || !id.is_valid() {
            return;
        }
        self.clear(start, width);
        let range = TaggedRange {
            start,
            end: start + width,
            id,
        };
        let at = self.ranges.partition_point(|r| r.start < start);
        self.ranges.insert(at, range);
    }

    /// Removes tags from `[start, start + width)`, splitting ranges that
    /// only partly overlap.
    pub fn clear(&mut self, start: usize, width: usize) {
        if width == 0 {
            return;
        }
        let end = start + width;
        let mut kept = Vec::with_capacity(self.ranges.len() + 1);
        for r in self.ranges.drain(..) {
            if r.end <= start || r.start >= end {
                kept.push(r);
                continue;
            }
            if r.start < start {
                kept.push(TaggedRange { end: start, ..r });
            }
            if r.end > end {
                kept.push(TaggedRange { start: end, ..r });
            }
        }
        self.ranges = kept;
    }

    /// Returns the id tagging `offset`.
    pub fn value_at(&self, offset: usize) -> Option<MarkerId> {
        self.range_containing(offset).map(|r| r.id)
    }

    /// Returns the end of the run holding `offset`.
    ///
    /// Untagged gaps are runs too: their end is the start of the next tag,
    /// or `doc_len` when no tag follows. Offsets at or past both `doc_len`
    /// and every tag come back unchanged.
    pub fn run_end(&self, offset: usize, doc_len: usize) -> usize {
        if let Some(r) = self.range_containing(offset) {
            return r.end;
        }
        match self.ranges.iter().find(|r| r.start > offset) {
            Some(next) => next.start,
            None if offset < doc_len => doc_len,
            None => offset,
        }
    }

    /// Shifts tags for `count` units inserted at `offset`.
    pub fn insert(&mut self, offset: usize, count: usize) {
        if count == 0 {
            return;
        }
        for r in &mut self.ranges {
            if r.start >= offset {
                r.start += count;
                r.end += count;
            } else if r.end > offset {
                r.end += count;
            }
        }
    }

    /// Shifts and clips tags for the deletion of `[start, end)`.
    pub fn delete(&mut self, start: usize, end: usize) {
        if end <= start {
            return;
        }
        let removed = end - start;
        let map = |x: usize| {
            if x <= start {
                x
            } else if x >= end {
                x - removed
            } else {
                start
            }
        };
        for r in &mut self.ranges {
            r.start = map(r.start);
            r.end = map(r.end);
        }
        self.ranges.retain(|r| r.start < r.end);
    }

    fn range_containing(&self, offset: usize) -> Option<&TaggedRange> {
        let idx = self.ranges.partition_point(|r| r.start <= offset);
        idx.checked_sub(1)
            .map(|i| &self.ranges[i])
            .filter(|r| offset < r.end)
    }
}
