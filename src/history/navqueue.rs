//! Bounded back/forward navigation queue.
//!
//! Index 0 holds the most recent position. The cursor counts how many steps
//! back from the head the user currently is; it stays 0 until the user goes
//! back, and any fresh position recorded while stepped back discards the
//! entries ahead of the cursor, like a browser history.

use std::collections::VecDeque;

use crate::config::Config;
use crate::error::{NavError, NavResult};
use crate::history::anchor::{Anchor, MarkerIds, Resolved};
use crate::history::buttons::{self, Affordances, ButtonState};
use crate::workspace::{DocHandle, Workspace};

/// Default bound on the number of remembered positions.
pub const MAX_NAVQUEUE_LENGTH: usize = 100;

/// Outcome of a back or forward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The editor moved to the target entry and the cursor followed.
    Moved,
    /// The target entry could not be resolved and was dropped.
    Purged,
    /// Nothing to step to.
    Blocked,
}

/// Navigation history context.
///
/// Owns every [`Anchor`], the cursor and the marker id counter. Created once
/// with [`NavQueue::init`] and released with [`NavQueue::teardown`], which
/// removes the remaining marker tags from the workspace.
#[derive(Debug)]
pub struct NavQueue<A: Affordances = ButtonState> {
    anchors: VecDeque<Anchor>,
    cursor: usize,
    ids: MarkerIds,
    max_len: usize,
    buttons: A,
}

impl<A: Affordances> NavQueue<A> {
    /// Creates an empty queue and disables both buttons.
    pub fn init(config: &Config, buttons: A) -> Self {
        let mut queue = Self {
            anchors: VecDeque::new(),
            cursor: 0,
            ids: MarkerIds::new(),
            max_len: config.history_bound(),
            buttons,
        };
        queue.buttons.set_back_enabled(false);
        queue.buttons.set_forward_enabled(false);
        queue
    }

    /// Creates an empty queue with the default bound.
    pub fn new(buttons: A) -> Self {
        Self::init(&Config::default(), buttons)
    }

    /// Destroys every anchor, oldest first, and hands back the button adapter.
    pub fn teardown<W: Workspace + ?Sized>(mut self, ws: &mut W) -> A {
        while let Some(anchor) = self.anchors.pop_back() {
            anchor.clear(ws);
        }
        self.buttons
    }

    /// Returns the number of remembered positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Steps back from the head; 0 means at the newest entry.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the bound on remembered positions.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Returns true if an older entry exists past the cursor.
    pub fn can_go_back(&self) -> bool {
        buttons::can_go_back(self.len(), self.cursor)
    }

    /// Returns true if the cursor is stepped back from the head.
    pub fn can_go_forward(&self) -> bool {
        buttons::can_go_forward(self.len(), self.cursor)
    }

    /// Returns the affordance adapter last updated by the queue.
    pub fn buttons(&self) -> &A {
        &self.buttons
    }

    /// Entries from newest to oldest.
    pub fn entries(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors.iter()
    }

    /// Returns the entry at `index`, counted from the newest, without refreshing it.
    pub fn get(&self, index: usize) -> Option<&Anchor> {
        self.anchors.get(index)
    }

    /// Refreshes the entry at `index` against the workspace.
    pub fn resolve<W: Workspace + ?Sized>(
        &mut self,
        ws: &W,
        index: usize,
    ) -> Option<Resolved> {
        self.anchors.get_mut(index)?.refresh(ws)
    }

    /// Remembers `offset` in `doc`.
    ///
    /// Untitled documents are ignored, as is a position equal to the entry
    /// under the cursor. Recording while stepped back drops the entries ahead
    /// of the cursor. The oldest entries are evicted beyond the bound.
    pub fn record_position<W: Workspace + ?Sized>(
        &mut self,
        ws: &mut W,
        doc: DocHandle,
        offset: usize,
    ) {
        let Some(file) = ws.file_identity(doc).map(str::to_owned) else {
            log::debug!("Not recording position in untitled document {}", doc);
            return;
        };

        if self.cursor_matches(&*ws, &file, offset) {
            return;
        }

        self.truncate_forward(ws);

        let anchor = Anchor::set(ws, doc, file, offset, self.ids.next_id());
        self.anchors.push_front(anchor);

        while self.anchors.len() > self.max_len {
            if let Some(oldest) = self.anchors.pop_back() {
                log::debug!(
                    "History full, evicting {}:{}",
                    oldest.file(),
                    oldest.offset()
                );
                oldest.clear(ws);
            }
        }

        self.adjust_buttons();
    }

    /// Records the cursor in `old` and the start of `line` in `new`, then
    /// moves the editor there.
    ///
    /// Lines are counted from 1. Returns whether the cursor moved; invalid
    /// arguments are logged and reported as `false`.
    pub fn jump_with_record<W: Workspace + ?Sized>(
        &mut self,
        ws: &mut W,
        old: Option<DocHandle>,
        new: DocHandle,
        line: usize,
    ) -> bool {
        match self.try_jump_with_record(ws, old, new, line) {
            Ok(moved) => moved,
            Err(err) => {
                log::warn!("Jump rejected: {}", err);
                false
            }
        }
    }

    /// Like [`NavQueue::jump_with_record`], but reports why a jump was rejected.
    pub fn try_jump_with_record<W: Workspace + ?Sized>(
        &mut self,
        ws: &mut W,
        old: Option<DocHandle>,
        new: DocHandle,
        line: usize,
    ) -> NavResult<bool> {
        if let Some(old) = old.filter(|&old| !ws.is_valid(old)) {
            return Err(NavError::InvalidDocument(old));
        }
        if !ws.is_valid(new) {
            return Err(NavError::InvalidDocument(new));
        }
        if line < 1 {
            return Err(NavError::InvalidLine(line));
        }

        let pos = ws.offset_of_line(new, line - 1);

        if let Some(old) = old {
            let current = ws.current_offset(old);
            self.record_position(ws, old, current);
        }
        self.record_position(ws, new, pos);

        Ok(ws.goto_offset(new, pos))
    }

    /// Steps to the next older entry.
    ///
    /// The live cursor position is recorded first, so stepping back from a
    /// spot the history has not seen yet makes that spot reachable again by
    /// going forward.
    pub fn go_back<W: Workspace + ?Sized>(&mut self, ws: &mut W) -> Step {
        match ws.current_document() {
            Some(doc) => {
                let offset = ws.current_offset(doc);
                self.record_position(ws, doc, offset);
            }
            None => log::warn!("Attempted navigation when nothing is open"),
        }

        if self.anchors.is_empty() || self.cursor >= self.anchors.len() - 1 {
            return Step::Blocked;
        }

        let step = self.step_to(ws, self.cursor + 1);
        if step == Step::Moved {
            self.cursor += 1;
        }
        self.adjust_buttons();
        step
    }

    /// Steps to the next newer entry.
    pub fn go_forward<W: Workspace + ?Sized>(&mut self, ws: &mut W) -> Step {
        if self.cursor < 1 || self.cursor >= self.anchors.len() {
            return Step::Blocked;
        }

        let step = self.step_to(ws, self.cursor - 1);
        if step == Step::Moved {
            self.cursor -= 1;
        }
        self.adjust_buttons();
        step
    }

    /// Forgets every position in `file`.
    ///
    /// The cursor is reset to the head if it no longer points into the queue.
    pub fn remove_all_for_file<W: Workspace + ?Sized>(
        &mut self,
        ws: &mut W,
        file: Option<&str>,
    ) {
        let Some(file) = file else {
            return;
        };

        let mut kept = VecDeque::with_capacity(self.anchors.len());
        for anchor in self.anchors.drain(..) {
            if anchor.file() == file {
                anchor.clear(ws);
            } else {
                kept.push_back(anchor);
            }
        }
        self.anchors = kept;

        // TODO: shift the cursor towards the head instead of resetting it
        if self.cursor >= self.anchors.len() {
            self.cursor = 0;
        }

        self.adjust_buttons();
    }

    fn cursor_matches<W: Workspace + ?Sized>(
        &mut self,
        ws: &W,
        file: &str,
        offset: usize,
    ) -> bool {
        self.anchors
            .get_mut(self.cursor)
            .is_some_and(|anchor| anchor.matches(ws, file, offset))
    }

    fn truncate_forward<W: Workspace + ?Sized>(&mut self, ws: &mut W) {
        let ahead = self.cursor.min(self.anchors.len());
        for anchor in self.anchors.drain(..ahead) {
            anchor.clear(ws);
        }
        self.cursor = 0;
    }

    /// Moves the editor to the entry at `index`, or drops it if unresolvable.
    fn step_to<W: Workspace + ?Sized>(&mut self, ws: &mut W, index: usize) -> Step {
        let target = self.anchors.get_mut(index).and_then(|a| a.refresh(&*ws));
        if let Some(found) = target {
            if ws.goto_offset(found.doc, found.offset) {
                return Step::Moved;
            }
        }

        if let Some(stale) = self.anchors.remove(index) {
            log::debug!(
                "Dropping unreachable entry {}:{}",
                stale.file(),
                stale.offset()
            );
            stale.clear(ws);
        }
        if self.cursor >= self.anchors.len() {
            self.cursor = 0;
        }
        Step::Purged
    }

    fn adjust_buttons(&mut self) {
        buttons::adjust(&mut self.buttons, self.anchors.len(), self.cursor);
    }
}
