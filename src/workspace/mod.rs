//! Host services consumed by the navigation history.
//!
//! The history never owns documents or text. It talks to the editor through
//! three narrow traits:
//!
//! - [`DocumentRegistry`]: maps file paths to live documents and back
//! - [`MarkerSubstrate`]: tags one-unit text ranges with numeric ids that
//!   follow the text as it is edited
//! - [`CursorNavigator`]: reads and moves the editor cursor
//!
//! [`Workspace`] bundles all three. [`memory::MemoryWorkspace`] is a complete
//! in-process implementation used by the session replayer and the tests.

pub mod indicator;
pub mod memory;

pub use memory::MemoryWorkspace;

use std::fmt;

/// Opaque reference to an open document.
///
/// Handles are cheap to copy and may outlive the document they point to.
/// After a document is closed its handle can be handed out again for a
/// different file, so a handle alone never proves identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocHandle(pub usize);

impl fmt::Display for DocHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a marker tag.
///
/// Zero is reserved: it never tags text and marks an anchor whose tag has
/// been lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

impl MarkerId {
    pub const INVALID: MarkerId = MarkerId(0);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// Lookup of open documents.
pub trait DocumentRegistry {
    /// Finds the open document backed by `path`, if any.
    fn find_document(&self, path: &str) -> Option<DocHandle>;

    /// Returns true while `doc` refers to an open document.
    fn is_valid(&self, doc: DocHandle) -> bool;

    /// Returns the file path of `doc`, or `None` for closed or untitled
    /// documents.
    fn file_identity(&self, doc: DocHandle) -> Option<&str>;

    /// Returns the document that currently has focus.
    fn current_document(&self) -> Option<DocHandle>;
}

/// Edit-resilient range tags, scoped per document.
pub trait MarkerSubstrate {
    /// Tags the single unit at `offset` with `id`.
    fn tag_unit_range(&mut self, doc: DocHandle, offset: usize, id: MarkerId);

    /// Removes whatever tag covers the single unit at `offset`.
    fn clear_unit_range(&mut self, doc: DocHandle, offset: usize);

    /// Returns the id tagging the unit at `offset`.
    fn marker_at(&self, doc: DocHandle, offset: usize) -> Option<MarkerId>;

    /// Returns the end of the run (tagged or untagged) containing `offset`.
    ///
    /// At or past the end of the document the offset is returned unchanged,
    /// so a forward scan that sees no progress knows it is done.
    fn range_end_from(&self, doc: DocHandle, offset: usize) -> usize;
}

/// Cursor primitives of the editor.
pub trait CursorNavigator {
    /// Returns the cursor offset within `doc`.
    fn current_offset(&self, doc: DocHandle) -> usize;

    /// Converts a zero-based line number to the offset of its first unit.
    fn offset_of_line(&self, doc: DocHandle, line: usize) -> usize;

    /// Focuses `doc` and moves its cursor to `offset`.
    fn goto_offset(&mut self, doc: DocHandle, offset: usize) -> bool;
}

/// Everything the navigation history needs from its host.
pub trait Workspace: DocumentRegistry + MarkerSubstrate + CursorNavigator {}

impl<T> Workspace for T where T: DocumentRegistry + MarkerSubstrate + CursorNavigator {}
