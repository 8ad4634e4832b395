//! Navigation history.
//!
//! # Modules
//!
//! - `anchor`: remembered positions and the refresh algorithm that keeps
//!   them pointing at the same text
//! - `buttons`: back/forward availability and the adapter it is pushed to
//! - `navqueue`: the bounded history queue and its cursor
//!
//! # Example
//!
//! ```
//! use navquill::history::{ButtonState, NavQueue, Step};
//! use navquill::workspace::{CursorNavigator, MemoryWorkspace};
//!
//! let mut ws = MemoryWorkspace::new();
//! let doc = ws.open("main.rs", "fn main() {\n    run();\n}\n");
//! let mut queue = NavQueue::new(ButtonState::default());
//!
//! queue.record_position(&mut ws, doc, 0);
//! assert!(queue.jump_with_record(&mut ws, Some(doc), doc, 2));
//! assert_eq!(ws.current_offset(doc), 12);
//!
//! assert_eq!(queue.go_back(&mut ws), Step::Moved);
//! assert_eq!(ws.current_offset(doc), 0);
//! ```

pub mod anchor;
pub mod buttons;
pub mod navqueue;

pub use anchor::{Anchor, MarkerIds, Resolved, TaggedRanges};
pub use buttons::{Affordances, ButtonState};
pub use navqueue::{NavQueue, Step, MAX_NAVQUEUE_LENGTH};
