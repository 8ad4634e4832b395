//! navquill: back/forward navigation history for text editors.
//!
//! Positions the user visits are remembered as anchors tagged in the
//! document's marker layer, so they keep pointing at the same text while the
//! document is edited.
//!
//! - [`history`]: anchors, the refresh algorithm and the bounded queue
//! - [`workspace`]: the host traits and an in-memory host
//! - [`session`]: scripted sessions used by the `navquill` binary
//! - [`config`]: TOML configuration
//! - [`error`]: error types

pub mod config;
pub mod error;
pub mod history;
pub mod session;
pub mod workspace;
