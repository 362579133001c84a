//! Main ↔ remote synchronization: the message vocabulary, the main window's
//! sending side, and the remote window's mirror.
//!
//! The two windows share no memory. Authority for the roster stays with the
//! main window; the remote renders snapshots and emits commands.

pub mod channel;
pub mod mirror;
pub mod protocol;
