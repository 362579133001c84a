//! Remote-window end of the sync channel.
//!
//! The mirror is a read-only copy of the last snapshot the main window sent.
//! User input here never edits the copy; it becomes a `RemoteCommand` that
//! the host posts back to the opener, and the change shows up when the next
//! snapshot arrives.

use std::cell::RefCell;

use crate::sync::protocol::{MainMessage, RemoteCommand};
use crate::tracker::reorder::MouseDrag;
use crate::tracker::roster::Roster;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteMirror {
    pub roster: Roster,
    /// Whether any snapshot has arrived yet.
    pub synced: bool,
    drag: MouseDrag,
}

impl RemoteMirror {
    pub fn apply(&mut self, msg: MainMessage) {
        match msg {
            MainMessage::CharacterUpdate {
                characters,
                current_turn,
            } => {
                self.roster = Roster::new(characters, current_turn);
                self.synced = true;
            }
        }
    }

    pub fn drag_start(&mut self, index: usize) {
        self.drag.start(index);
    }

    /// Drop on card `target`: ask the main window to perform the move.
    pub fn drop_on(&mut self, target: usize) -> Option<RemoteCommand> {
        let (from, to) = self.drag.drop_on(target)?;
        Some(RemoteCommand::ReorderCharacters { from, to })
    }
}

thread_local! {
    static MIRROR: RefCell<RemoteMirror> = RefCell::new(RemoteMirror::default());
}

/// Execute a closure with read access to the mirror.
pub fn with_mirror<F, R>(f: F) -> R
where
    F: FnOnce(&RemoteMirror) -> R,
{
    MIRROR.with(|m| f(&m.borrow()))
}

/// Execute a closure with mutable access to the mirror.
pub fn with_mirror_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut RemoteMirror) -> R,
{
    MIRROR.with(|m| f(&mut m.borrow_mut()))
}

/// Forget everything (popup reload).
pub fn reset_mirror() {
    MIRROR.with(|m| *m.borrow_mut() = RemoteMirror::default());
}
