//! Main-window end of the sync channel.
//!
//! The popup handle lives in the host; this side only tracks whether it is
//! alive. Every send checks liveness first, and a closed popup drops the
//! message on the floor.

use crate::effects::Effect;
use crate::sync::protocol::MainMessage;
use crate::tracker::roster::Roster;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncChannel {
    remote_alive: bool,
}

impl SyncChannel {
    /// The popup loaded (or was re-focused after a reload).
    pub fn open(&mut self) {
        self.remote_alive = true;
    }

    /// The popup closed or navigated away.
    pub fn close(&mut self) {
        self.remote_alive = false;
    }

    #[cfg(test)]
    pub fn is_alive(&self) -> bool {
        self.remote_alive
    }

    /// Wrap `msg` for delivery, or `None` if nobody is listening.
    pub fn send(&self, msg: &MainMessage) -> Option<Effect> {
        if !self.remote_alive {
            log::debug!("remote closed; dropping sync message");
            return None;
        }
        Some(Effect::Sync(msg.to_json()))
    }

    /// Push the full roster to the remote.
    pub fn send_snapshot(&self, roster: &Roster) -> Option<Effect> {
        self.send(&snapshot(roster))
    }
}

pub fn snapshot(roster: &Roster) -> MainMessage {
    MainMessage::CharacterUpdate {
        characters: roster.characters.clone(),
        current_turn: roster.current_turn,
    }
}
