//! Wire format between the main window and the remote popup.
//!
//! Messages are JSON objects tagged by `type`, passed through
//! `window.postMessage` by the host. The remote only ever sends commands;
//! the main window only ever sends roster snapshots.

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::tracker::character::Character;

/// Remote → main.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RemoteCommand {
    NextTurn,
    ToggleMute,
    GetCharacters,
    ReorderCharacters { from: usize, to: usize },
}

/// Main → remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MainMessage {
    CharacterUpdate {
        characters: Vec<Character>,
        #[serde(rename = "currentTurn")]
        current_turn: usize,
    },
}

impl RemoteCommand {
    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        serde_json::from_str(json).map_err(TrackerError::InvalidMessage)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl MainMessage {
    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        serde_json::from_str(json).map_err(TrackerError::InvalidMessage)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
