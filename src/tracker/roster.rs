//! Roster store: the ordered character list, the active turn, and their
//! serialized `SaveDocument` form.
//!
//! The same document shape is used for the `localStorage` copy (no version)
//! and for exported save files (`version: 1`, pretty-printed).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{SAVE_KEY, SAVE_VERSION};
use crate::effects::Effect;
use crate::error::TrackerError;
use crate::tracker::character::Character;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDocument {
    pub characters: Vec<Character>,
    #[serde(default)]
    pub current_turn: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub characters: Vec<Character>,
    pub current_turn: usize,
}

impl Roster {
    pub fn new(characters: Vec<Character>, current_turn: usize) -> Self {
        let mut roster = Self {
            characters,
            current_turn,
        };
        roster.clamp_turn();
        roster
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// The character whose turn it is, if any.
    pub fn active(&self) -> Option<&Character> {
        self.characters.get(self.current_turn)
    }

    /// Reset an out-of-range active index to the first character.
    pub fn clamp_turn(&mut self) {
        if self.current_turn >= self.characters.len() {
            self.current_turn = 0;
        }
    }

    /// Rebuild from the persisted document. Missing or unreadable data means
    /// an empty roster; this never fails.
    pub fn load(stored: Option<&str>) -> Roster {
        let Some(json) = stored.filter(|s| !s.is_empty()) else {
            return Roster::default();
        };
        match serde_json::from_str::<SaveDocument>(json) {
            Ok(doc) => Roster::new(doc.characters, doc.current_turn),
            Err(e) => {
                log::warn!("discarding unreadable saved roster: {}", e);
                Roster::default()
            }
        }
    }

    pub fn to_document(&self, version: Option<u32>) -> SaveDocument {
        SaveDocument {
            characters: self.characters.clone(),
            current_turn: self.current_turn,
            version,
        }
    }

    /// Effect that writes the roster to persistent storage.
    pub fn save(&self) -> Effect {
        let value = serde_json::to_string(&self.to_document(None)).unwrap_or_else(|e| {
            log::error!("failed to serialize roster: {}", e);
            String::from(r#"{"characters":[],"currentTurn":0}"#)
        });
        Effect::Persist { key: SAVE_KEY, value }
    }

    /// Build the download for an exported save file.
    ///
    /// An empty roster is an error; an empty `name` (the prompt was
    /// cancelled) quietly yields `None`.
    pub fn export(&self, name: &str) -> Result<Option<Effect>, TrackerError> {
        if self.is_empty() {
            return Err(TrackerError::NothingToSave);
        }
        if name.is_empty() {
            return Ok(None);
        }
        let contents = serde_json::to_string_pretty(&self.to_document(Some(SAVE_VERSION)))
            .map_err(TrackerError::UnreadableSave)?;
        Ok(Some(Effect::Download {
            filename: format!("{}.json", sanitize_filename(name)),
            contents,
        }))
    }

    /// Parse an imported save file. Only the shape is checked: the document
    /// must be JSON with a `characters` array of characters. `currentTurn`
    /// defaults to 0 when absent or unusable.
    pub fn import(text: &str) -> Result<Roster, TrackerError> {
        let value: Value = serde_json::from_str(text).map_err(TrackerError::UnreadableSave)?;
        let characters = match value.get("characters") {
            Some(list) if list.is_array() => {
                Vec::<Character>::deserialize(list).map_err(|_| TrackerError::InvalidSave)?
            }
            _ => return Err(TrackerError::InvalidSave),
        };
        let current_turn = value
            .get("currentTurn")
            .and_then(Value::as_u64)
            .unwrap_or(0) as usize;
        Ok(Roster::new(characters, current_turn))
    }
}

/// Keep `[A-Za-z0-9-_ ]`; every other character becomes `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
