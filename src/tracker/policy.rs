//! How the active turn follows the roster when characters are deleted or
//! reordered.
//!
//! Two behaviours are in use by trackers in the wild: keep pointing at the
//! same character, or start the round over. Both are exposed; the tracker
//! defaults to `PreserveActive`.

use serde::{Deserialize, Serialize};

use crate::tracker::character::Character;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnPolicy {
    /// Keep the same character active where possible.
    #[default]
    PreserveActive,
    /// Any delete or reorder makes the first character active.
    ResetToFirst,
}

impl TurnPolicy {
    /// Active index after removing `removed` from a roster that now holds
    /// `new_len` characters.
    pub fn after_delete(self, active: usize, removed: usize, new_len: usize) -> usize {
        match self {
            TurnPolicy::ResetToFirst => 0,
            TurnPolicy::PreserveActive => {
                if removed < active {
                    active - 1
                } else if active >= new_len {
                    0
                } else {
                    active
                }
            }
        }
    }

    /// Active index after a reorder. `active_before` is the character that
    /// held the turn before the move; `roster` is the reordered list.
    pub fn after_reorder(
        self,
        current: usize,
        active_before: Option<&Character>,
        roster: &[Character],
    ) -> usize {
        match self {
            TurnPolicy::ResetToFirst => 0,
            TurnPolicy::PreserveActive => active_before
                .and_then(|active| roster.iter().position(|c| c.same_as(active)))
                .unwrap_or(current),
        }
    }
}
