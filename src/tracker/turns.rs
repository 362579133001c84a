//! Turn controller: moves the active-turn index as the roster changes.
//!
//! These functions only touch the `Roster`; persistence, sound and re-render
//! are emitted by the `Tracker` that calls them.

use crate::error::TrackerError;
use crate::tracker::character::Character;
use crate::tracker::policy::TurnPolicy;
use crate::tracker::reorder::move_item;
use crate::tracker::roster::Roster;

/// Hand the turn to the next character, wrapping at the end.
/// Returns `false` for an empty roster.
pub fn advance(roster: &mut Roster) -> bool {
    if roster.is_empty() {
        return false;
    }
    roster.current_turn = (roster.current_turn + 1) % roster.len();
    true
}

/// Remove the character at `index`.
pub fn delete(
    roster: &mut Roster,
    index: usize,
    policy: TurnPolicy,
) -> Result<Character, TrackerError> {
    if index >= roster.len() {
        return Err(TrackerError::OutOfBounds {
            index,
            len: roster.len(),
        });
    }
    let removed = roster.characters.remove(index);
    roster.current_turn = policy.after_delete(roster.current_turn, index, roster.len());
    roster.clamp_turn();
    Ok(removed)
}

/// Move a character. Returns `Ok(false)` for a same-slot move, which changes
/// nothing.
pub fn reorder(
    roster: &mut Roster,
    from: usize,
    to: usize,
    policy: TurnPolicy,
) -> Result<bool, TrackerError> {
    let len = roster.len();
    for index in [from, to] {
        if index >= len {
            return Err(TrackerError::OutOfBounds { index, len });
        }
    }
    let active_before = roster.active().cloned();
    if !move_item(&mut roster.characters, from, to) {
        return Ok(false);
    }
    roster.current_turn =
        policy.after_reorder(roster.current_turn, active_before.as_ref(), &roster.characters);
    roster.clamp_turn();
    Ok(true)
}
