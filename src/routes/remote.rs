//! Sync routes.
//!
//! Main window: `/api/remote/*` track the popup's lifecycle,
//! `/api/sync/message` takes commands posted by the popup, and
//! `/api/storage/changed` reloads state another tab wrote.
//!
//! Remote window: `/api/mirror*` apply snapshots, render the mirror and turn
//! clicks and drops into commands for the opener.

use crate::effects::{self, Effect};
use crate::routes::util::{get_index, get_param, missing_param, parse_form_body, respond};
use crate::routes::view;
use crate::sync::mirror;
use crate::sync::protocol::{MainMessage, RemoteCommand};
use crate::tracker::state;

// ── POST /api/remote/opened ────────────────────────────────────────

/// The popup finished loading. Answers with a first snapshot.
pub fn handle_opened_post(_body: &str) -> String {
    effects::to_script(&state::with_tracker_mut(|t| t.remote_opened()))
}

// ── POST /api/remote/closed ────────────────────────────────────────

/// The popup closed or unloaded; further sends are dropped.
pub fn handle_closed_post(_body: &str) -> String {
    state::with_tracker_mut(|t| t.remote_closed());
    String::new()
}

// ── POST /api/sync/message ─────────────────────────────────────────

/// Handle POST /api/sync/message
/// Body: a `RemoteCommand` JSON object as received from the popup.
/// Malformed or out-of-range commands change nothing and send nothing.
pub fn handle_sync_message_post(body: &str) -> String {
    respond(
        RemoteCommand::from_json(body)
            .and_then(|cmd| state::with_tracker_mut(|t| t.handle_remote(cmd))),
    )
}

// ── POST /api/storage/changed ──────────────────────────────────────

/// Handle POST /api/storage/changed
/// Body: key={storage key}[&value={new value}][&background={customBackground}]
/// A missing `value` means the key was removed.
pub fn handle_storage_changed_post(body: &str) -> String {
    let params = parse_form_body(body);
    let Some(key) = get_param(&params, "key") else {
        return missing_param("key");
    };
    let value = get_param(&params, "value");
    let background = get_param(&params, "background");
    effects::to_script(&state::with_tracker_mut(|t| t.storage_changed(key, value, background)))
}

// ── POST /api/mirror/snapshot ──────────────────────────────────────

/// Remote window: a snapshot arrived from the opener.
pub fn handle_mirror_snapshot_post(body: &str) -> String {
    respond(MainMessage::from_json(body).map(|msg| {
        mirror::with_mirror_mut(|m| m.apply(msg));
        vec![Effect::Render]
    }))
}

// ── GET /api/mirror ────────────────────────────────────────────────

pub fn handle_mirror_get(_query: &str) -> String {
    mirror::with_mirror(|m| view::render_mirror(&m.roster, m.synced))
}

// ── POST /api/mirror/drop ──────────────────────────────────────────

/// Remote window drag: action=start|drop&index={n}.
/// A drop becomes a `reorderCharacters` command; the mirror is untouched.
pub fn handle_mirror_drop_post(body: &str) -> String {
    let params = parse_form_body(body);
    let action = get_param(&params, "action").unwrap_or("");
    let Some(index) = get_index(&params, "index") else {
        return missing_param("index");
    };
    match action {
        "start" => {
            mirror::with_mirror_mut(|m| m.drag_start(index));
            String::new()
        }
        "drop" => {
            let fx: Vec<Effect> = mirror::with_mirror_mut(|m| m.drop_on(index))
                .map(|cmd| Effect::SendToMain(cmd.to_json()))
                .into_iter()
                .collect();
            effects::to_script(&fx)
        }
        _ => missing_param("action"),
    }
}

// ── POST /api/mirror/command ───────────────────────────────────────

/// Remote window buttons: type=nextTurn|toggleMute|getCharacters.
pub fn handle_mirror_command_post(body: &str) -> String {
    let params = parse_form_body(body);
    let cmd = match get_param(&params, "type") {
        Some("nextTurn") => RemoteCommand::NextTurn,
        Some("toggleMute") => RemoteCommand::ToggleMute,
        Some("getCharacters") => RemoteCommand::GetCharacters,
        _ => return missing_param("type"),
    };
    effects::to_script(&[Effect::SendToMain(cmd.to_json())])
}
