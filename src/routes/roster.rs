//! `/api/roster/*` and `/api/tracker/restore` — roster store and reorder
//! routes for the main window.

use crate::config::{DEFAULT_SAVE_NAME, MAX_IMAGE_EDGE};
use crate::routes::util::{
    get_flag, get_index, get_param, missing_param, parse_form_body, parse_query, respond,
};
use crate::routes::view;
use crate::effects;
use crate::tracker::character::downscaled_dimensions;
use crate::tracker::state::{self, StoredValues, Tracker};

// ── POST /api/tracker/restore ──────────────────────────────────────

/// Handle POST /api/tracker/restore
/// Body params (each optional, absent = key not in localStorage):
///   save, theme, custom_background, sound_muted
///
/// Called once at page load. Runtime config and the remote link survive.
pub fn handle_restore_post(body: &str) -> String {
    let params = parse_form_body(body);
    let stored = StoredValues {
        save: get_param(&params, "save"),
        theme: get_param(&params, "theme"),
        custom_background: get_param(&params, "custom_background"),
        sound_muted: get_param(&params, "sound_muted"),
    };
    let (mut restored, fx) = Tracker::restore(&stored);
    state::with_tracker(|t| {
        restored.config = t.config;
        restored.channel = t.channel;
    });
    state::replace_tracker(restored);
    effects::to_script(&fx)
}

// ── GET /api/roster ────────────────────────────────────────────────

/// Handle GET /api/roster?width={px}&fullscreen={bool}
/// Returns the character row sized for the given row width.
pub fn handle_roster_get(query: &str) -> String {
    let params = parse_query(query);
    let width: f64 = get_param(&params, "width")
        .and_then(|s| s.parse().ok())
        .filter(|w: &f64| w.is_finite() && *w >= 0.0)
        .unwrap_or(0.0);
    let fullscreen = get_flag(&params, "fullscreen");
    state::with_tracker(|t| view::render_roster(&t.roster, width, fullscreen))
}

// ── POST /api/roster/add ───────────────────────────────────────────

/// Handle POST /api/roster/add
/// Body: name={name}&image={data uri}
pub fn handle_add_post(body: &str) -> String {
    let params = parse_form_body(body);
    let name = get_param(&params, "name").unwrap_or("");
    let image = get_param(&params, "image").unwrap_or("");
    respond(state::with_tracker_mut(|t| t.add_character(name, image)))
}

// ── POST /api/roster/delete ────────────────────────────────────────

/// Handle POST /api/roster/delete
/// Body: index={n}
pub fn handle_delete_post(body: &str) -> String {
    let params = parse_form_body(body);
    let Some(index) = get_index(&params, "index") else {
        return missing_param("index");
    };
    respond(state::with_tracker_mut(|t| t.delete(index)))
}

// ── POST /api/roster/reorder ───────────────────────────────────────

/// Handle POST /api/roster/reorder
/// Body params:
///   - action=start&index={n}   → mouse drag started on card n
///   - action=drop&index={n}    → dropped on card n
///   - from={n}&to={m}          → direct move
pub fn handle_reorder_post(body: &str) -> String {
    let params = parse_form_body(body);
    let action = get_param(&params, "action").unwrap_or("");
    let index = get_index(&params, "index");

    match (action, index) {
        ("start", Some(i)) => {
            state::with_tracker_mut(|t| t.drag_start(i));
            String::new()
        }
        ("drop", Some(i)) => respond(state::with_tracker_mut(|t| t.drop_on(i))),
        ("start" | "drop", None) => missing_param("index"),
        _ => match (get_index(&params, "from"), get_index(&params, "to")) {
            (Some(from), Some(to)) => respond(state::with_tracker_mut(|t| t.reorder(from, to))),
            _ => missing_param("from/to"),
        },
    }
}

// ── POST /api/roster/touch ─────────────────────────────────────────

/// Handle POST /api/roster/touch
/// Body: action=down|enter&index={n} or action=up
pub fn handle_touch_post(body: &str) -> String {
    let params = parse_form_body(body);
    let action = get_param(&params, "action").unwrap_or("");
    let index = get_index(&params, "index");

    match (action, index) {
        ("down", Some(i)) => {
            state::with_tracker_mut(|t| t.touch_down(i));
            String::new()
        }
        ("enter", Some(i)) => respond(state::with_tracker_mut(|t| t.touch_enter(i))),
        ("up", _) => {
            state::with_tracker_mut(|t| t.touch_up());
            String::new()
        }
        _ => missing_param("action/index"),
    }
}

// ── POST /api/roster/reset ─────────────────────────────────────────

/// Handle POST /api/roster/reset
/// Body: confirmed=true (the host asks the user first)
pub fn handle_reset_post(body: &str) -> String {
    let params = parse_form_body(body);
    let confirmed = get_flag(&params, "confirmed");
    effects::to_script(&state::with_tracker_mut(|t| t.reset(confirmed)))
}

// ── GET /api/roster/export ─────────────────────────────────────────

/// Handle GET /api/roster/export?name={file name}
/// An empty name means the user cancelled the prompt; no name at all takes
/// the default save name.
pub fn handle_export_get(query: &str) -> String {
    let params = parse_query(query);
    let name = get_param(&params, "name").unwrap_or(DEFAULT_SAVE_NAME);
    respond(state::with_tracker(|t| t.export(name)))
}

// ── POST /api/roster/import ────────────────────────────────────────

/// Handle POST /api/roster/import
/// Body: the raw text of the chosen save file.
pub fn handle_import_post(body: &str) -> String {
    respond(state::with_tracker_mut(|t| t.import(body)))
}

// ── GET /api/layout/image ──────────────────────────────────────────

/// Handle GET /api/layout/image?width={px}&height={px}
/// Returns the canvas size for a downscaled portrait as JSON.
pub fn handle_image_size_get(query: &str) -> String {
    let params = parse_query(query);
    let width = get_param(&params, "width").and_then(|s| s.parse::<u32>().ok());
    let height = get_param(&params, "height").and_then(|s| s.parse::<u32>().ok());
    match (width, height) {
        (Some(w), Some(h)) => {
            let (w, h) = downscaled_dimensions(w, h, MAX_IMAGE_EDGE);
            format!(r#"{{"width":{},"height":{}}}"#, w, h)
        }
        _ => missing_param("width/height"),
    }
}
