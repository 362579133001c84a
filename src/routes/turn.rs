//! `/api/turn/*`, `/api/sound/*`, `/api/key` and `/api/config` — turn
//! controller and input surfaces for the main window.

use crate::config::TrackerConfig;
use crate::effects;
use crate::routes::util::{get_param, parse_form_body, parse_query, respond};
use crate::routes::view;
use crate::tracker::state;

// ── POST /api/turn/next ────────────────────────────────────────────

pub fn handle_next_post(_body: &str) -> String {
    effects::to_script(&state::with_tracker_mut(|t| t.advance()))
}

// ── POST /api/sound/mute ───────────────────────────────────────────

pub fn handle_mute_post(_body: &str) -> String {
    effects::to_script(&state::with_tracker_mut(|t| t.toggle_mute()))
}

// ── GET /api/sound/mute ────────────────────────────────────────────

/// Handle GET /api/sound/mute?view=main|remote
/// Returns the mute button for the requesting window.
pub fn handle_mute_get(query: &str) -> String {
    let params = parse_query(query);
    let remote = get_param(&params, "view") == Some("remote");
    let muted = state::with_tracker(|t| t.sound_muted);
    view::render_mute_button(muted, remote)
}

// ── POST /api/key ──────────────────────────────────────────────────

/// Handle POST /api/key
/// Body: key={KeyboardEvent.key}&target={focused tag name}
pub fn handle_key_post(body: &str) -> String {
    let params = parse_form_body(body);
    let key = get_param(&params, "key").unwrap_or("");
    let target = get_param(&params, "target").unwrap_or("");
    effects::to_script(&state::with_tracker_mut(|t| t.key(key, target)))
}

// ── POST /api/config ───────────────────────────────────────────────

/// Handle POST /api/config
/// Body: JSON, e.g. `{"policy":"resetToFirst"}`.
pub fn handle_config_post(body: &str) -> String {
    respond(TrackerConfig::from_json(body).map(|cfg| {
        log::info!("turn policy set to {:?}", cfg.policy);
        state::with_tracker_mut(|t| t.config = cfg);
        Vec::new()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::policy::TurnPolicy;
    use crate::tracker::state::Tracker;

    fn reset_state() {
        state::replace_tracker(Tracker::default());
    }

    fn seed(names: &[&str]) {
        state::with_tracker_mut(|t| {
            for n in names {
                t.add_character(n, "data:image/png;base64,AAAA").unwrap();
            }
        });
    }

    #[test]
    fn next_turn_plays_and_persists() {
        reset_state();
        seed(&["a", "b"]);
        let script = handle_next_post("");
        assert!(script.contains("h.playSound(\"sounds/turn.mp3\", 0.1);"));
        assert!(script.contains("h.render();"));
        assert_eq!(state::with_tracker(|t| t.roster.current_turn), 1);
        reset_state();
    }

    #[test]
    fn next_turn_on_empty_is_silent() {
        reset_state();
        assert!(handle_next_post("").is_empty());
        reset_state();
    }

    #[test]
    fn mute_round_trip() {
        reset_state();
        let script = handle_mute_post("");
        assert!(script.contains(r#"h.persist("soundMuted", "true");"#));
        assert!(handle_mute_get("?view=main").contains("&#x1F507;"));
        assert!(handle_mute_get("?view=remote").contains("Toggle Sound"));
        reset_state();
    }

    #[test]
    fn key_in_text_field_does_nothing() {
        reset_state();
        seed(&["a", "b"]);
        assert!(handle_key_post("key=n&target=INPUT").is_empty());
        assert_eq!(state::with_tracker(|t| t.roster.current_turn), 0);
        assert!(handle_key_post("key=r&target=BODY").contains("h.openRemote(\"remote.html\""));
        reset_state();
    }

    #[test]
    fn config_switches_policy() {
        reset_state();
        handle_config_post(r#"{"policy":"resetToFirst"}"#);
        assert_eq!(state::with_tracker(|t| t.config.policy), TurnPolicy::ResetToFirst);
        handle_config_post("not json");
        assert_eq!(state::with_tracker(|t| t.config.policy), TurnPolicy::ResetToFirst);
        reset_state();
    }
}
