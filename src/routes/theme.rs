//! `/api/theme*` — theme selection, keyboard cycling, custom backgrounds.

use crate::routes::util::{get_param, missing_param, parse_form_body, respond};
use crate::tracker::state;
use crate::tracker::theme::Theme;

// ── GET /api/theme ─────────────────────────────────────────────────

/// Handle GET /api/theme
/// Returns what the host needs to paint the backdrop, as JSON:
/// `{"theme":"forest","className":"theme-forest","background":null}`.
pub fn handle_theme_get(_query: &str) -> String {
    state::with_tracker(|t| {
        let background = match t.theme.active {
            Theme::Custom => t.theme.custom_background.as_deref(),
            _ => None,
        };
        serde_json::json!({
            "theme": t.theme.active.as_str(),
            "className": t.theme.active.body_class(),
            "background": background,
        })
        .to_string()
    })
}

// ── POST /api/theme ────────────────────────────────────────────────

/// Handle POST /api/theme
/// Body params:
///   - action=cycle      → next theme in order
///   - theme={name}      → pick a theme from the menu
pub fn handle_theme_post(body: &str) -> String {
    let params = parse_form_body(body);
    if get_param(&params, "action") == Some("cycle") {
        return respond(Ok(state::with_tracker_mut(|t| t.cycle_theme())));
    }
    match get_param(&params, "theme") {
        Some(name) => respond(
            Theme::parse(name).map(|theme| state::with_tracker_mut(|t| t.set_theme(theme))),
        ),
        None => missing_param("theme"),
    }
}

// ── POST /api/theme/custom ─────────────────────────────────────────

/// Handle POST /api/theme/custom
/// Body: image={data uri}
pub fn handle_custom_post(body: &str) -> String {
    let params = parse_form_body(body);
    let image = get_param(&params, "image").unwrap_or("");
    respond(state::with_tracker_mut(|t| t.set_custom_background(image)))
}
