//! Initiative tracker: in-browser WASM core.
//!
//! Exports `handle_request(method, path, query, body)` for the page's Web
//! Worker bridge to call. Uses `matchit` for URL routing. Both the main
//! display and the remote popup load this module; the main window owns the
//! roster, the remote only mirrors it (`/api/mirror*`).

use wasm_bindgen::prelude::*;

pub mod config;
pub mod effects;
pub mod error;
pub mod logging;
pub mod routes;
pub mod sync;
pub mod tracker;

/// Install the console logger. `level` is a `log` level name
/// ("error", "warn", "info", "debug", "trace", "off").
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    logging::init(level);
}

/// Process an HTTP-like request and return an HTML fragment, a JSON string,
/// or an effects `<script>`.
///
/// # Arguments
/// * `method` — "GET" or "POST"
/// * `path`   — URL path (e.g., "/api/turn/next")
/// * `query`  — Query string (e.g., "?width=1200&fullscreen=false")
/// * `body`   — Request body. Empty string for GET requests.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    // Startup
    router.insert("/api/tracker/restore", "restore").ok();
    router.insert("/api/config", "config").ok();

    // Roster store + reorder
    router.insert("/api/roster", "roster").ok();
    router.insert("/api/roster/add", "roster_add").ok();
    router.insert("/api/roster/delete", "roster_delete").ok();
    router.insert("/api/roster/reorder", "roster_reorder").ok();
    router.insert("/api/roster/touch", "roster_touch").ok();
    router.insert("/api/roster/reset", "roster_reset").ok();
    router.insert("/api/roster/export", "roster_export").ok();
    router.insert("/api/roster/import", "roster_import").ok();
    router.insert("/api/layout/image", "layout_image").ok();

    // Turns, sound, keyboard, themes
    router.insert("/api/turn/next", "turn_next").ok();
    router.insert("/api/sound/mute", "sound_mute").ok();
    router.insert("/api/key", "key").ok();
    router.insert("/api/theme", "theme").ok();
    router.insert("/api/theme/custom", "theme_custom").ok();

    // Main-window end of the sync channel
    router.insert("/api/remote/opened", "remote_opened").ok();
    router.insert("/api/remote/closed", "remote_closed").ok();
    router.insert("/api/sync/message", "sync_message").ok();
    router.insert("/api/storage/changed", "storage_changed").ok();

    // Remote-window mirror
    router.insert("/api/mirror", "mirror").ok();
    router.insert("/api/mirror/snapshot", "mirror_snapshot").ok();
    router.insert("/api/mirror/drop", "mirror_drop").ok();
    router.insert("/api/mirror/command", "mirror_command").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("restore", "POST") => routes::roster::handle_restore_post(body),
            ("config", "POST") => routes::turn::handle_config_post(body),

            ("roster", "GET") => routes::roster::handle_roster_get(query),
            ("roster_add", "POST") => routes::roster::handle_add_post(body),
            ("roster_delete", "POST") => routes::roster::handle_delete_post(body),
            ("roster_reorder", "POST") => routes::roster::handle_reorder_post(body),
            ("roster_touch", "POST") => routes::roster::handle_touch_post(body),
            ("roster_reset", "POST") => routes::roster::handle_reset_post(body),
            ("roster_export", "GET") => routes::roster::handle_export_get(query),
            ("roster_import", "POST") => routes::roster::handle_import_post(body),
            ("layout_image", "GET") => routes::roster::handle_image_size_get(query),

            ("turn_next", "POST") => routes::turn::handle_next_post(body),
            ("sound_mute", "GET") => routes::turn::handle_mute_get(query),
            ("sound_mute", "POST") => routes::turn::handle_mute_post(body),
            ("key", "POST") => routes::turn::handle_key_post(body),
            ("theme", "GET") => routes::theme::handle_theme_get(query),
            ("theme", "POST") => routes::theme::handle_theme_post(body),
            ("theme_custom", "POST") => routes::theme::handle_custom_post(body),

            ("remote_opened", "POST") => routes::remote::handle_opened_post(body),
            ("remote_closed", "POST") => routes::remote::handle_closed_post(body),
            ("sync_message", "POST") => routes::remote::handle_sync_message_post(body),
            ("storage_changed", "POST") => routes::remote::handle_storage_changed_post(body),

            ("mirror", "GET") => routes::remote::handle_mirror_get(query),
            ("mirror_snapshot", "POST") => routes::remote::handle_mirror_snapshot_post(body),
            ("mirror_drop", "POST") => routes::remote::handle_mirror_drop_post(body),
            ("mirror_command", "POST") => routes::remote::handle_mirror_command_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-red-600">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-600">405 — method not allowed</span>"#.to_string()
}
