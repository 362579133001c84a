//! Side effects requested by a state transition.
//!
//! Transitions in `tracker` never touch the page. They return a list of
//! `Effect`s, and the route layer turns that list into one inline `<script>`
//! that calls the page's `initiativeHost` object. The host owns
//! `localStorage`, audio, the popup handle, downloads and alerts.

use crate::config;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write a key to the persistent store.
    Persist { key: &'static str, value: String },
    /// Erase a key from the persistent store.
    Remove { key: &'static str },
    /// Play the turn-advance sound. Failures are the host's to swallow.
    PlaySound,
    /// Re-render the main roster row.
    Render,
    /// Re-render the theme (body classes / background).
    RenderTheme,
    /// Refresh the mute button.
    RenderMute,
    /// Push this JSON message to the remote window.
    Sync(String),
    /// Remote window only: post this JSON command to the opener.
    SendToMain(String),
    /// Blocking alert.
    Alert(String),
    /// Offer a file download.
    Download { filename: String, contents: String },
    /// Open (or focus) the remote popup.
    OpenRemote,
    /// Enter or leave fullscreen.
    ToggleFullscreen,
}

/// Encode a string as a JS string literal that is safe inside `<script>`.
fn js_str(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

fn effect_js(effect: &Effect) -> String {
    match effect {
        Effect::Persist { key, value } => {
            format!("h.persist({}, {});", js_str(key), js_str(value))
        }
        Effect::Remove { key } => format!("h.remove({});", js_str(key)),
        Effect::PlaySound => format!(
            "h.playSound({}, {});",
            js_str(config::TURN_SOUND_URL),
            config::TURN_SOUND_VOLUME
        ),
        Effect::Render => "h.render();".to_string(),
        Effect::RenderTheme => "h.renderTheme();".to_string(),
        Effect::RenderMute => "h.renderMute();".to_string(),
        Effect::Sync(json) => format!("h.postToRemote({});", js_str(json)),
        Effect::SendToMain(json) => format!("h.postToOpener({});", js_str(json)),
        Effect::Alert(message) => format!("h.alert({});", js_str(message)),
        Effect::Download { filename, contents } => {
            format!("h.download({}, {});", js_str(filename), js_str(contents))
        }
        Effect::OpenRemote => format!(
            "h.openRemote({}, {}, {});",
            js_str(config::REMOTE_URL),
            js_str(config::REMOTE_WINDOW_NAME),
            js_str(config::REMOTE_WINDOW_FEATURES)
        ),
        Effect::ToggleFullscreen => format!(
            "h.toggleFullscreen({});",
            config::CURSOR_HIDE_DELAY_MS
        ),
    }
}

/// Render effects as a single `<script>` block. Empty input renders nothing.
pub fn to_script(effects: &[Effect]) -> String {
    if effects.is_empty() {
        return String::new();
    }
    let mut js = String::with_capacity(128 * effects.len());
    js.push_str("<script>(function(h){if(!h)return;");
    for effect in effects {
        js.push_str(&effect_js(effect));
    }
    js.push_str("})(self.initiativeHost);</script>");
    js
}
