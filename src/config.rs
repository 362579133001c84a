//! Tracker configuration — storage keys, layout constants, and the runtime
//! knobs the host can adjust through `/api/config`.
//!
//! The flat key/value store is `localStorage` on the host page. Keys are
//! shared by every window and tab of the tracker, so they must never change.

use serde::{Deserialize, Serialize};

use crate::tracker::policy::TurnPolicy;

// ── Persisted keys ─────────────────────────────────────────────────

/// Roster + active turn, as a `SaveDocument` JSON string.
pub const SAVE_KEY: &str = "initiativeTrackerSave";
/// Active theme name.
pub const THEME_KEY: &str = "initiativeTheme";
/// Custom background data URI.
pub const CUSTOM_BACKGROUND_KEY: &str = "customBackground";
/// Theme that was active before the last custom background upload.
pub const PREVIOUS_THEME_KEY: &str = "previousTheme";
/// `"true"` / `"false"`.
pub const SOUND_MUTED_KEY: &str = "soundMuted";

// ── Layout ─────────────────────────────────────────────────────────

pub const CARD_GAP: f64 = 10.0;
pub const MIN_CARD_WIDTH: f64 = 130.0;
pub const MAX_CARD_WIDTH: f64 = 250.0;
pub const MIN_CARD_HEIGHT: f64 = 150.0;
pub const MAX_CARD_HEIGHT: f64 = 400.0;
pub const MAX_CARD_HEIGHT_FULLSCREEN: f64 = 460.0;

/// (min ratio, base ratio) for windowed and fullscreen display.
pub const RATIO_WINDOWED: (f64, f64) = (1.2, 1.5);
pub const RATIO_FULLSCREEN: (f64, f64) = (1.4, 1.8);

/// Remote mirror uses fixed thumbnails.
pub const REMOTE_THUMB_PX: u32 = 35;
pub const REMOTE_NAME_FONT_PX: u32 = 7;

/// Long edge of an uploaded portrait after downscaling.
pub const MAX_IMAGE_EDGE: u32 = 500;

// ── Host-side behaviour ────────────────────────────────────────────

pub const TURN_SOUND_URL: &str = "sounds/turn.mp3";
pub const TURN_SOUND_VOLUME: f64 = 0.1;
/// Inactivity before the cursor hides in fullscreen.
pub const CURSOR_HIDE_DELAY_MS: u32 = 1000;

pub const REMOTE_URL: &str = "remote.html";
pub const REMOTE_WINDOW_NAME: &str = "DMRremote";
pub const REMOTE_WINDOW_FEATURES: &str = "width=480,height=350,top=100,left=100,menubar=no,toolbar=no,location=no,scrollbars=no,resizable=0,minimizable=yes,maximizable=0";

pub const DEFAULT_SAVE_NAME: &str = "roll-for-initiative-save";
pub const SAVE_VERSION: u32 = 1;

/// Runtime configuration, replaced wholesale by `POST /api/config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// How the active turn follows deletes and reorders.
    #[serde(default)]
    pub policy: TurnPolicy,
}

impl TrackerConfig {
    /// Parse a config JSON object. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, crate::error::TrackerError> {
        serde_json::from_str(json).map_err(crate::error::TrackerError::InvalidConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = TrackerConfig::from_json("{}").unwrap();
        assert_eq!(cfg.policy, TurnPolicy::PreserveActive);
    }

    #[test]
    fn config_selects_reset_policy() {
        let cfg = TrackerConfig::from_json(r#"{"policy":"resetToFirst"}"#).unwrap();
        assert_eq!(cfg.policy, TurnPolicy::ResetToFirst);
    }

    #[test]
    fn bad_config_is_an_error() {
        assert!(TrackerConfig::from_json(r#"{"policy":"sideways"}"#).is_err());
    }
}
