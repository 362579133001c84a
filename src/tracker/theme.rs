//! Backdrop themes. The order of `Theme::ALL` is the keyboard cycle order.

use serde::{Deserialize, Serialize};

use crate::config::{CUSTOM_BACKGROUND_KEY, PREVIOUS_THEME_KEY, THEME_KEY};
use crate::effects::Effect;
use crate::error::TrackerError;
use crate::tracker::character::is_image_data_uri;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Dungeon,
    Forest,
    Arcane,
    Spooky,
    Hellfire,
    Icy,
    Townsquare,
    Fey,
    Custom,
}

impl Theme {
    pub const ALL: [Theme; 10] = [
        Theme::Default,
        Theme::Dungeon,
        Theme::Forest,
        Theme::Arcane,
        Theme::Spooky,
        Theme::Hellfire,
        Theme::Icy,
        Theme::Townsquare,
        Theme::Fey,
        Theme::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Dungeon => "dungeon",
            Theme::Forest => "forest",
            Theme::Arcane => "arcane",
            Theme::Spooky => "spooky",
            Theme::Hellfire => "hellfire",
            Theme::Icy => "icy",
            Theme::Townsquare => "townsquare",
            Theme::Fey => "fey",
            Theme::Custom => "custom",
        }
    }

    pub fn parse(name: &str) -> Result<Theme, TrackerError> {
        Theme::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| TrackerError::UnknownTheme(name.to_string()))
    }

    /// Next theme in cycle order, wrapping after `Custom`.
    pub fn next(self) -> Theme {
        let idx = Theme::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Theme::ALL[(idx + 1) % Theme::ALL.len()]
    }

    /// CSS class applied to `<body>`; `None` for custom backgrounds.
    pub fn body_class(self) -> Option<String> {
        match self {
            Theme::Custom => None,
            t => Some(format!("theme-{}", t.as_str())),
        }
    }
}

/// Theme slice of the tracker state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub active: Theme,
    pub custom_background: Option<String>,
}

impl ThemeState {
    /// Rebuild from persisted values. A stored `custom` with no background
    /// falls back to `default`, and the fallback is written back.
    pub fn load(theme: Option<&str>, background: Option<&str>) -> (ThemeState, Vec<Effect>) {
        let custom_background = background.filter(|b| !b.is_empty()).map(str::to_string);
        let active = match theme.map(Theme::parse) {
            Some(Ok(t)) => t,
            Some(Err(e)) => {
                log::warn!("{}; using default", e);
                Theme::Default
            }
            None => Theme::Default,
        };

        if active == Theme::Custom && custom_background.is_none() {
            let state = ThemeState {
                active: Theme::Default,
                custom_background,
            };
            let fx = vec![Effect::Persist {
                key: THEME_KEY,
                value: Theme::Default.as_str().to_string(),
            }];
            return (state, fx);
        }
        (ThemeState { active, custom_background }, Vec::new())
    }

    pub fn set(&mut self, theme: Theme) -> Vec<Effect> {
        self.active = theme;
        vec![
            Effect::Persist {
                key: THEME_KEY,
                value: theme.as_str().to_string(),
            },
            Effect::RenderTheme,
        ]
    }

    /// Keyboard `t`.
    pub fn cycle(&mut self) -> Vec<Effect> {
        self.set(self.active.next())
    }

    /// Store an uploaded background and switch to it. The theme that was
    /// active before is remembered under `previousTheme`.
    pub fn set_custom_background(&mut self, data_uri: &str) -> Result<Vec<Effect>, TrackerError> {
        if !is_image_data_uri(data_uri) {
            return Err(TrackerError::InvalidImage);
        }
        let mut fx = vec![
            Effect::Persist {
                key: PREVIOUS_THEME_KEY,
                value: self.active.as_str().to_string(),
            },
            Effect::Persist {
                key: CUSTOM_BACKGROUND_KEY,
                value: data_uri.to_string(),
            },
        ];
        self.custom_background = Some(data_uri.to_string());
        fx.extend(self.set(Theme::Custom));
        Ok(fx)
    }
}
