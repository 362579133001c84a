//! Keyboard shortcuts for the main window.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    NextTurn,
    CycleTheme,
    ToggleMute,
    ToggleFullscreen,
    OpenRemote,
}

/// Map a `KeyboardEvent.key` to a shortcut. `target_tag` is the tag name of
/// the focused element; typing into a text field never triggers anything.
pub fn shortcut_for(key: &str, target_tag: &str) -> Option<Shortcut> {
    let tag = target_tag.to_ascii_uppercase();
    if tag == "INPUT" || tag == "TEXTAREA" {
        return None;
    }
    match key.to_lowercase().as_str() {
        "n" => Some(Shortcut::NextTurn),
        "t" => Some(Shortcut::CycleTheme),
        "m" => Some(Shortcut::ToggleMute),
        "f" => Some(Shortcut::ToggleFullscreen),
        "r" => Some(Shortcut::OpenRemote),
        _ => None,
    }
}
