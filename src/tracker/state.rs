//! The main window's tracker: all mutable state in one struct, one method per
//! user-visible operation.
//!
//! Every method runs synchronously and returns the effects the host must
//! carry out. A roster change always yields, in order: persist, render, and a
//! snapshot to the remote if it is open.
//!
//! Lives in a `thread_local!` for the lifetime of the worker, accessed through
//! `with_tracker` / `with_tracker_mut` like the rest of the crate's state.

use std::cell::RefCell;

use crate::config::{SOUND_MUTED_KEY, SAVE_KEY, THEME_KEY, CUSTOM_BACKGROUND_KEY, TrackerConfig};
use crate::effects::Effect;
use crate::error::TrackerError;
use crate::sync::channel::SyncChannel;
use crate::sync::protocol::RemoteCommand;
use crate::tracker::character::Character;
use crate::tracker::keyboard::{Shortcut, shortcut_for};
use crate::tracker::reorder::{MouseDrag, TouchDrag};
use crate::tracker::roster::Roster;
use crate::tracker::theme::{Theme, ThemeState};
use crate::tracker::turns;

/// Values read from `localStorage` at page load.
#[derive(Debug, Clone, Default)]
pub struct StoredValues<'a> {
    pub save: Option<&'a str>,
    pub theme: Option<&'a str>,
    pub custom_background: Option<&'a str>,
    pub sound_muted: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub struct Tracker {
    pub roster: Roster,
    pub theme: ThemeState,
    pub sound_muted: bool,
    pub config: TrackerConfig,
    pub channel: SyncChannel,
    drag: MouseDrag,
    touch: TouchDrag,
}

fn parse_muted(value: Option<&str>) -> bool {
    value == Some("true")
}

impl Tracker {
    /// Build the tracker from persisted values.
    pub fn restore(stored: &StoredValues) -> (Tracker, Vec<Effect>) {
        let (theme, mut fx) = ThemeState::load(stored.theme, stored.custom_background);
        let tracker = Tracker {
            roster: Roster::load(stored.save),
            theme,
            sound_muted: parse_muted(stored.sound_muted),
            ..Tracker::default()
        };
        log::info!(
            "restored {} characters (turn {}), theme {}",
            tracker.roster.len(),
            tracker.roster.current_turn,
            tracker.theme.active.as_str()
        );
        fx.extend([Effect::Render, Effect::RenderTheme, Effect::RenderMute]);
        (tracker, fx)
    }

    /// Persist, re-render and re-sync after any roster change.
    fn roster_changed(&self) -> Vec<Effect> {
        let mut fx = vec![self.roster.save(), Effect::Render];
        fx.extend(self.channel.send_snapshot(&self.roster));
        fx
    }

    /// Drop any half-finished drag; its source index no longer names the
    /// same character once the list is replaced or shortened.
    fn clear_gestures(&mut self) {
        self.drag = MouseDrag::default();
        self.touch = TouchDrag::default();
    }

    // ── Roster store ───────────────────────────────────────────────

    pub fn add_character(&mut self, name: &str, image: &str) -> Result<Vec<Effect>, TrackerError> {
        let character = Character::new(name, image)?;
        log::debug!("adding {}", character.name);
        self.roster.characters.push(character);
        Ok(self.roster_changed())
    }

    pub fn export(&self, name: &str) -> Result<Vec<Effect>, TrackerError> {
        Ok(self.roster.export(name)?.into_iter().collect())
    }

    pub fn import(&mut self, text: &str) -> Result<Vec<Effect>, TrackerError> {
        self.roster = Roster::import(text)?;
        self.clear_gestures();
        log::info!("imported {} characters", self.roster.len());
        Ok(self.roster_changed())
    }

    /// Clear everything. Without confirmation nothing happens.
    pub fn reset(&mut self, confirmed: bool) -> Vec<Effect> {
        if !confirmed {
            return Vec::new();
        }
        self.roster = Roster::default();
        self.clear_gestures();
        let mut fx = vec![Effect::Remove { key: SAVE_KEY }, Effect::Render];
        fx.extend(self.channel.send_snapshot(&self.roster));
        fx
    }

    // ── Turn controller ────────────────────────────────────────────

    pub fn advance(&mut self) -> Vec<Effect> {
        if !turns::advance(&mut self.roster) {
            return Vec::new();
        }
        let mut fx = Vec::with_capacity(4);
        if !self.sound_muted {
            fx.push(Effect::PlaySound);
        }
        fx.extend(self.roster_changed());
        fx
    }

    pub fn delete(&mut self, index: usize) -> Result<Vec<Effect>, TrackerError> {
        let removed = turns::delete(&mut self.roster, index, self.config.policy)?;
        self.clear_gestures();
        log::debug!("deleted {} at {}", removed.name, index);
        Ok(self.roster_changed())
    }

    pub fn toggle_mute(&mut self) -> Vec<Effect> {
        self.sound_muted = !self.sound_muted;
        vec![
            Effect::Persist {
                key: SOUND_MUTED_KEY,
                value: self.sound_muted.to_string(),
            },
            Effect::RenderMute,
        ]
    }

    // ── Reorder engine ─────────────────────────────────────────────

    /// Move a character. Out-of-range indices are rejected; a same-slot move
    /// does nothing and emits nothing.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<Vec<Effect>, TrackerError> {
        if turns::reorder(&mut self.roster, from, to, self.config.policy)? {
            Ok(self.roster_changed())
        } else {
            Ok(Vec::new())
        }
    }

    pub fn drag_start(&mut self, index: usize) {
        self.drag.start(index);
    }

    pub fn drop_on(&mut self, target: usize) -> Result<Vec<Effect>, TrackerError> {
        match self.drag.drop_on(target) {
            Some((from, to)) => self.reorder(from, to),
            None => Ok(Vec::new()),
        }
    }

    pub fn touch_down(&mut self, index: usize) {
        self.touch.pointer_down(index);
    }

    pub fn touch_enter(&mut self, target: usize) -> Result<Vec<Effect>, TrackerError> {
        match self.touch.pointer_enter(target) {
            Some((from, to)) => self.reorder(from, to).inspect_err(|_| self.touch.pointer_up()),
            None => Ok(Vec::new()),
        }
    }

    pub fn touch_up(&mut self) {
        self.touch.pointer_up();
    }

    // ── Themes ─────────────────────────────────────────────────────

    pub fn set_theme(&mut self, theme: Theme) -> Vec<Effect> {
        self.theme.set(theme)
    }

    pub fn cycle_theme(&mut self) -> Vec<Effect> {
        self.theme.cycle()
    }

    pub fn set_custom_background(&mut self, data_uri: &str) -> Result<Vec<Effect>, TrackerError> {
        self.theme.set_custom_background(data_uri)
    }

    // ── Input surfaces ─────────────────────────────────────────────

    pub fn key(&mut self, key: &str, target_tag: &str) -> Vec<Effect> {
        match shortcut_for(key, target_tag) {
            Some(Shortcut::NextTurn) => self.advance(),
            Some(Shortcut::CycleTheme) => self.cycle_theme(),
            Some(Shortcut::ToggleMute) => self.toggle_mute(),
            Some(Shortcut::ToggleFullscreen) => vec![Effect::ToggleFullscreen],
            Some(Shortcut::OpenRemote) => vec![Effect::OpenRemote],
            None => Vec::new(),
        }
    }

    pub fn remote_opened(&mut self) -> Vec<Effect> {
        self.channel.open();
        self.channel.send_snapshot(&self.roster).into_iter().collect()
    }

    pub fn remote_closed(&mut self) {
        self.channel.close();
    }

    /// Dispatch a command from the remote into the same entry points local
    /// input uses.
    pub fn handle_remote(&mut self, cmd: RemoteCommand) -> Result<Vec<Effect>, TrackerError> {
        log::debug!("remote command {:?}", cmd);
        match cmd {
            RemoteCommand::NextTurn => Ok(self.advance()),
            RemoteCommand::ToggleMute => Ok(self.toggle_mute()),
            RemoteCommand::GetCharacters => {
                Ok(self.channel.send_snapshot(&self.roster).into_iter().collect())
            }
            RemoteCommand::ReorderCharacters { from, to } => self.reorder(from, to),
        }
    }

    /// Another tab wrote to `localStorage`. Reload that slice; never write it
    /// back.
    pub fn storage_changed(&mut self, key: &str, value: Option<&str>, background: Option<&str>) -> Vec<Effect> {
        match key {
            SAVE_KEY => {
                self.roster = Roster::load(value);
                self.clear_gestures();
                let mut fx = vec![Effect::Render];
                fx.extend(self.channel.send_snapshot(&self.roster));
                fx
            }
            THEME_KEY | CUSTOM_BACKGROUND_KEY => {
                let theme = if key == THEME_KEY {
                    value.map(str::to_string)
                } else {
                    Some(self.theme.active.as_str().to_string())
                };
                let background = if key == CUSTOM_BACKGROUND_KEY { value } else { background };
                // The tab that wrote the value owns any fallback persist.
                let (theme, _) = ThemeState::load(theme.as_deref(), background);
                self.theme = theme;
                vec![Effect::RenderTheme]
            }
            SOUND_MUTED_KEY => {
                self.sound_muted = parse_muted(value);
                vec![Effect::RenderMute]
            }
            _ => Vec::new(),
        }
    }
}

thread_local! {
    static TRACKER: RefCell<Tracker> = RefCell::new(Tracker::default());
}

/// Execute a closure with read access to the tracker.
pub fn with_tracker<F, R>(f: F) -> R
where
    F: FnOnce(&Tracker) -> R,
{
    TRACKER.with(|t| f(&t.borrow()))
}

/// Execute a closure with mutable access to the tracker.
pub fn with_tracker_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Tracker) -> R,
{
    TRACKER.with(|t| f(&mut t.borrow_mut()))
}

/// Replace the entire tracker (startup restore, tests).
pub fn replace_tracker(new_tracker: Tracker) {
    TRACKER.with(|t| *t.borrow_mut() = new_tracker);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::policy::TurnPolicy;

    const IMG: &str = "data:image/png;base64,AAAA";

    fn tracker_with(names: &[&str]) -> Tracker {
        let mut t = Tracker::default();
        for n in names {
            t.add_character(n, IMG).unwrap();
        }
        t
    }

    fn has_sync(fx: &[Effect]) -> bool {
        fx.iter().any(|e| matches!(e, Effect::Sync(_)))
    }

    #[test]
    fn restore_reads_all_slices() {
        let save = r#"{"characters":[{"name":"Vax","image":"x"}],"currentTurn":0}"#;
        let (t, fx) = Tracker::restore(&StoredValues {
            save: Some(save),
            theme: Some("forest"),
            custom_background: None,
            sound_muted: Some("true"),
        });
        assert_eq!(t.roster.len(), 1);
        assert_eq!(t.theme.active, Theme::Forest);
        assert!(t.sound_muted);
        assert!(fx.contains(&Effect::Render));
    }

    #[test]
    fn add_rejects_missing_name_without_change() {
        let mut t = Tracker::default();
        assert!(matches!(t.add_character("", IMG), Err(TrackerError::MissingInput)));
        assert!(t.roster.is_empty());
    }

    #[test]
    fn advance_plays_sound_unless_muted() {
        let mut t = tracker_with(&["a", "b"]);
        let fx = t.advance();
        assert_eq!(fx[0], Effect::PlaySound);
        assert_eq!(t.roster.current_turn, 1);

        t.toggle_mute();
        let fx = t.advance();
        assert!(!fx.contains(&Effect::PlaySound));
        assert_eq!(t.roster.current_turn, 0);
    }

    #[test]
    fn advance_empty_emits_nothing() {
        let mut t = Tracker::default();
        assert!(t.advance().is_empty());
    }

    #[test]
    fn mutations_sync_only_when_remote_alive() {
        let mut t = tracker_with(&["a", "b"]);
        assert!(!has_sync(&t.advance()));
        t.remote_opened();
        assert!(has_sync(&t.advance()));
        t.remote_closed();
        assert!(!has_sync(&t.advance()));
    }

    #[test]
    fn remote_opened_pushes_snapshot() {
        let mut t = tracker_with(&["a"]);
        assert!(has_sync(&t.remote_opened()));
    }

    #[test]
    fn remote_get_characters_replies_with_snapshot() {
        let mut t = tracker_with(&["a"]);
        t.channel.open();
        let fx = t.handle_remote(RemoteCommand::GetCharacters).unwrap();
        assert_eq!(fx.len(), 1);
        assert!(has_sync(&fx));
    }

    #[test]
    fn remote_out_of_bounds_reorder_is_rejected_silently() {
        let mut t = tracker_with(&["a", "b"]);
        t.channel.open();
        let before = t.roster.clone();
        let result = t.handle_remote(RemoteCommand::ReorderCharacters { from: 0, to: 9 });
        assert!(matches!(result, Err(TrackerError::OutOfBounds { .. })));
        assert_eq!(t.roster, before);
    }

    #[test]
    fn remote_reorder_moves_and_syncs() {
        let mut t = tracker_with(&["a", "b", "c"]);
        t.channel.open();
        let fx = t
            .handle_remote(RemoteCommand::ReorderCharacters { from: 2, to: 0 })
            .unwrap();
        assert_eq!(t.roster.characters[0].name, "c");
        assert_eq!(t.roster.active().unwrap().name, "a");
        assert!(has_sync(&fx));
    }

    #[test]
    fn remote_toggle_mute_persists() {
        let mut t = Tracker::default();
        let fx = t.handle_remote(RemoteCommand::ToggleMute).unwrap();
        assert!(t.sound_muted);
        assert!(fx.contains(&Effect::Persist {
            key: SOUND_MUTED_KEY,
            value: "true".to_string()
        }));
    }

    #[test]
    fn reset_requires_confirmation() {
        let mut t = tracker_with(&["a"]);
        assert!(t.reset(false).is_empty());
        assert_eq!(t.roster.len(), 1);
        let fx = t.reset(true);
        assert!(t.roster.is_empty());
        assert_eq!(fx[0], Effect::Remove { key: SAVE_KEY });
    }

    #[test]
    fn import_replaces_and_persists() {
        let mut t = tracker_with(&["old"]);
        let fx = t
            .import(r#"{"characters":[{"name":"new","image":"x"},{"name":"n2","image":"y"}],"currentTurn":1}"#)
            .unwrap();
        assert_eq!(t.roster.len(), 2);
        assert_eq!(t.roster.current_turn, 1);
        assert!(matches!(fx[0], Effect::Persist { key: SAVE_KEY, .. }));
    }

    #[test]
    fn bad_import_leaves_roster() {
        let mut t = tracker_with(&["keep"]);
        assert!(t.import(r#"{"characters":"nope"}"#).is_err());
        assert_eq!(t.roster.characters[0].name, "keep");
    }

    #[test]
    fn drag_and_drop_reorders() {
        let mut t = tracker_with(&["a", "b", "c"]);
        t.drag_start(0);
        t.drop_on(2).unwrap();
        let names: Vec<_> = t.roster.characters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        assert_eq!(t.roster.active().unwrap().name, "a");
    }

    #[test]
    fn touch_drag_reorders_continuously() {
        let mut t = tracker_with(&["a", "b", "c"]);
        t.touch_down(0);
        t.touch_enter(1).unwrap();
        t.touch_enter(2).unwrap();
        t.touch_up();
        let names: Vec<_> = t.roster.characters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        assert!(t.touch_enter(0).unwrap().is_empty());
    }

    #[test]
    fn reset_policy_applies_to_delete() {
        let mut t = tracker_with(&["a", "b", "c"]);
        t.config.policy = TurnPolicy::ResetToFirst;
        t.advance();
        t.advance();
        t.delete(0).unwrap();
        assert_eq!(t.roster.current_turn, 0);
    }

    #[test]
    fn keys_route_to_operations() {
        let mut t = tracker_with(&["a", "b"]);
        t.key("n", "BODY");
        assert_eq!(t.roster.current_turn, 1);
        t.key("n", "INPUT");
        assert_eq!(t.roster.current_turn, 1);
        t.key("t", "BODY");
        assert_eq!(t.theme.active, Theme::Dungeon);
        t.key("m", "BODY");
        assert!(t.sound_muted);
        assert_eq!(t.key("f", "BODY"), vec![Effect::ToggleFullscreen]);
        assert_eq!(t.key("r", "BODY"), vec![Effect::OpenRemote]);
    }

    #[test]
    fn storage_change_reloads_roster_without_persisting() {
        let mut t = tracker_with(&["a"]);
        let fx = t.storage_changed(
            SAVE_KEY,
            Some(r#"{"characters":[{"name":"x","image":"i"},{"name":"y","image":"i"}],"currentTurn":1}"#),
            None,
        );
        assert_eq!(t.roster.len(), 2);
        assert_eq!(fx, vec![Effect::Render]);
    }

    #[test]
    fn storage_change_reloads_mute_and_theme() {
        let mut t = Tracker::default();
        t.storage_changed(SOUND_MUTED_KEY, Some("true"), None);
        assert!(t.sound_muted);
        t.storage_changed(THEME_KEY, Some("spooky"), None);
        assert_eq!(t.theme.active, Theme::Spooky);
        assert!(t.storage_changed("unrelated", Some("1"), None).is_empty());
    }

    fn names(t: &Tracker) -> Vec<&str> {
        t.roster.characters.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn storage_reload_cancels_touch_drag() {
        let mut t = tracker_with(&["a", "b", "c"]);
        t.touch_down(1);
        t.storage_changed(
            SAVE_KEY,
            Some(r#"{"characters":[{"name":"x","image":"i"},{"name":"y","image":"i"},{"name":"z","image":"i"}]}"#),
            None,
        );
        assert!(t.touch_enter(0).unwrap().is_empty());
        assert_eq!(names(&t), vec!["x", "y", "z"]);
    }

    #[test]
    fn delete_cancels_mouse_drag() {
        let mut t = tracker_with(&["a", "b", "c"]);
        t.drag_start(2);
        t.delete(0).unwrap();
        assert!(t.drop_on(0).unwrap().is_empty());
        assert_eq!(names(&t), vec!["b", "c"]);
    }

    #[test]
    fn import_cancels_touch_drag() {
        let mut t = tracker_with(&["a", "b"]);
        t.touch_down(0);
        t.import(r#"{"characters":[{"name":"p","image":"i"},{"name":"q","image":"i"}]}"#)
            .unwrap();
        assert!(t.touch_enter(1).unwrap().is_empty());
        assert_eq!(names(&t), vec!["p", "q"]);
    }

    #[test]
    fn storage_custom_theme_uses_background() {
        let mut t = Tracker::default();
        let fx = t.storage_changed(THEME_KEY, Some("custom"), Some(IMG));
        assert_eq!(t.theme.active, Theme::Custom);
        assert_eq!(t.theme.custom_background.as_deref(), Some(IMG));
        assert_eq!(fx, vec![Effect::RenderTheme]);
    }

    #[test]
    fn storage_custom_theme_without_background_does_not_persist() {
        let mut t = Tracker::default();
        let fx = t.storage_changed(THEME_KEY, Some("custom"), None);
        assert_eq!(t.theme.active, Theme::Default);
        assert_eq!(fx, vec![Effect::RenderTheme]);
    }

    #[test]
    fn storage_background_change_keeps_active_theme() {
        let mut t = Tracker::default();
        t.set_theme(Theme::Icy);
        let fx = t.storage_changed(CUSTOM_BACKGROUND_KEY, Some(IMG), None);
        assert_eq!(t.theme.active, Theme::Icy);
        assert_eq!(t.theme.custom_background.as_deref(), Some(IMG));
        assert_eq!(fx, vec![Effect::RenderTheme]);

        t.set_custom_background(IMG).unwrap();
        let fx = t.storage_changed(CUSTOM_BACKGROUND_KEY, None, None);
        assert_eq!(t.theme.active, Theme::Default);
        assert!(t.theme.custom_background.is_none());
        assert_eq!(fx, vec![Effect::RenderTheme]);
    }

    #[test]
    fn thread_local_tracker_replace() {
        replace_tracker(tracker_with(&["z"]));
        with_tracker(|t| assert_eq!(t.roster.len(), 1));
        with_tracker_mut(|t| t.advance());
        replace_tracker(Tracker::default());
        with_tracker(|t| assert!(t.roster.is_empty()));
    }
}
