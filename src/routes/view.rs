//! HTML rendering for the main roster row, the remote mirror, and the mute
//! button. Drag, touch and delete handlers post back through
//! `initiativeHost.post(path, body)`.

use crate::config::{REMOTE_NAME_FONT_PX, REMOTE_THUMB_PX};
use crate::routes::util::escape_html;
use crate::tracker::layout::layout;
use crate::tracker::roster::Roster;

/// Render the main window's character row for a row `row_width` pixels wide.
pub fn render_roster(roster: &Roster, row_width: f64, fullscreen: bool) -> String {
    if roster.is_empty() {
        return r#"<p class="empty-roster">Add a character to roll for initiative.</p>"#.to_string();
    }

    let card = layout(roster.len(), row_width, fullscreen);
    let mut html = String::with_capacity(512 * roster.len());

    for (i, character) in roster.characters.iter().enumerate() {
        let active = if i == roster.current_turn { " active" } else { "" };
        html.push_str(&format!(
            r#"<div class="character{active}" draggable="true" data-index="{i}" style="width:{w}px; flex:0 0 {w}px;" ondragstart="initiativeHost.post('/api/roster/reorder','action=start&amp;index={i}')" ondragover="event.preventDefault()" ondrop="initiativeHost.post('/api/roster/reorder','action=drop&amp;index={i}')" onpointerdown="event.pointerType==='touch'&amp;&amp;(this.setPointerCapture(event.pointerId),initiativeHost.post('/api/roster/touch','action=down&amp;index={i}'))" onpointerenter="initiativeHost.post('/api/roster/touch','action=enter&amp;index={i}')" onpointerup="initiativeHost.post('/api/roster/touch','action=up')">"#,
            active = active,
            i = i,
            w = card.width,
        ));
        html.push_str(&format!(
            r#"<div style="height:{}px; width:100%; overflow:hidden;"><img src="{}" style="width:100%; height:100%; object-fit:cover;"></div>"#,
            card.height,
            escape_html(&character.image)
        ));
        html.push_str(&format!(
            r#"<p><strong style="font-size:{}px;">{}</strong></p>"#,
            card.font_size,
            escape_html(&character.name)
        ));
        html.push_str(&format!(
            r#"<div class="delete-tab"><button class="delete-btn" aria-label="Remove character" onclick="initiativeHost.post('/api/roster/delete','index={}')"><span class="skull">&#x2620;</span></button></div>"#,
            i
        ));
        html.push_str("</div>");
    }

    html
}

/// Render the remote window's mirror: fixed thumbnails, drag to reorder.
pub fn render_mirror(roster: &Roster, synced: bool) -> String {
    let mut html = String::with_capacity(256 * (roster.len() + 2));

    html.push_str(r#"<div class="remote-controls">"#);
    html.push_str(r#"<button id="nextTurnBtn" onclick="initiativeHost.post('/api/mirror/command','type=nextTurn')">Next Turn</button>"#);
    html.push_str(&render_mute_button(false, true));
    html.push_str("</div>");

    if !synced {
        html.push_str(r#"<p class="remote-waiting">Waiting for the main window&#x2026;</p>"#);
        return html;
    }

    html.push_str(r#"<div id="characterRow" class="remote-row">"#);
    for (i, character) in roster.characters.iter().enumerate() {
        let active = if i == roster.current_turn { " active" } else { "" };
        html.push_str(&format!(
            r#"<div class="character{active}" draggable="true" data-index="{i}" ondragstart="initiativeHost.post('/api/mirror/drop','action=start&amp;index={i}')" ondragover="event.preventDefault()" ondrop="initiativeHost.post('/api/mirror/drop','action=drop&amp;index={i}')">"#,
            active = active,
            i = i,
        ));
        html.push_str(&format!(
            r#"<div style="width:{px}px; height:{px}px; overflow:hidden;"><img src="{src}" style="width:100%; height:100%; object-fit:cover;"></div>"#,
            px = REMOTE_THUMB_PX,
            src = escape_html(&character.image)
        ));
        html.push_str(&format!(
            r#"<p style="font-size:{}px; margin:2px 0 0;"><strong>{}</strong></p>"#,
            REMOTE_NAME_FONT_PX,
            escape_html(&character.name)
        ));
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

/// The main window shows the speaker state; the remote always says
/// "Toggle Sound" since it does not track the flag itself.
pub fn render_mute_button(muted: bool, remote: bool) -> String {
    let (label, path, body) = if remote {
        ("Toggle Sound", "/api/mirror/command", "type=toggleMute")
    } else if muted {
        ("&#x1F507;", "/api/sound/mute", "")
    } else {
        ("&#x1F50A;", "/api/sound/mute", "")
    };
    format!(
        r#"<button id="muteBtn" onclick="initiativeHost.post('{}','{}')">{}</button>"#,
        path, body, label
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::character::Character;

    fn roster(names: &[&str], turn: usize) -> Roster {
        Roster::new(
            names
                .iter()
                .map(|n| Character {
                    name: n.to_string(),
                    image: "data:image/png;base64,AAAA".to_string(),
                })
                .collect(),
            turn,
        )
    }

    #[test]
    fn empty_roster_prompt() {
        assert!(render_roster(&Roster::default(), 800.0, false).contains("empty-roster"));
    }

    #[test]
    fn single_card_uses_layout() {
        let html = render_roster(&roster(&["Grog"], 0), 1000.0, false);
        assert!(html.contains("width:250px"));
        assert!(html.contains("height:375px"));
        assert!(html.contains("font-size:28px"));
        assert!(html.contains(r#"class="character active""#));
    }

    #[test]
    fn only_current_turn_is_active() {
        let html = render_roster(&roster(&["a", "b", "c"], 1), 1000.0, false);
        assert_eq!(html.matches("character active").count(), 1);
        let active_at = html.find("character active").unwrap();
        let second = html.find(r#"data-index="1""#).unwrap();
        assert!(active_at < second);
    }

    #[test]
    fn names_are_escaped() {
        let html = render_roster(&roster(&["<script>x</script>"], 0), 800.0, false);
        assert!(!html.contains("<script>x"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn mirror_uses_thumbnails_and_commands() {
        let html = render_mirror(&roster(&["a", "b"], 0), true);
        assert!(html.contains("width:35px; height:35px"));
        assert!(html.contains("font-size:7px"));
        assert!(html.contains("/api/mirror/drop"));
        assert!(!html.contains("/api/roster/delete"));
        assert!(html.contains("Toggle Sound"));
    }

    #[test]
    fn mirror_waits_for_first_snapshot() {
        let html = render_mirror(&Roster::default(), false);
        assert!(html.contains("Waiting for the main window"));
    }

    #[test]
    fn mute_button_reflects_state() {
        assert!(render_mute_button(true, false).contains("&#x1F507;"));
        assert!(render_mute_button(false, false).contains("&#x1F50A;"));
    }
}
