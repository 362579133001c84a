//! Shared URL/form parsing and HTML helpers for route handlers.

use crate::effects::{self, Effect};
use crate::error::TrackerError;

/// Parse URL-encoded form body into key-value pairs.
/// Handles `key=value&key2=value2` format.
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    if body.is_empty() {
        return Vec::new();
    }
    body.split('&')
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let val = parts.next().unwrap_or("");
            Some((percent_decode(key), percent_decode(val)))
        })
        .collect()
}

/// Percent-decode a URL-encoded value. Decoded bytes are reassembled as
/// UTF-8 so names like "Zoë" survive the round trip.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => match bytes.get(i + 1..i + 3).and_then(hex_pair) {
                Some(val) => {
                    out.push(val);
                    i += 3;
                    continue;
                }
                // Truncated or non-hex escape: keep the '%' literally.
                None => out.push(b'%'),
            },
            b'+' => out.push(b' '),
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(pair: &[u8]) -> Option<u8> {
    if !pair.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let s = core::str::from_utf8(pair).ok()?;
    u8::from_str_radix(s, 16).ok()
}

/// Parse a query string into key-value pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let q = query.strip_prefix('?').unwrap_or(query);
    parse_form_body(q)
}

/// Helper to get a value by key from a list of key-value pairs.
pub fn get_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn get_index(params: &[(String, String)], key: &str) -> Option<usize> {
    get_param(params, key).and_then(|s| s.trim().parse().ok())
}

pub fn get_flag(params: &[(String, String)], key: &str) -> bool {
    matches!(get_param(params, key), Some("true" | "1" | "on"))
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Turn the outcome of a tracker operation into the response body.
///
/// User-facing errors become an alert; anything else is logged and the
/// request answers with nothing, leaving the page as it was.
pub fn respond(result: Result<Vec<Effect>, TrackerError>) -> String {
    match result {
        Ok(fx) => effects::to_script(&fx),
        Err(e) if e.is_user_facing() => effects::to_script(&[Effect::Alert(e.to_string())]),
        Err(e) => {
            log::warn!("rejected: {}", e);
            String::new()
        }
    }
}

pub fn missing_param(name: &str) -> String {
    format!(r#"<span class="text-red-600">Missing {} parameter</span>"#, name)
}
