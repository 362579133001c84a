//! A roster entry: display name plus portrait data URI.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    /// Downscaled portrait, e.g. `data:image/png;base64,...`.
    pub image: String,
}

impl Character {
    /// Validate user input and build a character.
    ///
    /// The name is trimmed and must be non-empty; the image must be a base64
    /// image data URI with a decodable payload.
    pub fn new(name: &str, image: &str) -> Result<Self, TrackerError> {
        let name = name.trim();
        if name.is_empty() || image.is_empty() {
            return Err(TrackerError::MissingInput);
        }
        if !is_image_data_uri(image) {
            return Err(TrackerError::InvalidImage);
        }
        Ok(Self {
            name: name.to_string(),
            image: image.to_string(),
        })
    }

    /// Identity used to follow the active character across a reorder.
    /// Duplicates are allowed, so the first match wins.
    pub fn same_as(&self, other: &Character) -> bool {
        self.name == other.name && self.image == other.image
    }
}

/// `data:image/<subtype>;base64,<payload>` with a payload that decodes.
pub fn is_image_data_uri(uri: &str) -> bool {
    let Some(rest) = uri.strip_prefix("data:image/") else {
        return false;
    };
    let Some((header, payload)) = rest.split_once(',') else {
        return false;
    };
    if !header.ends_with(";base64") || payload.is_empty() {
        return false;
    }
    STANDARD.decode(payload.trim()).is_ok()
}

/// Scale `(width, height)` so the long edge is at most `max_edge`, keeping
/// proportions. Images already within bounds are returned unchanged.
pub fn downscaled_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }
    let (w, h) = (width as f64, height as f64);
    let max = max_edge as f64;
    if width > height {
        if w > max {
            return (max_edge, (h * max / w).round().max(1.0) as u32);
        }
    } else if h > max {
        return ((w * max / h).round().max(1.0) as u32, max_edge);
    }
    (width, height)
}
