//! Tracker error taxonomy.
//!
//! Input validation failures and rejected imports carry the exact message the
//! host shows in its blocking alert. Nothing here is fatal; after any error the
//! tracker state is exactly what it was before the call.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Please enter a name and select an image.")]
    MissingInput,

    #[error("Character image must be a base64 image data URI.")]
    InvalidImage,

    #[error("No characters to save.")]
    NothingToSave,

    #[error("Failed to load save file.")]
    UnreadableSave(#[source] serde_json::Error),

    #[error("Invalid save file.")]
    InvalidSave,

    #[error("index {index} out of bounds for roster of {len}")]
    OutOfBounds { index: usize, len: usize },

    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    #[error("malformed sync message: {0}")]
    InvalidMessage(#[source] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(#[source] serde_json::Error),
}

impl TrackerError {
    /// Whether the host should surface this error as a blocking alert.
    /// Everything else is logged and degrades silently.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            TrackerError::MissingInput
                | TrackerError::InvalidImage
                | TrackerError::NothingToSave
                | TrackerError::UnreadableSave(_)
                | TrackerError::InvalidSave
        )
    }
}
