/// Core error types for Tunebox
use thiserror::Error;

use crate::types::{CollectionId, TrackId};

/// Result type alias using `TuneboxError`
pub type Result<T> = std::result::Result<T, TuneboxError>;

/// Content-management action that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentAction {
    CreateCollection,
    CreateTrack,
    AttachThumbnail,
    DeleteTrack,
    DeleteCollection,
}

impl ContentAction {
    /// Short description used in log lines and messages
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateCollection => "create album",
            Self::CreateTrack => "create song",
            Self::AttachThumbnail => "attach thumbnail",
            Self::DeleteTrack => "delete song",
            Self::DeleteCollection => "delete album",
        }
    }

    /// User-facing message after the action went through
    pub fn success_message(self) -> &'static str {
        match self {
            Self::CreateCollection => "Album added successfully!",
            Self::CreateTrack => "Song added successfully!",
            Self::AttachThumbnail => "Thumbnail added successfully!",
            Self::DeleteTrack => "Song deleted successfully!",
            Self::DeleteCollection => "Album deleted successfully!",
        }
    }

    /// User-facing message after the action failed
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::CreateCollection => "Failed to add album.",
            Self::CreateTrack => "Failed to add song.",
            Self::AttachThumbnail => "Failed to add thumbnail.",
            Self::DeleteTrack => "Failed to delete song.",
            Self::DeleteCollection => "Failed to delete album.",
        }
    }
}

impl std::fmt::Display for ContentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core error type for Tunebox
#[derive(Error, Debug)]
pub enum TuneboxError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Collection not found
    #[error("Album not found: {0}")]
    CollectionNotFound(CollectionId),

    /// Permission denied with context
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// A create/delete call against the content API failed
    #[error("Failed to {action}: {reason}")]
    ContentMutation {
        action: ContentAction,
        reason: String,
    },

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl TuneboxError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a content mutation error
    pub fn content_mutation(action: ContentAction, reason: impl Into<String>) -> Self {
        Self::ContentMutation {
            action,
            reason: reason.into(),
        }
    }

    /// Whether the error means the entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::TrackNotFound(_) | Self::CollectionNotFound(_)
        )
    }
}
