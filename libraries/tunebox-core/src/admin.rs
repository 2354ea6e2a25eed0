//! Admin content management
//!
//! [`ContentDesk`] is only handed out to admins. It validates form drafts, forwards
//! them to a [`ContentManager`] and reports every outcome as a [`Notice`]. A failed
//! submission leaves the draft untouched so the user can retry; a successful one
//! clears it.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ContentAction, Result, TuneboxError};
use crate::traits::{ContentManager, Identity};
use crate::types::{
    Collection, CollectionId, FileUpload, NewCollection, NewTrack, Track, TrackId, User,
};

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Underlying cause, for logs and verbose output
    pub detail: Option<String>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            detail: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.detail {
            Some(ref detail) => write!(f, "{} ({})", self.message, detail),
            None => f.write_str(&self.message),
        }
    }
}

/// Result of a desk operation: always a notice, plus the item on success
#[derive(Debug, Clone)]
pub struct Submission<T> {
    pub notice: Notice,
    pub item: Option<T>,
}

impl<T> Submission<T> {
    fn done(action: ContentAction, item: T) -> Self {
        Self {
            notice: Notice::success(action.success_message()),
            item: Some(item),
        }
    }

    fn rejected(notice: Notice) -> Self {
        Self { notice, item: None }
    }

    pub fn is_success(&self) -> bool {
        self.notice.is_success()
    }
}

/// Draft of the "Add Album" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionForm {
    pub title: String,
    pub description: String,
    pub thumbnail: Option<FileUpload>,
}

impl CollectionForm {
    /// Check required fields and build the payload
    pub fn validate(&self) -> Result<NewCollection> {
        let title = required("Title", &self.title)?;
        let description = required("Description", &self.description)?;
        let thumbnail = self
            .thumbnail
            .clone()
            .ok_or_else(|| TuneboxError::invalid_input("Thumbnail is required"))?;

        Ok(NewCollection {
            title,
            description,
            thumbnail,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Draft of the "Add Songs" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackForm {
    pub title: String,
    pub description: String,
    pub artist_name: String,
    /// "Choose Album" leaves this empty
    pub collection_id: Option<CollectionId>,
    pub media: Option<FileUpload>,
}

impl TrackForm {
    /// Check required fields and build the payload
    pub fn validate(&self) -> Result<NewTrack> {
        let title = required("Title", &self.title)?;
        let description = required("Description", &self.description)?;
        let artist_name = required("Singer", &self.artist_name)?;
        let media = self
            .media
            .clone()
            .ok_or_else(|| TuneboxError::invalid_input("Audio is required"))?;

        Ok(NewTrack {
            title,
            description,
            artist_name,
            collection_id: self.collection_id.clone(),
            media,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TuneboxError::invalid_input(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Content management view, gated on the admin role
pub struct ContentDesk {
    manager: Arc<dyn ContentManager>,
    admin: User,
}

impl std::fmt::Debug for ContentDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentDesk")
            .field("admin", &self.admin.id)
            .finish_non_exhaustive()
    }
}

impl ContentDesk {
    /// Open the desk for the current user
    ///
    /// # Errors
    /// `PermissionDenied` for anonymous users and non-admins
    pub async fn open(identity: &dyn Identity, manager: Arc<dyn ContentManager>) -> Result<Self> {
        let user = identity
            .current_user()
            .await?
            .ok_or_else(|| TuneboxError::permission_denied("sign in required"))?;

        if !user.is_admin() {
            warn!(user_id = %user.id, "Content desk refused: not an admin");
            return Err(TuneboxError::permission_denied("admin role required"));
        }

        Ok(Self {
            manager,
            admin: user,
        })
    }

    /// The admin this desk was opened for
    pub fn admin(&self) -> &User {
        &self.admin
    }

    /// Submit the album form; cleared on success, kept on failure
    pub async fn submit_collection(&self, form: &mut CollectionForm) -> Submission<Collection> {
        let new = match form.validate() {
            Ok(new) => new,
            Err(e) => return Submission::rejected(Notice::error(e.to_string())),
        };

        let action = ContentAction::CreateCollection;
        match self.manager.create_collection(new).await {
            Ok(collection) => {
                info!(collection_id = %collection.id, admin = %self.admin.id, "Album added");
                form.clear();
                Submission::done(action, collection)
            }
            Err(e) => Submission::rejected(failure(action, &e)),
        }
    }

    /// Submit the song form; cleared on success, kept on failure
    pub async fn submit_track(&self, form: &mut TrackForm) -> Submission<Track> {
        let new = match form.validate() {
            Ok(new) => new,
            Err(e) => return Submission::rejected(Notice::error(e.to_string())),
        };

        let action = ContentAction::CreateTrack;
        match self.manager.create_track(new).await {
            Ok(track) => {
                info!(track_id = %track.id, admin = %self.admin.id, "Song added");
                form.clear();
                Submission::done(action, track)
            }
            Err(e) => Submission::rejected(failure(action, &e)),
        }
    }

    pub async fn attach_thumbnail(&self, id: &TrackId, thumbnail: FileUpload) -> Submission<Track> {
        let action = ContentAction::AttachThumbnail;
        match self.manager.attach_thumbnail(id, thumbnail).await {
            Ok(track) => {
                info!(track_id = %track.id, "Thumbnail attached");
                Submission::done(action, track)
            }
            Err(e) => Submission::rejected(failure(action, &e)),
        }
    }

    pub async fn delete_track(&self, id: &TrackId) -> Submission<()> {
        let action = ContentAction::DeleteTrack;
        match self.manager.delete_track(id).await {
            Ok(()) => {
                info!(track_id = %id, "Song deleted");
                Submission::done(action, ())
            }
            Err(e) => Submission::rejected(failure(action, &e)),
        }
    }

    pub async fn delete_collection(&self, id: &CollectionId) -> Submission<()> {
        let action = ContentAction::DeleteCollection;
        match self.manager.delete_collection(id).await {
            Ok(()) => {
                info!(collection_id = %id, "Album deleted");
                Submission::done(action, ())
            }
            Err(e) => Submission::rejected(failure(action, &e)),
        }
    }
}

fn failure(action: ContentAction, cause: &TuneboxError) -> Notice {
    let err = TuneboxError::content_mutation(action, cause.to_string());
    warn!(error = %err, "Content mutation failed");
    Notice::error(action.failure_message()).with_detail(cause.to_string())
}
