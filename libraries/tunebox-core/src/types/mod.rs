mod collection;
mod ids;
mod track;
mod upload;
mod user;

pub use collection::Collection;
pub use ids::{CollectionId, TrackId, UserId};
pub use track::{Track, PLACEHOLDER_THUMBNAIL};
pub use upload::{FileUpload, NewCollection, NewTrack};
pub use user::{Role, User};
