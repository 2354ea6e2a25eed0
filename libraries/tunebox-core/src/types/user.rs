/// User domain type
use serde::{Deserialize, Serialize};

use super::UserId;

/// Account role
///
/// Only `Admin` unlocks content management. Role strings this client does not
/// know (moderator, artist, ...) parse as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
    #[serde(other)]
    Other,
}

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Contact address
    pub email: Option<String>,

    /// Role used for the content-management gate
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            role,
        }
    }

    /// Whether this user may manage catalog content
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
