use serde::{Deserialize, Serialize};

use super::OAuthProfile;

/// Stored as the user's image when the provider sends no picture.
pub const DEFAULT_USER_IMAGE: &str = "/assets/images/default-avatar.svg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: uuid::Uuid,
    pub email: String,
    pub username: Option<String>,
    pub image: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// User record about to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: Option<String>,
    pub image: String,
}

impl NewUser {
    pub fn from_profile(profile: &OAuthProfile) -> Self {
        Self {
            email: profile.email.clone(),
            username: profile.name.as_deref().map(username_from_display_name),
            image: profile
                .picture
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_IMAGE.to_string()),
        }
    }
}

/// "Jane Doe" -> "janedoe". A blank name gives an empty username.
pub fn username_from_display_name(name: &str) -> String {
    name.split_whitespace().collect::<String>().to_lowercase()
}
