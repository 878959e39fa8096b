use serde::{Deserialize, Serialize};

use super::OAuthProfile;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    /// Identifier of the matching user record; only set during session build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl From<&OAuthProfile> for SessionUser {
    fn from(profile: &OAuthProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: Some(profile.email.clone()),
            image: profile.picture.clone(),
            id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<SessionUser>,
    pub expires: Option<chrono::DateTime<chrono::Utc>>,
}

impl Session {
    pub fn for_user(user: SessionUser, expires: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            user: Some(user),
            expires: Some(expires),
        }
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .filter(|email| !email.is_empty())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_id_is_omitted_from_json() {
        let session = Session {
            user: Some(SessionUser {
                name: Some("Jane".to_string()),
                email: Some("a@x.com".to_string()),
                image: None,
                id: None,
            }),
            expires: None,
        };

        let json = serde_json::to_value(&session).unwrap();
        assert!(json["user"].get("id").is_none());
        assert_eq!(session.user_email(), Some("a@x.com"));
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn test_empty_email_counts_as_missing() {
        let session = Session {
            user: Some(SessionUser {
                email: Some(String::new()),
                ..SessionUser::default()
            }),
            expires: None,
        };
        assert_eq!(session.user_email(), None);
    }
}
