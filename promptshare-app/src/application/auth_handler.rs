use crate::domain::{NewUser, OAuthProfile, Session, User};
use async_trait::async_trait;
use promptshare_errors::AppError;

/// Persistence seam for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Fails with [`AppError::Conflict`] when the email is already taken.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
}

/// Hooks the OAuth flow calls into.
///
/// `on_sign_in` decides whether a provider profile may sign in; `on_session_build`
/// runs every time a session is handed out and may enrich it.
#[async_trait]
pub trait AuthCallbacks: Send + Sync {
    async fn on_sign_in(&self, profile: Option<&OAuthProfile>) -> bool;

    async fn on_session_build(&self, session: Session) -> Session;
}

pub struct AuthHandler<S> {
    users: S,
}

impl<S: UserStore> AuthHandler<S> {
    pub fn new(users: S) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &S {
        &self.users
    }

    async fn ensure_user(&self, profile: &OAuthProfile) -> Result<(), AppError> {
        if self.users.find_by_email(&profile.email).await?.is_some() {
            return Ok(());
        }

        match self.users.create(NewUser::from_profile(profile)).await {
            Ok(user) => {
                tracing::info!("Created user {} for {}", user.id, user.email);
                Ok(())
            }
            // Lost a race against a concurrent first sign-in for the same email.
            Err(AppError::Conflict(_)) => {
                tracing::info!("User for {} was created concurrently", profile.email);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn attach_user_id(&self, mut session: Session) -> Result<Session, AppError> {
        let Some(email) = session.user_email().map(str::to_string) else {
            return Ok(session);
        };

        if let Some(record) = self.users.find_by_email(&email).await? {
            if let Some(user) = session.user.as_mut() {
                user.id = Some(record.id.to_string());
            }
        }

        Ok(session)
    }
}

#[async_trait]
impl<S: UserStore> AuthCallbacks for AuthHandler<S> {
    async fn on_sign_in(&self, profile: Option<&OAuthProfile>) -> bool {
        let Some(profile) = profile else {
            tracing::warn!("Sign in denied: provider returned no profile");
            return false;
        };

        if profile.email.is_empty() {
            tracing::warn!("Sign in denied: provider profile has no email");
            return false;
        }

        match self.ensure_user(profile).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Sign in error: {}", e);
                false
            }
        }
    }

    async fn on_session_build(&self, session: Session) -> Session {
        match self.attach_user_id(session.clone()).await {
            Ok(enriched) => enriched,
            Err(e) => {
                tracing::error!("Session callback error: {}", e);
                session
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SessionUser, DEFAULT_USER_IMAGE};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryUsers {
        users: Mutex<Vec<User>>,
        creates: AtomicUsize,
        fail_lookups: bool,
        conflict_on_create: bool,
    }

    impl MemoryUsers {
        fn with_user(email: &str) -> Self {
            let store = Self::default();
            store.users.lock().unwrap().push(User {
                id: uuid::Uuid::new_v4(),
                email: email.to_string(),
                username: Some("existing".to_string()),
                image: "http://img/old.png".to_string(),
                created_at: None,
            });
            store
        }

        fn all(&self) -> Vec<User> {
            self.users.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UserStore for MemoryUsers {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
            if self.fail_lookups {
                return Err(AppError::Database("connection refused".to_string()));
            }
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn create(&self, user: NewUser) -> Result<User, AppError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            if self.conflict_on_create {
                return Err(AppError::Conflict(user.email));
            }
            let record = User {
                id: uuid::Uuid::new_v4(),
                email: user.email,
                username: user.username,
                image: user.image,
                created_at: Some(chrono::Utc::now()),
            };
            self.users.lock().unwrap().push(record.clone());
            Ok(record)
        }
    }

    fn profile(email: &str, name: Option<&str>, picture: Option<&str>) -> OAuthProfile {
        OAuthProfile {
            email: email.to_string(),
            name: name.map(str::to_string),
            picture: picture.map(str::to_string),
        }
    }

    fn session_for(email: Option<&str>) -> Session {
        Session {
            user: Some(SessionUser {
                name: Some("Jane Doe".to_string()),
                email: email.map(str::to_string),
                image: None,
                id: None,
            }),
            expires: None,
        }
    }

    #[tokio::test]
    async fn test_first_sign_in_creates_user() {
        let handler = AuthHandler::new(MemoryUsers::default());

        let allowed = handler
            .on_sign_in(Some(&profile("a@x.com", Some("Jane Doe"), Some("http://img/1.png"))))
            .await;

        assert!(allowed);
        let users = handler.users().all();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "a@x.com");
        assert_eq!(users[0].username.as_deref(), Some("janedoe"));
        assert_eq!(users[0].image, "http://img/1.png");
    }

    #[tokio::test]
    async fn test_missing_picture_uses_default_image() {
        let handler = AuthHandler::new(MemoryUsers::default());

        assert!(handler.on_sign_in(Some(&profile("b@x.com", None, None))).await);

        let users = handler.users().all();
        assert_eq!(users[0].username, None);
        assert_eq!(users[0].image, DEFAULT_USER_IMAGE);
    }

    #[tokio::test]
    async fn test_existing_email_signs_in_without_creating() {
        let handler = AuthHandler::new(MemoryUsers::with_user("a@x.com"));

        let allowed = handler
            .on_sign_in(Some(&profile("a@x.com", Some("Someone Else"), None)))
            .await;

        assert!(allowed);
        assert_eq!(handler.users().creates.load(Ordering::SeqCst), 0);
        let users = handler.users().all();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username.as_deref(), Some("existing"));
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let handler = AuthHandler::new(MemoryUsers::with_user("a@x.com"));

        assert!(handler.on_sign_in(Some(&profile("A@x.com", None, None))).await);
        assert_eq!(handler.users().all().len(), 2);
    }

    #[tokio::test]
    async fn test_absent_profile_is_denied() {
        let handler = AuthHandler::new(MemoryUsers::default());

        assert!(!handler.on_sign_in(None).await);
        assert_eq!(handler.users().creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_profile_without_email_is_denied() {
        let handler = AuthHandler::new(MemoryUsers::default());

        assert!(!handler.on_sign_in(Some(&profile("", Some("Jane"), None))).await);
        assert!(handler.users().all().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_denies_sign_in() {
        let handler = AuthHandler::new(MemoryUsers {
            fail_lookups: true,
            ..MemoryUsers::default()
        });

        assert!(!handler.on_sign_in(Some(&profile("a@x.com", None, None))).await);
        assert_eq!(handler.users().creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unique_violation_on_create_still_signs_in() {
        let handler = AuthHandler::new(MemoryUsers {
            conflict_on_create: true,
            ..MemoryUsers::default()
        });

        assert!(handler.on_sign_in(Some(&profile("a@x.com", None, None))).await);
        assert_eq!(handler.users().creates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_session_gets_id_of_matching_user() {
        let store = MemoryUsers::with_user("a@x.com");
        let expected = store.all()[0].id.to_string();
        let handler = AuthHandler::new(store);

        let session = handler.on_session_build(session_for(Some("a@x.com"))).await;

        assert_eq!(session.user_id(), Some(expected.as_str()));
        assert_eq!(session.user.unwrap().name.as_deref(), Some("Jane Doe"));
    }

    #[tokio::test]
    async fn test_session_without_match_keeps_id_unset() {
        let handler = AuthHandler::new(MemoryUsers::with_user("a@x.com"));

        let session = handler.on_session_build(session_for(Some("nobody@x.com"))).await;
        assert_eq!(session.user_id(), None);

        let session = handler.on_session_build(session_for(None)).await;
        assert_eq!(session.user_id(), None);

        let session = handler.on_session_build(Session::default()).await;
        assert_eq!(session, Session::default());
    }

    #[tokio::test]
    async fn test_session_lookup_failure_returns_session_unchanged() {
        let handler = AuthHandler::new(MemoryUsers {
            fail_lookups: true,
            ..MemoryUsers::default()
        });

        let original = session_for(Some("a@x.com"));
        let session = handler.on_session_build(original.clone()).await;

        assert_eq!(session, original);
    }
}
