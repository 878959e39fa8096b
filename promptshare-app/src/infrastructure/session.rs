//! Cookie session persistence.
//!
//! Only the provider-supplied part of the session user is stored. The database
//! id is attached by [`AuthCallbacks::on_session_build`] every time the session
//! is read, so it always reflects the current user table.

use crate::application::AuthCallbacks;
use crate::domain::{Session, SessionUser};
use oauth2::{CsrfToken, PkceCodeVerifier};
use promptshare_errors::AppError;
use tower_sessions::Session as CookieSession;

pub const SESSION_MAX_AGE_DAYS: i64 = 30;

const SESSION_USER_KEY: &str = "user";
const OAUTH_CSRF_KEY: &str = "oauth_csrf";
const OAUTH_PKCE_KEY: &str = "oauth_pkce";

fn session_error(e: tower_sessions::session::Error) -> AppError {
    AppError::Session(e.to_string())
}

pub async fn store_oauth_state(
    cookie: &CookieSession,
    csrf_token: &CsrfToken,
    pkce_verifier: &PkceCodeVerifier,
) -> Result<(), AppError> {
    cookie
        .insert(OAUTH_CSRF_KEY, csrf_token.secret())
        .await
        .map_err(session_error)?;
    cookie
        .insert(OAUTH_PKCE_KEY, pkce_verifier.secret())
        .await
        .map_err(session_error)
}

/// Removes the pending OAuth state. `None` when no login was started.
pub async fn take_oauth_state(
    cookie: &CookieSession,
) -> Result<Option<(String, PkceCodeVerifier)>, AppError> {
    let csrf: Option<String> = cookie.remove(OAUTH_CSRF_KEY).await.map_err(session_error)?;
    let verifier: Option<String> = cookie.remove(OAUTH_PKCE_KEY).await.map_err(session_error)?;

    Ok(csrf.zip(verifier).map(|(csrf, verifier)| (csrf, PkceCodeVerifier::new(verifier))))
}

/// Rotates the session id and stores the signed-in user.
pub async fn sign_in(cookie: &CookieSession, user: SessionUser) -> Result<(), AppError> {
    cookie.cycle_id().await.map_err(session_error)?;

    let user = SessionUser { id: None, ..user };
    cookie
        .insert(SESSION_USER_KEY, user)
        .await
        .map_err(session_error)
}

pub async fn sign_out(cookie: &CookieSession) -> Result<(), AppError> {
    cookie.flush().await.map_err(session_error)
}

/// The user stored at sign-in, without the database id.
pub async fn signed_in_user(cookie: &CookieSession) -> Result<Option<SessionUser>, AppError> {
    cookie
        .get::<SessionUser>(SESSION_USER_KEY)
        .await
        .map_err(session_error)
}

/// Builds the session handed to clients, running the session hook on it.
pub async fn load_session<C>(cookie: &CookieSession, callbacks: &C) -> Result<Option<Session>, AppError>
where
    C: AuthCallbacks + ?Sized,
{
    let Some(user) = signed_in_user(cookie).await? else {
        return Ok(None);
    };

    let expires = chrono::DateTime::from_timestamp(cookie.expiry_date().unix_timestamp(), 0)
        .unwrap_or_else(|| chrono::Utc::now() + chrono::Duration::days(SESSION_MAX_AGE_DAYS));

    let session = callbacks
        .on_session_build(Session::for_user(user, expires))
        .await;

    Ok(Some(session))
}
