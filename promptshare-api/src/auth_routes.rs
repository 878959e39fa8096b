use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use promptshare_app::application::AuthCallbacks;
use promptshare_app::domain::{Session, SessionUser};
use promptshare_app::infrastructure::session;
use promptshare_app::AppContext;
use promptshare_errors::AppError;
use serde::Deserialize;
use tower_sessions::Session as CookieSession;

const DENIED_REDIRECT: &str = "/?error=AccessDenied";

pub fn router() -> Router<AppContext> {
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/callback", get(callback))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(current_session))
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallbackRejection {
    ProviderError,
    NoPendingLogin,
    MissingCode,
    StateMismatch,
}

/// Checks the callback against the state stored at login and yields the code to exchange.
fn authorized_code<V>(
    query: CallbackQuery,
    pending: Option<(String, V)>,
) -> Result<(String, V), CallbackRejection> {
    if query.error.is_some() {
        return Err(CallbackRejection::ProviderError);
    }
    let (expected_state, verifier) = pending.ok_or(CallbackRejection::NoPendingLogin)?;
    let (Some(code), Some(state)) = (query.code, query.state) else {
        return Err(CallbackRejection::MissingCode);
    };
    if state != expected_state {
        return Err(CallbackRejection::StateMismatch);
    }
    Ok((code, verifier))
}

async fn login(
    State(ctx): State<AppContext>,
    cookie: CookieSession,
) -> Result<Redirect, AppError> {
    let (auth_url, csrf_token, pkce_verifier) = ctx.oauth.get_auth_url();
    session::store_oauth_state(&cookie, &csrf_token, &pkce_verifier).await?;

    Ok(Redirect::to(&auth_url))
}

async fn callback(
    State(ctx): State<AppContext>,
    cookie: CookieSession,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect, AppError> {
    if let Some(error) = &query.error {
        tracing::warn!("OAuth provider returned error: {}", error);
    }

    let pending = session::take_oauth_state(&cookie).await?;
    let (code, pkce_verifier) = match authorized_code(query, pending) {
        Ok(authorized) => authorized,
        Err(rejection) => {
            tracing::warn!("Rejected OAuth callback: {:?}", rejection);
            return Ok(Redirect::to(DENIED_REDIRECT));
        }
    };

    let profile = match ctx.oauth.exchange_code(&code, pkce_verifier).await {
        Ok(profile) => Some(profile),
        Err(e) => {
            tracing::error!("OAuth code exchange failed: {}", e);
            None
        }
    };

    if !ctx.auth.on_sign_in(profile.as_ref()).await {
        return Ok(Redirect::to(DENIED_REDIRECT));
    }

    let Some(profile) = profile else {
        return Ok(Redirect::to(DENIED_REDIRECT));
    };

    session::sign_in(&cookie, SessionUser::from(&profile)).await?;
    tracing::info!("Signed in {}", profile.email);

    Ok(Redirect::to("/"))
}

async fn logout(cookie: CookieSession) -> Result<Redirect, AppError> {
    session::sign_out(&cookie).await?;
    Ok(Redirect::to("/"))
}

async fn current_session(
    State(ctx): State<AppContext>,
    cookie: CookieSession,
) -> Result<Json<Option<Session>>, AppError> {
    let session = session::load_session(&cookie, ctx.auth.as_ref()).await?;
    Ok(Json(session))
}
