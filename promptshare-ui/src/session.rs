use leptos::prelude::*;
use promptshare_app::domain::Session;
use server_fn::ServerFnError;

/// The signed-in user's session, enriched by the session hook. `None` when signed out.
#[server(GetSessionFn, "/api", endpoint = "session")]
pub async fn get_session() -> Result<Option<Session>, ServerFnError> {
    use promptshare_app::infrastructure::session::load_session;
    use promptshare_app::AppContext;
    use tower_sessions::Session as CookieSession;

    // Only present when called over HTTP; SSR renders the signed-out state.
    let Some(cookie) = use_context::<CookieSession>() else {
        tracing::debug!("get_session: no cookie session in context");
        return Ok(None);
    };

    let Some(ctx) = use_context::<AppContext>() else {
        tracing::warn!("get_session: no AppContext");
        return Ok(None);
    };

    load_session(&cookie, ctx.auth.as_ref())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}
