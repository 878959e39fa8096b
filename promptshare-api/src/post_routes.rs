use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use promptshare_app::domain::{Post, SessionUser};
use promptshare_app::infrastructure::session;
use promptshare_app::AppContext;
use promptshare_errors::AppError;
use serde::Serialize;
use tower_sessions::Session as CookieSession;
use uuid::Uuid;

pub fn router() -> Router<AppContext> {
    Router::new()
        .route("/api/users/{id}/posts", get(list_user_posts))
        .route("/api/prompt/{id}", delete(delete_prompt))
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidInput(format!("Invalid id: {}", raw)))
}

async fn list_user_posts(
    State(ctx): State<AppContext>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Post>>, AppError> {
    let user_id = parse_id(&user_id)?;
    let posts = ctx.prompt_repo.find_by_creator(user_id).await?;
    Ok(Json(posts))
}

/// Email of the signed-in requester, if any.
fn requester(user: Option<&SessionUser>) -> Option<&str> {
    user.and_then(|u| u.email.as_deref()).filter(|email| !email.is_empty())
}

// TODO: reject deletes whose session user id differs from the prompt's creator_id.
async fn delete_prompt(
    State(ctx): State<AppContext>,
    cookie: CookieSession,
    Path(prompt_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let prompt_id = parse_id(&prompt_id)?;
    let user = session::signed_in_user(&cookie).await?;
    let requested_by = requester(user.as_ref());

    if requested_by.is_none() {
        tracing::warn!("Anonymous delete request for prompt {}", prompt_id);
    }

    if !ctx.prompt_repo.delete(prompt_id).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!(
        "Deleted prompt {} (requested by {})",
        prompt_id,
        requested_by.unwrap_or("anonymous")
    );
    Ok(Json(MessageResponse {
        message: "Prompt deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_placeholder_user_id_is_a_bad_request() {
        let err = parse_id("defaultUserId").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_requester_needs_a_signed_in_email() {
        let jane = SessionUser {
            email: Some("a@x.com".to_string()),
            ..SessionUser::default()
        };
        let blank = SessionUser {
            email: Some(String::new()),
            ..SessionUser::default()
        };

        assert_eq!(requester(Some(&jane)), Some("a@x.com"));
        assert_eq!(requester(Some(&blank)), None);
        assert_eq!(requester(Some(&SessionUser::default())), None);
        assert_eq!(requester(None), None);
    }

    #[test]
    fn test_uuid_ids_parse() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}
