use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Record already exists: {0}")]
    Conflict(String),

    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::Config(_) => "The server is misconfigured. Please try again later.",
            Self::Database(_) => "Something went wrong while reading your data.",
            Self::Conflict(_) => "That record already exists.",
            Self::OAuth(_) => "Sign-in with the provider failed. Please try again.",
            Self::Session(_) => "Your session could not be loaded. Please sign in again.",
            Self::Upstream(_) => "The request could not be completed. Please try again.",
            Self::InvalidInput(_) => "The request was not valid.",
            Self::NotFound => "Not found.",
            Self::Internal(_) => "Something went wrong on our side. Please try again later.",
        }
    }
}

#[cfg(feature = "ssr")]
mod ssr_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: String,
    }

    impl AppError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                AppError::Config(_) | AppError::Database(_) | AppError::Session(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                AppError::Conflict(_) => StatusCode::CONFLICT,
                AppError::OAuth(_) | AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
                AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                AppError::NotFound => StatusCode::NOT_FOUND,
                AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            let message = match &self {
                AppError::InvalidInput(msg) | AppError::Conflict(msg) => msg.clone(),
                AppError::NotFound => "Not found".to_string(),
                // Infra details stay in the logs.
                other => other.user_message().to_string(),
            };
            (status, Json(ErrorResponse { message })).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_infra_detail() {
        let err = AppError::Database("password authentication failed for user app".to_string());
        assert!(err.to_string().contains("password authentication failed"));
        assert!(!err.user_message().contains("password"));
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn test_status_codes() {
        use axum::http::StatusCode;

        assert_eq!(AppError::Conflict("users_email_key".to_string()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::InvalidInput("bad id".to_string()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Upstream("timeout".to_string()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::Session("store".to_string()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
