use crate::application::AuthHandler;
use crate::config::AppConfig;
use crate::infrastructure::auth::GoogleOAuth;
use crate::infrastructure::db::{self, PromptRepository, UserRepository};
use promptshare_errors::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<AuthHandler<UserRepository>>,
    pub oauth: GoogleOAuth,
    pub prompt_repo: PromptRepository,
}

impl AppContext {
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let db = db::create_connection(&config.database_url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect: {}", e)))?;

        db::run_migrations(&db)
            .await
            .map_err(|e| AppError::Database(format!("Failed to migrate: {}", e)))?;
        tracing::info!("Database ready");

        let db = Arc::new(db);

        Ok(Self {
            auth: Arc::new(AuthHandler::new(UserRepository::new(Arc::clone(&db)))),
            oauth: GoogleOAuth::from_config(config)?,
            prompt_repo: PromptRepository::new(db),
        })
    }
}
