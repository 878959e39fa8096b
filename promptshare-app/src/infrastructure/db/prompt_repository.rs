use super::db_error;
use super::entities::{prompt, Prompt};
use crate::domain::Post;
use promptshare_errors::AppError;
use sea_orm::{entity::*, query::*, DatabaseConnection};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct PromptRepository {
    db: Arc<DatabaseConnection>,
}

impl PromptRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Newest first.
    pub async fn find_by_creator(&self, creator_id: Uuid) -> Result<Vec<Post>, AppError> {
        let prompts = Prompt::find()
            .filter(prompt::Column::CreatorId.eq(creator_id))
            .order_by_desc(prompt::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(db_error)?;

        Ok(prompts.into_iter().map(Post::from).collect())
    }

    /// Returns whether a prompt was deleted.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = Prompt::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected > 0)
    }
}
