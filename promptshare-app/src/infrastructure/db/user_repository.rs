use super::db_error;
use super::entities::{user, User};
use crate::application::UserStore;
use crate::domain::{self, NewUser};
use async_trait::async_trait;
use promptshare_errors::AppError;
use sea_orm::{entity::*, query::*, DatabaseConnection};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<domain::User>, AppError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map(|model| model.map(Into::into))
            .map_err(db_error)
    }

    async fn create(&self, new_user: NewUser) -> Result<domain::User, AppError> {
        let active = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(new_user.email),
            username: Set(new_user.username),
            image: Set(new_user.image),
            created_at: Set(Some(chrono::Utc::now())),
        };

        active.insert(self.db.as_ref()).await.map(Into::into).map_err(db_error)
    }
}
