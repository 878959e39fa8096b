use crate::domain::{Post, Session};
use async_trait::async_trait;
use promptshare_errors::AppError;

/// Used as the user id when the session carries none.
pub const PLACEHOLDER_USER_ID: &str = "defaultUserId";

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this prompt?";

/// The posts endpoints the profile page talks to.
#[async_trait(?Send)]
pub trait PostsApi {
    /// `GET /api/users/{user_id}/posts`
    async fn list_user_posts(&self, user_id: &str) -> Result<Vec<Post>, AppError>;

    /// `DELETE /api/prompt/{post_id}`
    async fn delete_post(&self, post_id: &str) -> Result<(), AppError>;
}

pub fn resolve_user_id(session: Option<&Session>) -> String {
    session
        .and_then(Session::user_id)
        .unwrap_or(PLACEHOLDER_USER_ID)
        .to_string()
}

/// Where the edit action navigates to.
pub fn edit_location(post: &Post) -> String {
    format!("/update-prompt?id={}", post.id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Removed,
    /// The server call failed but the post is dropped from the list anyway.
    RemovedLocallyOnly,
}

impl DeleteOutcome {
    pub fn removes_locally(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// Posts currently shown on the profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MyPosts {
    posts: Vec<Post>,
}

impl MyPosts {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn replace(&mut self, posts: Vec<Post>) {
        self.posts = posts;
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, post_id: &str) -> bool {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != post_id);
        self.posts.len() != before
    }

    pub fn apply_delete(&mut self, post_id: &str, outcome: DeleteOutcome) {
        if outcome.removes_locally() {
            self.remove(post_id);
        }
    }

    pub fn as_slice(&self) -> &[Post] {
        &self.posts
    }

    pub fn into_vec(self) -> Vec<Post> {
        self.posts
    }
}

pub struct ProfileActions<A> {
    api: A,
}

impl<A: PostsApi> ProfileActions<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// `None` means the fetch failed and the current list should be kept.
    pub async fn fetch_posts(&self, user_id: &str) -> Option<Vec<Post>> {
        match self.api.list_user_posts(user_id).await {
            Ok(posts) => Some(posts),
            Err(e) => {
                tracing::error!("Failed to fetch posts for {}: {}", user_id, e);
                None
            }
        }
    }

    pub async fn delete_post(&self, post: &Post, confirmed: bool) -> DeleteOutcome {
        if !confirmed {
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_post(&post.id).await {
            Ok(()) => DeleteOutcome::Removed,
            Err(e) => {
                tracing::warn!("Delete of post {} failed, removing it locally anyway: {}", post.id, e);
                DeleteOutcome::RemovedLocallyOnly
            }
        }
    }
}
