use crate::application::PostsApi;
use crate::domain::Post;
use async_trait::async_trait;
use promptshare_errors::AppError;
use url::Url;

/// [`PostsApi`] over HTTP, rooted at the site origin.
#[derive(Clone)]
pub struct HttpPostsApi {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpPostsApi {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::InvalidInput(format!("Invalid base URL {base_url}: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(AppError::InvalidInput(format!(
                "Base URL {base_url} cannot carry a path"
            )));
        }

        Ok(Self {
            http_client: reqwest::Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn upstream(e: reqwest::Error) -> AppError {
    AppError::Upstream(e.to_string())
}

#[async_trait(?Send)]
impl PostsApi for HttpPostsApi {
    async fn list_user_posts(&self, user_id: &str) -> Result<Vec<Post>, AppError> {
        self.http_client
            .get(self.endpoint(&["api", "users", user_id, "posts"]))
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?
            .json::<Vec<Post>>()
            .await
            .map_err(upstream)
    }

    async fn delete_post(&self, post_id: &str) -> Result<(), AppError> {
        self.http_client
            .delete(self.endpoint(&["api", "prompt", post_id]))
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_rooted_at_origin() {
        let api = HttpPostsApi::new("http://localhost:3000").unwrap();

        assert_eq!(
            api.endpoint(&["api", "users", "defaultUserId", "posts"]).as_str(),
            "http://localhost:3000/api/users/defaultUserId/posts"
        );
        assert_eq!(
            api.endpoint(&["api", "prompt", "p1"]).as_str(),
            "http://localhost:3000/api/prompt/p1"
        );
    }

    #[test]
    fn test_path_segments_are_escaped() {
        let api = HttpPostsApi::new("https://example.com/app/").unwrap();

        assert_eq!(
            api.endpoint(&["api", "prompt", "a/b c"]).as_str(),
            "https://example.com/app/api/prompt/a%2Fb%20c"
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(HttpPostsApi::new("not a url").is_err());
        assert!(HttpPostsApi::new("mailto:someone@example.com").is_err());
    }
}
