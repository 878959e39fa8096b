mod http_posts_api;

pub use http_posts_api::HttpPostsApi;
