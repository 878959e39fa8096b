mod auth_handler;
mod my_profile;

pub use auth_handler::{AuthCallbacks, AuthHandler, UserStore};
pub use my_profile::{
    edit_location, resolve_user_id, DeleteOutcome, MyPosts, PostsApi, ProfileActions,
    DELETE_CONFIRMATION, PLACEHOLDER_USER_ID,
};
