mod oauth_profile;
mod post;
mod session;
mod user;

pub use oauth_profile::OAuthProfile;
pub use post::Post;
pub use session::{Session, SessionUser};
pub use user::{username_from_display_name, NewUser, User, DEFAULT_USER_IMAGE};
