pub mod prompt;
pub mod user;

pub use prompt::Entity as Prompt;
pub use user::Entity as User;
