mod auth_section;
mod profile;
mod prompt_card;

pub use auth_section::AuthSection;
pub use profile::Profile;
pub use prompt_card::PromptCard;
