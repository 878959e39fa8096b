mod home;
mod profile;

pub use home::HomePage;
pub use profile::MyProfilePage;
