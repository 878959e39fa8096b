pub mod application;
pub mod domain;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "ssr")]
pub mod config;

#[cfg(feature = "ssr")]
pub mod infrastructure;

#[cfg(feature = "ssr")]
mod app_context;

#[cfg(feature = "ssr")]
pub use app_context::AppContext;
