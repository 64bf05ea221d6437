// Core infrastructure module
// Provides foundational systems that other modules depend on

pub mod app;
pub mod app_config;
pub mod error;
pub mod logging;
pub mod preflight;
pub mod user_config;

pub use app::{App, Shutdown};
pub use app_config::AppConfig;
pub use error::SyncError;
pub use preflight::check_roots;
pub use user_config::ConfigFile;
