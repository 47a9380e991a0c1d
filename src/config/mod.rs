//! Launcher configuration: the optional config file and the captured
//! process environment.

mod env;
mod loader;
mod types;

pub use env::{LaunchEnv, LOG_FILE_ENV, RUNTIME_PATH_ENV};
pub use loader::ConfigError;
pub use types::{BackendConfig, Config, LoggingConfig};
