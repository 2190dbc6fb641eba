//! Application runtime support: layered configuration and logging init.

pub mod config;
pub mod logging;

pub use config::{
    AppConfig, AuthConfig, CliArgs, DatabaseConfig, LoggingConfig, ServerConfig,
};
