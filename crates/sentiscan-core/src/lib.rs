//! Shared configuration for the sentiscan workspace.

pub mod app_config;
pub mod config;

pub use app_config::{
    AppConfig, ClassifierBackend, RedditCredentials, TwitterCredentials,
};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
