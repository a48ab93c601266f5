mod app_config;
mod config;
mod headline;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use headline::{set_headline, AssetKind, HeadlineOutcome, LocatorError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
