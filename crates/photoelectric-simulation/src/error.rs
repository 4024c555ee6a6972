//! Errors raised while assembling an experiment from configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown metal '{0}'")]
    UnknownMetal(String),

    #[error("unknown light source '{0}'")]
    UnknownSource(String),
}
