use thiserror::Error;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid config value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Environment variable {key} has unparsable value {value:?}")]
    EnvVar { key: &'static str, value: String },

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type PulseResult<T> = std::result::Result<T, PulseError>;
