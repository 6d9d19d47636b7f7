use thiserror::Error;

#[derive(Debug, Error)]
/// Represents errors raised while reading repository configuration from the environment.
pub enum ConfigError {
    #[error("Environment variable {0} must be set")]
    MissingVar(&'static str),

    #[error("Environment variable {name} has invalid value {value:?}")]
    InvalidVar { name: &'static str, value: String },
}
