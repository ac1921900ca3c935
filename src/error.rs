use crate::api::error::ApiError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("The environment variable '{0}' is not set")]
    MissingEnvironmentVariable(&'static str),

    #[error("The configuration file is invalid. Reason: {0}")]
    InvalidConfig(String),

    #[error("Image id format '{0}' is not valid")]
    InvalidImageId(String),

    #[error("The command '{command}' failed. Reason: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("Received non-numeric quota usage '{0}'")]
    InvalidQuota(String),

    #[error("There was an api error: {0}")]
    ApiError(#[from] ApiError)
}
