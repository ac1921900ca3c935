use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Only api v2 is supported")]
    UnsupportedRegistry,

    #[error("Found invalid header value for header '{0}'")]
    InvalidHeaderValue(String),

    #[error("There was an error during the request: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Received error from api: '{0}'")]
    RegistryError(String),

    #[error("Unable to obtain a token from '{0}'. Reason: {1}")]
    TokenExchange(String, String),
}
