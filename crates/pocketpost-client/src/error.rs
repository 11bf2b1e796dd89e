use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("this action requires a signed-in user")]
    IdentityRequired,
}

pub type Result<T> = std::result::Result<T, ClientError>;
