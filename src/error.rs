//! Error taxonomy for the catalog client.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (DNS, TLS, connection reset, bad JSON body).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response; `message` comes from the body when the server
    /// sent one, otherwise from the per-operation fallback text.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("unexpected response format from {0}")]
    UnexpectedFormat(&'static str),

    #[error("invalid form: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("token store: {0}")]
    TokenStore(#[source] std::io::Error),

    #[error("could not read image file: {0}")]
    Image(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Builds the error for a non-2xx response, preferring the server's
    /// `message` field over the operation's fallback text.
    pub fn from_response(status: u16, message: Option<String>, fallback: &str) -> Self {
        Self::Api {
            status,
            message: message.unwrap_or_else(|| fallback.to_string()),
        }
    }
}
