use thiserror::Error;

/// Errors surfaced by the API client and services.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a non-2xx status. `message` is the best
    /// available text: the body's `message`/`error`/`msg` field when the
    /// backend sent one, a generic fallback otherwise.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a usable response (DNS, TLS, timeout,
    /// connection reset, or an undecodable body).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    BaseUrl(String),
}

impl ClientError {
    /// HTTP status of a rejected response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
