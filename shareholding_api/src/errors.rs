//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The API answered with a non-success status.
    ///
    /// `message` is composed from the status line and the response body, e.g.
    /// `API request failed: 404 Not Found - not found`.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// No response was received at all. Carries the transport's own message.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The body of a successful response did not match the declared shape.
    #[error("Failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),
    /// The base URL and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// HTTP status code of an [`Error::Api`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
