//! Error types for the library layer.

/// Message shown when a view is asked to fetch without a usable id.
pub const INVALID_ID_MESSAGE: &str = "有効なIDを指定してください";

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding id validation, preference and configuration failures.
#[derive(thiserror::Error, Debug)]
pub enum ShareholdingError {
    /// An error from the underlying API client. Displayed verbatim.
    #[error(transparent)]
    Api(#[from] shareholding_api::Error),
    /// A view was given a missing or non-numeric id.
    #[error("{}", INVALID_ID_MESSAGE)]
    InvalidId,
    /// Reading or writing persisted UI preferences failed.
    #[error("Preference error: {0}")]
    Preferences(String),
    /// The configured API base URL is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShareholdingError {
    /// HTTP status of the upstream failure, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_display_verbatim() {
        let err = ShareholdingError::from(shareholding_api::Error::Api {
            status: 404,
            message: "API request failed: 404 Not Found - not found".to_string(),
        });
        assert_eq!(err.to_string(), "API request failed: 404 Not Found - not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn invalid_id_message() {
        assert_eq!(ShareholdingError::InvalidId.to_string(), INVALID_ID_MESSAGE);
        assert_eq!(ShareholdingError::InvalidId.status(), None);
    }
}
