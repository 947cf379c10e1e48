//! Error types for Wikivoyage

use thiserror::Error;

/// Errors that can occur while fetching pages or searching the wiki
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// URL could not be parsed or joined
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Server answered with a 4xx or 5xx status
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Search response was not the expected opensearch array
    #[error("Failed to decode search response")]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::ConnectError(err)
        } else {
            FetchError::RequestError(err.to_string())
        }
    }

    /// True for network-level failures (DNS, connect, timeout)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::Timeout | FetchError::ConnectError(_) | FetchError::RequestError(_)
        )
    }

    /// Status code carried by [`FetchError::HttpStatus`]
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FetchError::MissingUrl.to_string(),
            "Missing required parameter: url"
        );
        assert_eq!(
            FetchError::InvalidUrlScheme.to_string(),
            "Invalid URL: must start with http:// or https://"
        );
        assert_eq!(FetchError::Timeout.to_string(), "Request timed out");
        assert_eq!(
            FetchError::HttpStatus {
                status: 404,
                url: "https://en.wikivoyage.org/wiki/Nowhere".to_string(),
            }
            .to_string(),
            "HTTP 404 for https://en.wikivoyage.org/wiki/Nowhere"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(FetchError::Timeout.is_transport());
        assert!(FetchError::RequestError("reset".to_string()).is_transport());
        assert!(!FetchError::MissingUrl.is_transport());

        let status = FetchError::HttpStatus {
            status: 503,
            url: String::new(),
        };
        assert!(!status.is_transport());
        assert_eq!(status.status(), Some(503));
        assert_eq!(FetchError::Timeout.status(), None);
    }

    #[test]
    fn test_decode_error_keeps_source() {
        let json_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err = FetchError::Decode(json_err);
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_transport());
    }
}
