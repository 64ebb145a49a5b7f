//! Routing client error types.

/// Errors from the routing provider.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// Provider found no route between the points
    #[error("no route found ({code}): {message}")]
    NoRoute { code: String, message: String },

    /// Request timed out
    #[error("routing request timed out")]
    Timeout,

    /// Connection-level failure
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Provider returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be interpreted
    #[error("malformed routing response: {message}")]
    Malformed { message: String },
}

impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RoutingError::Timeout
        } else {
            RoutingError::Http(err)
        }
    }
}
