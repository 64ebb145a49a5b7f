//! Geocoding error types.

/// Errors from resolving a place name to coordinates.
///
/// Variants separate "the provider has no answer" from failures that may go
/// away on retry and from responses we could not understand.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The provider returned no match for the query
    #[error("no match found for {query:?}")]
    NotFound { query: String },

    /// Request timed out
    #[error("geocoding request timed out")]
    Timeout,

    /// Provider answered 429 Too Many Requests
    #[error("rate limited by geocoding provider")]
    RateLimited,

    /// Connection-level failure
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Provider returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be interpreted
    #[error("malformed geocoding response: {message}")]
    Malformed { message: String },

    /// Client could not be built from its configuration
    #[error("invalid geocoder configuration: {message}")]
    InvalidConfig { message: String },
}

impl GeocodeError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            GeocodeError::Timeout | GeocodeError::RateLimited | GeocodeError::Http(_) => true,
            GeocodeError::Api { status, .. } => *status >= 500,
            GeocodeError::NotFound { .. }
            | GeocodeError::Malformed { .. }
            | GeocodeError::InvalidConfig { .. } => false,
        }
    }
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GeocodeError::Timeout
        } else {
            GeocodeError::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::NotFound {
            query: "Nowhere, ZZ".into(),
        };
        assert_eq!(err.to_string(), "no match found for \"Nowhere, ZZ\"");

        let err = GeocodeError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        assert_eq!(
            GeocodeError::RateLimited.to_string(),
            "rate limited by geocoding provider"
        );
    }

    #[test]
    fn transient_classification() {
        assert!(GeocodeError::Timeout.is_transient());
        assert!(GeocodeError::RateLimited.is_transient());
        assert!(
            GeocodeError::Api {
                status: 502,
                message: String::new()
            }
            .is_transient()
        );

        assert!(
            !GeocodeError::Api {
                status: 400,
                message: String::new()
            }
            .is_transient()
        );
        assert!(!GeocodeError::NotFound { query: "x".into() }.is_transient());
        assert!(
            !GeocodeError::Malformed {
                message: "bad".into()
            }
            .is_transient()
        );
        assert!(
            !GeocodeError::InvalidConfig {
                message: "bad".into()
            }
            .is_transient()
        );
    }
}
