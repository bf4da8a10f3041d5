use thiserror::Error;

/// Result type alias for dns01 operations
pub type Result<T> = std::result::Result<T, Dns01Error>;

/// Errors that can occur while publishing or confirming validation records
#[derive(Error, Debug)]
pub enum Dns01Error {
    /// Provider API returned an error response
    #[error("{provider} {operation} failed ({status}): {message}")]
    Provider {
        /// Provider the request was sent to
        provider: String,
        /// Operation that failed, e.g. `list-records`
        operation: &'static str,
        /// HTTP status code of the response
        status: u16,
        /// Error message extracted from the response body
        message: String,
    },

    /// HTTP request failed before a response arrived
    #[error("{provider} {operation} request failed: {message}")]
    Http {
        /// Provider the request was sent to
        provider: String,
        /// Operation that failed
        operation: &'static str,
        /// Transport-level failure description
        message: String,
    },

    /// A lookup that assumed a unique match found none or several
    #[error("{provider} found {matched} matches for {name}, expected exactly one")]
    AmbiguousZone {
        /// Provider whose listing was ambiguous
        provider: String,
        /// Zone or record name that was looked up
        name: String,
        /// Number of entries the listing returned
        matched: usize,
    },

    /// Bounded consistency wait expired before all resolvers agreed
    #[error("resolvers did not agree on {name} within {rounds} rounds")]
    PropagationTimeout {
        /// Record name that was being confirmed
        name: String,
        /// Number of rounds that ran before giving up
        rounds: u32,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Dns01Error {
    /// Returns true if the error originated at the provider API boundary
    #[must_use]
    pub const fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::Provider { .. } | Self::Http { .. } | Self::AmbiguousZone { .. }
        )
    }

    /// Returns true if retrying the operation could plausibly succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http { .. } | Self::PropagationTimeout { .. } => true,
            Self::Provider { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns the HTTP status code if the provider reported one
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }
}
