use serde::{Deserialize, Serialize};

/// Label prefixed to a domain to form its validation domain name
pub const DNS01_LABEL: &str = "_acme-challenge";

/// A single DNS-01 domain validation attempt.
///
/// Carries the server-assigned token, the domain under validation and the
/// validation content the protocol layer derived from the token and the
/// account key. Immutable once constructed; responders and checkers derive
/// everything else from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dns01Challenge {
    domain: String,
    token: String,
    validation_content: String,
}

impl Dns01Challenge {
    /// Creates a challenge for `domain` with the given token and
    /// precomputed validation content
    #[must_use]
    pub fn new(
        domain: impl Into<String>,
        token: impl Into<String>,
        validation_content: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            token: token.into(),
            validation_content: validation_content.into(),
        }
    }

    /// The domain under validation
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The server-assigned challenge token
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The TXT value the validating server expects to observe
    #[must_use]
    pub fn validation_content(&self) -> &str {
        &self.validation_content
    }

    /// The fully-qualified name of the TXT record to publish.
    ///
    /// Prefixes the domain with `_acme-challenge.`. A wildcard `*.` prefix
    /// and any trailing dot are stripped first, so `*.example.com.`
    /// validates at `_acme-challenge.example.com`.
    #[must_use]
    pub fn validation_domain_name(&self) -> String {
        Self::validation_name_for(&self.domain)
    }

    /// The validation domain name for `domain`, without building a full
    /// challenge. Useful when cleaning up a record whose token is long gone.
    #[must_use]
    pub fn validation_name_for(domain: &str) -> String {
        let domain = domain.strip_prefix("*.").unwrap_or(domain).trim_end_matches('.');
        format!("{DNS01_LABEL}.{domain}")
    }
}
