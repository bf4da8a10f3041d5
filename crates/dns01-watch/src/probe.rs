//! TXT probes over individual resolver endpoints.

use std::fmt;

use async_trait::async_trait;
use hickory_proto::xfer::Protocol;
use hickory_resolver::config::{NameServerConfig, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::Resolver;
use tracing::debug;

use crate::resolver_set::ResolverEndpoint;

/// Type alias for the Tokio async resolver
type TokioResolver = Resolver<TokioConnectionProvider>;

/// What a single resolver reported for a TXT name.
///
/// Lookup failures, timeouts and empty answers all collapse into
/// [`NoAnswer`](Self::NoAnswer): to the unanimity rule they are
/// indistinguishable from a wrong value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxtObservation {
    /// First TXT record's value, character-strings joined
    Value(String),

    /// No usable answer from this resolver
    NoAnswer,
}

impl TxtObservation {
    /// True if this observation is exactly the expected content
    #[must_use]
    pub fn matches(&self, expected: &str) -> bool {
        matches!(self, Self::Value(value) if value == expected)
    }
}

impl fmt::Display for TxtObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value:?}"),
            Self::NoAnswer => write!(f, "(no answer)"),
        }
    }
}

/// A single resolver endpoint that can be asked for TXT records
#[async_trait]
pub trait TxtProbe: Send + Sync {
    /// Label identifying the resolver in logs and reports
    fn label(&self) -> &str;

    /// Query `name` for TXT records, reporting the first value seen
    async fn observe(&self, name: &str) -> TxtObservation;
}

/// Probe that queries one resolver endpoint over UDP
pub struct HickoryProbe {
    label: String,
    resolver: TokioResolver,
}

impl HickoryProbe {
    /// Create a probe bound to one resolver endpoint
    #[must_use]
    pub fn new(endpoint: &ResolverEndpoint) -> Self {
        let mut config = ResolverConfig::new();
        config.add_name_server(NameServerConfig::new(endpoint.socket_addr(), Protocol::Udp));
        let resolver =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default()).build();

        Self {
            label: endpoint.label(),
            resolver,
        }
    }
}

#[async_trait]
impl TxtProbe for HickoryProbe {
    fn label(&self) -> &str {
        &self.label
    }

    async fn observe(&self, name: &str) -> TxtObservation {
        match self.resolver.txt_lookup(name).await {
            Ok(lookup) => lookup.iter().next().map_or(TxtObservation::NoAnswer, |txt| {
                // TXT records can carry multiple character-strings; join them
                let value: String = txt
                    .txt_data()
                    .iter()
                    .map(|chunk| String::from_utf8_lossy(chunk))
                    .collect();
                TxtObservation::Value(value)
            }),
            Err(e) => {
                // NXDOMAIN, SERVFAIL or timeout: nothing to compare yet
                debug!(resolver = %self.label, name, error = %e, "TXT lookup yielded no answer");
                TxtObservation::NoAnswer
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_matching() {
        let value = TxtObservation::Value("abc123".to_string());
        assert!(value.matches("abc123"));
        assert!(!value.matches("other"));
        assert!(!TxtObservation::NoAnswer.matches("abc123"));
    }

    #[test]
    fn test_observation_display_distinguishes_empty_from_missing() {
        assert_eq!(TxtObservation::Value(String::new()).to_string(), "\"\"");
        assert_eq!(TxtObservation::NoAnswer.to_string(), "(no answer)");
    }
}
