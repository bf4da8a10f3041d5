//! Fixed sets of independent public resolvers.

use std::net::{IpAddr, SocketAddr};

/// UDP port endpoint queries are sent to
pub const RESOLVER_PORT: u16 = 53;

/// One public resolver endpoint: the operator running it and its address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverEndpoint {
    /// Operator running the resolver, e.g. `Google`
    pub operator: String,

    /// Resolver address
    pub addr: IpAddr,
}

impl ResolverEndpoint {
    /// Create an endpoint
    #[must_use]
    pub fn new(operator: impl Into<String>, addr: IpAddr) -> Self {
        Self {
            operator: operator.into(),
            addr,
        }
    }

    /// Label used in logs and dissent reports
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.operator, self.addr)
    }

    /// Socket address queries are sent to
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.addr, RESOLVER_PORT)
    }
}

/// Fixed, ordered collection of resolver endpoints consulted each round.
///
/// Configured once up front; a checker never mutates it. The default set
/// spans four operators with two addresses each, so agreement means
/// operator-diverse agreement rather than one anycast network's view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSet {
    endpoints: Vec<ResolverEndpoint>,
}

impl ResolverSet {
    /// Create a set from explicit endpoints
    #[must_use]
    pub fn new(endpoints: Vec<ResolverEndpoint>) -> Self {
        Self { endpoints }
    }

    /// The default public set: Google, Level3, OpenDNS and Cloudflare,
    /// two addresses each
    #[must_use]
    pub fn default_public() -> Self {
        let endpoints = [
            ("Google", [8, 8, 8, 8]),
            ("Google", [8, 8, 4, 4]),
            ("Level3", [4, 2, 2, 2]),
            ("Level3", [4, 2, 2, 1]),
            ("OpenDNS", [208, 67, 222, 222]),
            ("OpenDNS", [208, 67, 220, 220]),
            ("Cloudflare", [1, 1, 1, 1]),
            ("Cloudflare", [1, 0, 0, 1]),
        ]
        .into_iter()
        .map(|(operator, octets)| ResolverEndpoint::new(operator, IpAddr::from(octets)))
        .collect();

        Self { endpoints }
    }

    /// Endpoints in consultation order
    #[must_use]
    pub fn endpoints(&self) -> &[ResolverEndpoint] {
        &self.endpoints
    }

    /// Number of endpoints
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// True if the set has no endpoints
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl Default for ResolverSet {
    fn default() -> Self {
        Self::default_public()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_public_set() {
        let set = ResolverSet::default_public();
        assert_eq!(set.len(), 8);

        let operators: HashSet<&str> = set
            .endpoints()
            .iter()
            .map(|endpoint| endpoint.operator.as_str())
            .collect();
        assert_eq!(operators.len(), 4);

        let addrs: HashSet<IpAddr> = set.endpoints().iter().map(|e| e.addr).collect();
        assert_eq!(addrs.len(), 8);
    }

    #[test]
    fn test_endpoint_label() {
        let endpoint = ResolverEndpoint::new("Google", IpAddr::from([8, 8, 8, 8]));
        assert_eq!(endpoint.label(), "Google (8.8.8.8)");
        assert_eq!(endpoint.socket_addr().port(), RESOLVER_PORT);
    }
}
