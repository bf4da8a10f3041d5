//! DNS-01 certificate validation: publish TXT records through provider
//! APIs and confirm propagation across independent public resolvers.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dns01::{CloudflareDns, ConsistencyChecker, Dns01Challenge, RecordResponder,
//!             Responder, WaitingResponder};
//!
//! #[tokio::main]
//! async fn main() -> dns01::Result<()> {
//!     let publisher = CloudflareDns::new("ops@example.com", "api-key", "example.com");
//!     let responder = WaitingResponder::new(
//!         RecordResponder::new(publisher),
//!         ConsistencyChecker::default_public(),
//!     );
//!
//!     let challenge = Dns01Challenge::new("example.com", "token", "validation-content");
//!
//!     // Publish, settle, and wait until every public resolver agrees
//!     responder.start_responding(&challenge).await?;
//!
//!     // ... let the CA validate, then release the response
//!     responder.stop_responding(&challenge).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/dns01/0.1.0")]

// Re-export core types
pub use dns01_core::*;

// Re-export the provider publishers and the plain responder
pub use dns01_providers::{
    relative_name, CloudflareDns, CloudflareDnsBuilder, GandiDns, GandiDnsBuilder,
    RecordPublisher, RecordResponder, DEFAULT_SETTLE_DELAY,
};

// Re-export propagation watching
pub use dns01_watch::{
    Confirmation, ConsistencyChecker, HickoryProbe, ResolverAnswer, ResolverEndpoint,
    ResolverSet, RoundReport, TxtObservation, TxtProbe, WaitingResponder,
    DEFAULT_INTERQUERY_DELAY, DEFAULT_QUERY_TIMEOUT, RESOLVER_PORT,
};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
