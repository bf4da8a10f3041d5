//! Propagation confirmation for DNS-01 validation records.
//!
//! After a record is published, independent public resolvers are polled
//! in parallel until every one of them serves the expected content. The
//! [`WaitingResponder`] decorator bolts that confirmation onto any
//! [`Responder`](dns01_core::Responder).

#![doc(html_root_url = "https://docs.rs/dns01-watch/0.1.0")]

mod checker;
mod probe;
mod resolver_set;
mod waiting;

pub use checker::{
    Confirmation, ConsistencyChecker, ResolverAnswer, RoundReport, DEFAULT_INTERQUERY_DELAY,
    DEFAULT_QUERY_TIMEOUT,
};
pub use probe::{HickoryProbe, TxtObservation, TxtProbe};
pub use resolver_set::{ResolverEndpoint, ResolverSet, RESOLVER_PORT};
pub use waiting::WaitingResponder;

pub use dns01_core::{Dns01Error, Result};
