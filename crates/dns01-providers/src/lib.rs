//! Provider record publishers for DNS-01 validation.
//!
//! This crate provides [`RecordPublisher`] implementations for the DNS
//! providers a validation record can be published through, plus the
//! [`RecordResponder`] that binds a publisher to the challenge-response
//! contract.

#![doc(html_root_url = "https://docs.rs/dns01-providers/0.1.0")]

mod cloudflare;
mod gandi;
mod publisher;
mod responder;
mod zone;

pub use cloudflare::{CloudflareDns, CloudflareDnsBuilder};
pub use gandi::{GandiDns, GandiDnsBuilder};
pub use publisher::RecordPublisher;
pub use responder::{RecordResponder, DEFAULT_SETTLE_DELAY};
pub use zone::relative_name;

pub use dns01_core::{Dns01Error, Result};
