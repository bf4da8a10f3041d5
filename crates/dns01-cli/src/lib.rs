//! # dns01-cli
//!
//! Command-line tool for publishing and watching DNS-01 validation records.
//!
//! ## Features
//!
//! - **Respond**: publish a challenge TXT record and wait for it to settle
//! - **Check**: poll a fixed set of public resolvers until they all agree
//! - **Retract**: delete a record left behind by an earlier validation
//! - **Multiple providers**: Cloudflare and Gandi LiveDNS

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
