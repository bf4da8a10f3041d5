//! Core types and traits for the dns01 validation toolkit.
//!
//! This crate provides the foundational pieces shared across the dns01
//! crates:
//!
//! - **Types**: the DNS-01 challenge and the provider-side record handle
//! - **Errors**: unified error handling with [`Dns01Error`]
//! - **Traits**: the [`Responder`] contract driven by an issuance
//!   orchestrator and implemented by record publishers and their wrappers
//!
//! # Example
//!
//! ```rust,ignore
//! use dns01_core::{Dns01Challenge, Responder, Result};
//!
//! async fn respond<R: Responder>(responder: &R, challenge: &Dns01Challenge) -> Result<()> {
//!     responder.start_responding(challenge).await?;
//!     println!("serving TXT at {}", challenge.validation_domain_name());
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/dns01-core/0.1.0")]

mod error;
mod responder;
pub mod types;

pub use error::{Dns01Error, Result};
pub use responder::{Responder, CHALLENGE_TYPE_DNS01};
pub use types::*;
