//! Responder decorator that gates completion on resolver agreement.

use async_trait::async_trait;
use tracing::debug;

use dns01_core::{Dns01Challenge, Responder, Result};

use crate::checker::ConsistencyChecker;

/// Decorator that only reports a challenge as ready once every resolver
/// in the checker's set observes the published content.
///
/// `start_responding` delegates to the wrapped responder, then runs the
/// consistency check against the challenge's validation name and content,
/// so completion means "published and externally observable".
/// `stop_responding` delegates unchanged. A provider API documented as
/// globally consistent can skip the wrapper and use the plain responder.
pub struct WaitingResponder<R> {
    inner: R,
    checker: ConsistencyChecker,
}

impl<R: Responder> WaitingResponder<R> {
    /// Wrap `inner`, gating completion on `checker`
    #[must_use]
    pub fn new(inner: R, checker: ConsistencyChecker) -> Self {
        Self { inner, checker }
    }

    /// The wrapped responder
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: Responder> Responder for WaitingResponder<R> {
    fn challenge_type(&self) -> &'static str {
        self.inner.challenge_type()
    }

    async fn start_responding(&self, challenge: &Dns01Challenge) -> Result<()> {
        self.inner.start_responding(challenge).await?;

        let name = challenge.validation_domain_name();
        debug!(name = %name, "record published, waiting for resolver agreement");
        self.checker
            .check(&name, challenge.validation_content())
            .await?;
        Ok(())
    }

    async fn stop_responding(&self, challenge: &Dns01Challenge) -> Result<()> {
        self.inner.stop_responding(challenge).await
    }
}
