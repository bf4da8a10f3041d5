//! Publishing responder binding a [`RecordPublisher`] to the
//! challenge-response contract.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use dns01_core::{Dns01Challenge, Responder, Result, DEFAULT_TTL};

use crate::publisher::RecordPublisher;

/// Pause after publishing before the record is treated as in place
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(60);

/// Responder that answers DNS-01 challenges through a provider's record
/// API.
///
/// `start_responding` publishes the validation record, then waits a fixed
/// settle delay so the provider's authoritative servers begin serving the
/// value before anyone is told to look. `stop_responding` waits out the
/// same delay and leaves the record in place: the short TTL ages it out,
/// and the next challenge for the same name overwrites it. Orchestrators
/// that want eager cleanup can drive [`RecordPublisher::remove`] with a
/// handle from their own upsert instead.
pub struct RecordResponder<P> {
    publisher: P,
    ttl: u32,
    settle_delay: Duration,
}

impl<P: RecordPublisher> RecordResponder<P> {
    /// Create a responder with the default TTL and settle delay
    #[must_use]
    pub fn new(publisher: P) -> Self {
        Self {
            publisher,
            ttl: DEFAULT_TTL,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Set the TTL for published records
    #[must_use]
    pub const fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the settle delay
    #[must_use]
    pub const fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// The publisher this responder publishes through
    pub fn publisher(&self) -> &P {
        &self.publisher
    }
}

#[async_trait]
impl<P: RecordPublisher> Responder for RecordResponder<P> {
    async fn start_responding(&self, challenge: &Dns01Challenge) -> Result<()> {
        let name = challenge.validation_domain_name();
        let handle = self
            .publisher
            .upsert(&name, challenge.validation_content(), self.ttl)
            .await?;

        debug!(
            provider = self.publisher.provider(),
            zone = %handle.zone,
            name = %handle.name,
            "validation record accepted, settling"
        );
        tokio::time::sleep(self.settle_delay).await;
        info!(name = %handle.name, "validation record in place");
        Ok(())
    }

    async fn stop_responding(&self, challenge: &Dns01Challenge) -> Result<()> {
        // Cleanup is deferred: the record ages out via its TTL and the
        // next challenge for this name overwrites it in place.
        debug!(
            provider = self.publisher.provider(),
            name = %challenge.validation_domain_name(),
            "leaving validation record to expire"
        );
        tokio::time::sleep(self.settle_delay).await;
        Ok(())
    }
}
