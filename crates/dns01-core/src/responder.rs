use async_trait::async_trait;

use crate::error::Result;
use crate::types::Dns01Challenge;

/// Challenge type identifier answered by every responder in this workspace
pub const CHALLENGE_TYPE_DNS01: &str = "dns-01";

/// The challenge-response contract an issuance orchestrator drives.
///
/// `start_responding` returns only once the validation record is in place
/// (and, for wrapping implementations, externally observable), so the
/// orchestrator can tell the validating server to look as soon as the call
/// completes. `stop_responding` releases the response and must be safe to
/// call repeatedly, including when `start_responding` failed or never ran.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Challenge type this responder answers
    fn challenge_type(&self) -> &'static str {
        CHALLENGE_TYPE_DNS01
    }

    /// Publishes the validation response for `challenge`
    async fn start_responding(&self, challenge: &Dns01Challenge) -> Result<()>;

    /// Retracts the response for `challenge`; idempotent
    async fn stop_responding(&self, challenge: &Dns01Challenge) -> Result<()>;
}

#[async_trait]
impl<R: Responder + ?Sized> Responder for Box<R> {
    fn challenge_type(&self) -> &'static str {
        (**self).challenge_type()
    }

    async fn start_responding(&self, challenge: &Dns01Challenge) -> Result<()> {
        (**self).start_responding(challenge).await
    }

    async fn stop_responding(&self, challenge: &Dns01Challenge) -> Result<()> {
        (**self).stop_responding(challenge).await
    }
}
