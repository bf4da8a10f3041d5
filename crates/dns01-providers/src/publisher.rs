use async_trait::async_trait;

use dns01_core::{RecordHandle, Result};

/// One DNS provider's record-management API, reduced to what DNS-01
/// validation needs.
///
/// `upsert` maintains at most one TXT record per name: it creates the
/// record when absent and overwrites it in place when present, never
/// leaving duplicates behind. `remove` is best-effort; removing a record
/// that is already gone counts as success.
#[async_trait]
pub trait RecordPublisher: Send + Sync {
    /// Provider name used in logs and error context
    fn provider(&self) -> &'static str;

    /// Creates or overwrites the TXT record at `name`
    async fn upsert(&self, name: &str, content: &str, ttl: u32) -> Result<RecordHandle>;

    /// Removes the record a previous upsert returned
    async fn remove(&self, handle: &RecordHandle) -> Result<()>;
}

#[async_trait]
impl<P: RecordPublisher + ?Sized> RecordPublisher for Box<P> {
    fn provider(&self) -> &'static str {
        (**self).provider()
    }

    async fn upsert(&self, name: &str, content: &str, ttl: u32) -> Result<RecordHandle> {
        (**self).upsert(name, content, ttl).await
    }

    async fn remove(&self, handle: &RecordHandle) -> Result<()> {
        (**self).remove(handle).await
    }
}
