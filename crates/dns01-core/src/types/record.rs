use serde::{Deserialize, Serialize};

/// Default TTL in seconds for published validation records
pub const DEFAULT_TTL: u32 = 120;

/// Provider-side identity of a published TXT record.
///
/// Returned by every upsert so a caller can later target the same record
/// for removal. Providers that address records by name rather than by id
/// leave `id` empty. Serializable so an orchestrator can persist handles
/// across runs for deferred cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHandle {
    /// Zone the record lives in (provider zone id or zone name)
    pub zone: String,

    /// Provider-assigned record id, if the provider issues one
    #[serde(default)]
    pub id: Option<String>,

    /// Fully-qualified record name
    pub name: String,
}

impl RecordHandle {
    /// Handle for a record addressed by zone and name only
    #[must_use]
    pub fn by_name(zone: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            id: None,
            name: name.into(),
        }
    }

    /// Handle for a record with a provider-assigned id
    #[must_use]
    pub fn with_id(
        zone: impl Into<String>,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            zone: zone.into(),
            id: Some(id.into()),
            name: name.into(),
        }
    }
}
