//! Command implementations.

pub mod check;
pub mod config;
pub mod respond;
pub mod retract;

use dns01::{CloudflareDns, GandiDns, RecordPublisher};

use crate::config::Provider;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// DNS provider hosting the zone
    pub provider: Provider,

    /// Provider API token
    pub api_token: Option<String>,

    /// Account email (Cloudflare only)
    pub email: Option<String>,

    /// Zone the validation records live in
    pub zone: Option<String>,

    /// Output format
    pub output_format: OutputFormat,
}

impl Context {
    /// Get the API token, returning an error if not set.
    pub fn require_token(&self) -> anyhow::Result<&str> {
        self.api_token.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "API token required.\n\n\
                 Set it with one of:\n  \
                 1. --api-token <TOKEN>\n  \
                 2. DNS01_API_TOKEN environment variable\n  \
                 3. dns01 config set api_token <TOKEN>"
            )
        })
    }

    /// Get the zone, returning an error if not set.
    pub fn require_zone(&self) -> anyhow::Result<&str> {
        self.zone.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Zone required.\n\n\
                 Set it with one of:\n  \
                 1. --zone <ZONE>\n  \
                 2. DNS01_ZONE environment variable\n  \
                 3. dns01 config set zone <ZONE>"
            )
        })
    }

    /// Create a record publisher for the configured provider.
    pub fn publisher(&self) -> anyhow::Result<Box<dyn RecordPublisher>> {
        let zone = self.require_zone()?;
        let token = self.require_token()?;

        match self.provider {
            Provider::Cloudflare => {
                let email = self.email.as_deref().ok_or_else(|| {
                    anyhow::anyhow!(
                        "Cloudflare needs an account email.\n\n\
                         Set it with one of:\n  \
                         1. --email <EMAIL>\n  \
                         2. DNS01_EMAIL environment variable\n  \
                         3. dns01 config set email <EMAIL>"
                    )
                })?;
                Ok(Box::new(CloudflareDns::new(email, token, zone)))
            }
            Provider::Gandi => Ok(Box::new(GandiDns::new(token, zone))),
        }
    }
}
