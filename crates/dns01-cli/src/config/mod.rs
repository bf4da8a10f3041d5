//! Configuration management.

use anyhow::Result;
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::output::OutputFormat;

/// Supported DNS providers.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Cloudflare DNS (api.cloudflare.com)
    #[default]
    Cloudflare,
    /// Gandi LiveDNS (api.gandi.net)
    Gandi,
}

impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cloudflare" => Ok(Self::Cloudflare),
            "gandi" => Ok(Self::Gandi),
            _ => anyhow::bail!(
                "Unknown provider: {}\n\
                 Valid providers: cloudflare, gandi",
                s
            ),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cloudflare => write!(f, "cloudflare"),
            Self::Gandi => write!(f, "gandi"),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// DNS provider hosting the zone.
    pub provider: Option<Provider>,

    /// Provider API token.
    pub api_token: Option<String>,

    /// Account email (Cloudflare only).
    pub email: Option<String>,

    /// Zone the validation records live in.
    pub zone: Option<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Issue against the CA's staging environment. Opaque to this tool;
    /// stored for the issuance driver reading the same file.
    #[serde(default)]
    pub staging: bool,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("rs", "dns01", "dns01")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config {
            provider: Some(Provider::Gandi),
            api_token: Some("secret".to_string()),
            email: None,
            zone: Some("example.com".to_string()),
            output_format: Some(OutputFormat::Json),
            staging: true,
        };

        let toml = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&toml).unwrap();

        assert_eq!(back.provider, Some(Provider::Gandi));
        assert_eq!(back.api_token.as_deref(), Some("secret"));
        assert_eq!(back.email, None);
        assert_eq!(back.zone.as_deref(), Some("example.com"));
        assert_eq!(back.output_format, Some(OutputFormat::Json));
        assert!(back.staging);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config: Config = toml::from_str("zone = \"example.com\"").unwrap();

        assert_eq!(config.zone.as_deref(), Some("example.com"));
        assert_eq!(config.provider, None);
        assert!(!config.staging);
    }

    #[test]
    fn test_provider_parses_case_insensitively() {
        assert_eq!("Cloudflare".parse::<Provider>().unwrap(), Provider::Cloudflare);
        assert_eq!("GANDI".parse::<Provider>().unwrap(), Provider::Gandi);
        assert!("route53".parse::<Provider>().is_err());
    }
}
