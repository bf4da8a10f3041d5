//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};

use crate::config::Provider;
use crate::output::OutputFormat;

/// Publish and watch DNS-01 validation records
///
/// Creates the `_acme-challenge` TXT record a certificate authority looks
/// for, waits for it to settle, and can poll public resolvers until the
/// record is visible everywhere.
#[derive(Parser, Debug)]
#[command(name = "dns01")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Provider API token (or set DNS01_API_TOKEN env var)
    #[arg(short = 'k', long, env = "DNS01_API_TOKEN", global = true)]
    pub api_token: Option<String>,

    /// Account email, required for Cloudflare (or set DNS01_EMAIL env var)
    #[arg(long, env = "DNS01_EMAIL", global = true)]
    pub email: Option<String>,

    /// Zone the validation records live in, e.g. example.com
    #[arg(short = 'z', long, env = "DNS01_ZONE", global = true)]
    pub zone: Option<String>,

    /// DNS provider hosting the zone
    #[arg(short = 'p', long, global = true, value_enum)]
    pub provider: Option<Provider>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Publish a validation record and wait for it to settle
    Respond(RespondArgs),

    /// Delete a validation record left behind by an earlier response
    Retract(RetractArgs),

    /// Poll public resolvers until they all serve the expected record
    Check(CheckArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Respond command
// ============================================================================

#[derive(Args, Debug)]
pub struct RespondArgs {
    /// Domain under validation (wildcards like *.example.com are fine)
    pub domain: String,

    /// TXT value the validating server expects to observe
    pub content: String,

    /// Record TTL in seconds
    #[arg(long, default_value = "120")]
    pub ttl: u32,

    /// Seconds to wait after publishing for the zone to settle
    #[arg(long, default_value = "60")]
    pub settle: u64,

    /// Skip polling public resolvers after the settle delay
    #[arg(long)]
    pub no_wait: bool,

    /// Give up waiting after this many poll rounds (default: never)
    #[arg(long, conflicts_with = "no_wait")]
    pub max_rounds: Option<u32>,
}

// ============================================================================
// Retract command
// ============================================================================

#[derive(Args, Debug)]
pub struct RetractArgs {
    /// Domain whose validation record should be deleted
    pub domain: String,
}

// ============================================================================
// Check command
// ============================================================================

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Domain under validation
    pub domain: String,

    /// TXT value every resolver must serve
    pub content: String,

    /// Seconds to wait between poll rounds
    #[arg(long, default_value = "5")]
    pub delay: u64,

    /// Give up after this many poll rounds (default: never)
    #[arg(long)]
    pub max_rounds: Option<u32>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., api_token, zone, provider)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
