//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose);

    // Load configuration
    let config = Config::load()?;

    // Determine output format
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    // Credentials come from CLI or env (clap resolves both), then config
    let api_token = cli.api_token.or_else(|| config.api_token.clone());
    let email = cli.email.or_else(|| config.email.clone());
    let zone = cli.zone.or_else(|| config.zone.clone());
    let provider = cli.provider.or(config.provider).unwrap_or_default();

    // Create context for commands
    let ctx = commands::Context {
        provider,
        api_token,
        email,
        zone,
        output_format,
    };

    tracing::debug!(provider = %ctx.provider, "resolved command context");

    // Dispatch to appropriate command
    match cli.command {
        Commands::Respond(args) => commands::respond::execute(ctx, args).await,
        Commands::Retract(args) => commands::retract::execute(ctx, args).await,
        Commands::Check(args) => commands::check::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args).await,
    }
}

/// Route library logs to stderr. `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
