//! `dns01 config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx).await,
        ConfigCommands::Set { key, value } => set_config(ctx, &key, &value).await,
        ConfigCommands::Path => show_path(ctx).await,
    }
}

async fn show_config(ctx: Context) -> Result<()> {
    let config = Config::load()?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Pretty => {
            println!("{}", "Current Configuration:".bold());
            println!();

            println!(
                "  {} {}",
                "provider:".bold(),
                config.provider.unwrap_or_default()
            );

            // API token (masked)
            let token_display = config
                .api_token
                .as_ref()
                .map(|k| {
                    if k.len() > 8 {
                        format!("{}...{}", &k[..4], &k[k.len() - 4..])
                    } else {
                        "****".to_string()
                    }
                })
                .unwrap_or_else(|| "(not set)".dimmed().to_string());
            println!("  {} {}", "api_token:".bold(), token_display);

            let unset = || "(not set)".dimmed().to_string();
            println!(
                "  {} {}",
                "email:".bold(),
                config.email.clone().unwrap_or_else(unset)
            );
            println!(
                "  {} {}",
                "zone:".bold(),
                config.zone.clone().unwrap_or_else(unset)
            );
            println!(
                "  {} {}",
                "output_format:".bold(),
                config.output_format.unwrap_or_default()
            );
            println!("  {} {}", "staging:".bold(), config.staging);
        }
    }

    Ok(())
}

async fn set_config(_ctx: Context, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "provider" => {
            config.provider = Some(value.parse()?);
            println!(
                "{} Provider set to {}.",
                "Success:".green().bold(),
                value.cyan()
            );
        }
        "api_token" | "token" => {
            config.api_token = Some(value.to_string());
            println!("{} API token set.", "Success:".green().bold());
        }
        "email" => {
            config.email = Some(value.to_string());
            println!("{} Email set.", "Success:".green().bold());
        }
        "zone" => {
            config.zone = Some(value.to_string());
            println!(
                "{} Zone set to {}.",
                "Success:".green().bold(),
                value.cyan()
            );
        }
        "output_format" | "output" => {
            config.output_format = Some(value.parse()?);
            println!(
                "{} Output format set to {}.",
                "Success:".green().bold(),
                value.cyan()
            );
        }
        "staging" => {
            config.staging = value.parse()?;
            println!("{} staging set to {}.", "Success:".green().bold(), value);
        }
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 provider       - DNS provider (cloudflare/gandi)\n  \
                 api_token      - Provider API token\n  \
                 email          - Account email (Cloudflare only)\n  \
                 zone           - Zone the validation records live in\n  \
                 output_format  - Default output format (pretty/json)\n  \
                 staging        - Issue against the CA staging environment (true/false)",
                key
            );
        }
    }

    config.save()?;

    Ok(())
}

async fn show_path(_ctx: Context) -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}
