//! `dns01 respond` - publish a validation record and wait for it to settle.

use std::time::{Duration, Instant};

use anyhow::Result;
use colored::Colorize;
use dns01::{ConsistencyChecker, Dns01Challenge, RecordResponder, Responder, WaitingResponder};

use super::Context;
use crate::cli::args::RespondArgs;
use crate::output::{create_spinner, OutputFormat};

pub async fn execute(ctx: Context, args: RespondArgs) -> Result<()> {
    // The ACME token itself never reaches DNS; only the derived content does
    let challenge = Dns01Challenge::new(&args.domain, "", &args.content);
    let name = challenge.validation_domain_name();
    let wait = !args.no_wait;

    if ctx.output_format == OutputFormat::Pretty {
        println!("{} {}", "Publishing:".bold(), name.cyan());
        println!("  {} {:?}", "content:".bold(), args.content);
        println!("  {} {}s, settle {}s", "ttl:".bold(), args.ttl, args.settle);
        println!();
    }

    let publisher = ctx.publisher()?;
    let responder = RecordResponder::new(publisher)
        .ttl(args.ttl)
        .settle_delay(Duration::from_secs(args.settle));

    let responder: Box<dyn Responder> = if wait {
        let mut checker = ConsistencyChecker::default_public();
        if let Some(rounds) = args.max_rounds {
            checker = checker.max_rounds(rounds);
        }
        Box::new(WaitingResponder::new(responder, checker))
    } else {
        Box::new(responder)
    };

    let spinner = (ctx.output_format == OutputFormat::Pretty).then(|| {
        let message = if wait {
            "Publishing, settling, then polling public resolvers..."
        } else {
            "Publishing and settling..."
        };
        create_spinner(message)
    });

    let started = Instant::now();
    let outcome = responder.start_responding(&challenge).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    outcome?;

    match ctx.output_format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "name": name,
                "content": args.content,
                "ttl": args.ttl,
                "provider": ctx.provider.to_string(),
                "waited": wait,
                "elapsed_secs": started.elapsed().as_secs(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Pretty => {
            let outcome = if wait {
                "record visible on every resolver"
            } else {
                "record published and settled"
            };
            println!(
                "{} {} after {}s.",
                "Success:".green().bold(),
                outcome,
                started.elapsed().as_secs()
            );
        }
    }

    Ok(())
}
