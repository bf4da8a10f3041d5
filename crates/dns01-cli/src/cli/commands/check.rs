//! `dns01 check` - poll public resolvers until they all serve the record.

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use dns01::{ConsistencyChecker, Dns01Challenge, ResolverSet};

use super::Context;
use crate::cli::args::CheckArgs;
use crate::output::{create_spinner, OutputFormat};

pub async fn execute(ctx: Context, args: CheckArgs) -> Result<()> {
    let name = Dns01Challenge::validation_name_for(&args.domain);
    let resolvers = ResolverSet::default_public();

    if ctx.output_format == OutputFormat::Pretty {
        println!(
            "{} {} across {} public resolvers",
            "Checking:".bold(),
            name.cyan(),
            resolvers.len()
        );
        println!();
    }

    let mut checker = ConsistencyChecker::from_resolvers(&resolvers)
        .interquery_delay(Duration::from_secs(args.delay));
    if let Some(rounds) = args.max_rounds {
        checker = checker.max_rounds(rounds);
    }

    let spinner = (ctx.output_format == OutputFormat::Pretty)
        .then(|| create_spinner("Waiting for every resolver to serve the record..."));

    let confirmation = checker.check(&name, &args.content).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let confirmation = confirmation?;

    match ctx.output_format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "name": name,
                "content": args.content,
                "resolvers": resolvers.len(),
                "rounds": confirmation.rounds,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Pretty => {
            let rounds = confirmation.rounds;
            let plural = if rounds == 1 { "round" } else { "rounds" };
            println!(
                "{} every resolver serves the record ({rounds} {plural}).",
                "Confirmed:".green().bold()
            );
        }
    }

    Ok(())
}
