//! `dns01 retract` - delete a validation record.
//!
//! Responding never deletes records; repeated validations overwrite the
//! same name and the record otherwise just ages out. This command is the
//! explicit cleanup for zones that should not keep stale challenge values.

use anyhow::Result;
use colored::Colorize;
use dns01::{Dns01Challenge, RecordHandle};

use super::Context;
use crate::cli::args::RetractArgs;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: RetractArgs) -> Result<()> {
    let name = Dns01Challenge::validation_name_for(&args.domain);
    let publisher = ctx.publisher()?;
    let handle = RecordHandle::by_name(ctx.require_zone()?, name.as_str());

    publisher.remove(&handle).await?;

    match ctx.output_format {
        OutputFormat::Json => {
            let report = serde_json::json!({ "name": name, "removed": true });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Pretty => {
            println!(
                "{} {} removed (or already absent).",
                "Success:".green().bold(),
                name.cyan()
            );
        }
    }

    Ok(())
}
