//! Code supporting the `encode` sub command.

use std::io::Write;

use clap::Parser;
use tracing::info;

use crate::common::io::{open_write_maybe_gz, read_report};
use crate::hl7::Encoder;

/// Command line arguments for `encode` sub command.
#[derive(Parser, Debug)]
#[command(author, version, about = "Encode a report JSON into HL7 messages", long_about = None)]
pub struct Args {
    /// Path to the report JSON, may be gzip-compressed.
    #[arg(long, required = true)]
    pub path_input: String,
    /// Path to write the tumor message to.
    #[arg(long, required = true)]
    pub path_output_tumor: String,
    /// Path to write the normal message to; only written if there is one.
    #[arg(long)]
    pub path_output_normal: Option<String>,
}

fn write_body(path: &str, body: &str) -> Result<(), anyhow::Error> {
    let mut writer = open_write_maybe_gz(path)?;
    writer.write_all(body.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Main entry point for `encode` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    info!("args_common = {:?}", &args_common);
    info!("args = {:?}", &args);

    info!("Loading report...");
    let report = read_report(&args.path_input)?;
    info!("Encoding...");
    let messages = Encoder::new(&report)?.encode()?;

    write_body(&args.path_output_tumor, &messages.tumor)?;
    info!("Wrote tumor message to {}", &args.path_output_tumor);
    match (&args.path_output_normal, messages.normal.is_empty()) {
        (Some(path), false) => {
            write_body(path, &messages.normal)?;
            info!("Wrote normal message to {}", path);
        }
        (None, false) => {
            tracing::warn!("normal message produced but no --path-output-normal given");
        }
        (_, true) => info!("No normal message for this report"),
    }

    Ok(())
}
