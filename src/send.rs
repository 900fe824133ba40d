//! Code supporting the `send` sub command.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use tracing::info;

use crate::common::io::read_report;
use crate::conf::Top;
use crate::hl7::Encoder;
use crate::mllp::{send_messages, Client};

/// Command line arguments for `send` sub command.
#[derive(Parser, Debug)]
#[command(author, version, about = "Encode a report and send it via MLLP", long_about = None)]
pub struct Args {
    /// Path to the report JSON, may be gzip-compressed.
    #[arg(long, required = true)]
    pub path_input: String,
    /// Path to configuration file.
    #[arg(long)]
    pub path_conf: Option<PathBuf>,
    /// Host of the interface engine, overrides the configuration file.
    #[arg(long)]
    pub host: Option<String>,
    /// Port of the interface engine, overrides the configuration file.
    #[arg(long)]
    pub port: Option<u16>,
}

/// Build the transport client from configuration and command line overrides.
pub fn client(conf: &Top, host: Option<&str>, port: Option<u16>) -> Client {
    Client::new(
        host.unwrap_or(&conf.transport.host),
        port.unwrap_or(conf.transport.port),
        Duration::from_secs(conf.transport.timeout_secs),
    )
}

#[tokio::main]
async fn send(conf: &Top, client: &Client, encoder: &Encoder) -> Result<(), anyhow::Error> {
    let messages = encoder.encode()?;
    conf.archive(&encoder.context().sample_id, &messages.tumor, &messages.normal)?;
    send_messages(client, &messages.tumor, &messages.normal).await?;
    Ok(())
}

/// Main entry point for `send` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    info!("args_common = {:?}", &args_common);
    info!("args = {:?}", &args);

    let conf = Top::load(args.path_conf.as_deref())?;
    let client = client(&conf, args.host.as_deref(), args.port);

    info!("Loading report...");
    let report = read_report(&args.path_input)?;
    let encoder = Encoder::new(&report)?;

    info!("Sending to {}:{}...", &client.host, client.port);
    send(&conf, &client, &encoder)?;

    Ok(())
}
