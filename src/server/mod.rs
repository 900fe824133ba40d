//! Code supporting the `server` sub command.

use std::path::PathBuf;

use actix_web::web::Data;
use clap::Parser;
use tracing::info;

use crate::{conf::Top, mllp::Client};

pub mod actix_server;

/// Shared state of the request handlers.
pub struct WebServerData {
    pub conf: Top,
    pub client: Client,
}

/// Command line arguments for `server` sub command.
#[derive(Parser, Debug)]
#[command(author, version, about = "Run the report receiving server", long_about = None)]
pub struct Args {
    /// Path to configuration file.
    #[arg(long)]
    pub path_conf: Option<PathBuf>,
    /// IP to listen on, overrides the configuration file.
    #[arg(long)]
    pub listen_host: Option<String>,
    /// Port to listen on, overrides the configuration file.
    #[arg(long)]
    pub listen_port: Option<u16>,
}

/// Main entry point for `server` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    info!("args_common = {:?}", &args_common);
    info!("args = {:?}", &args);

    let mut conf = Top::load(args.path_conf.as_deref())?;
    if let Some(listen_host) = &args.listen_host {
        conf.server.listen_host = listen_host.clone();
    }
    if let Some(listen_port) = args.listen_port {
        conf.server.listen_port = listen_port;
    }

    let client = crate::send::client(&conf, None, None);
    info!(
        "Forwarding to {}:{} (timeout {:?})",
        &client.host, client.port, client.timeout
    );
    let listen = (conf.server.listen_host.clone(), conf.server.listen_port);
    let data = Data::new(WebServerData { conf, client });

    info!(
        "Launching server {} on {}:{} ...",
        crate::common::encoder_version(),
        &listen.0,
        listen.1
    );
    actix_server::main(&listen.0, listen.1, data)?;

    info!("All done. Have a nice day!");
    Ok(())
}
