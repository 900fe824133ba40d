//! VarSeq report to HL7v2.3 encoder main executable

pub mod common;
pub mod conf;
pub mod encode;
pub mod err;
pub mod hl7;
pub mod mllp;
pub mod send;
pub mod server;

use std::process::{ExitCode, Termination};

use clap::{Parser, Subcommand};
use console::{Emoji, Term};

/// CLI parser based on clap.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "VarSeq report to HL7 encoder",
    long_about = "This tool converts VarSeq cancer report JSON into HL7v2.3 ORU^R01 messages \
                  and ships them to the interface engine"
)]
struct Cli {
    /// Commonly used arguments
    #[command(flatten)]
    common: common::Args,

    /// The sub command to run
    #[command(subcommand)]
    command: Commands,
}

/// Enum supporting the parsing of top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Encode a report into message files.
    Encode(encode::Args),
    /// Encode a report and send it via MLLP.
    Send(send::Args),
    /// Run the receiving server.
    Server(server::Args),
}

/// Print the outcome of a sub command and map it to the process exit code.
fn finish<W: std::io::Write>(
    out: &mut W,
    result: Result<(), anyhow::Error>,
) -> Result<ExitCode, anyhow::Error> {
    match result {
        Ok(()) => {
            writeln!(out, "All done. Have a nice day!{}", Emoji(" 😃", ""))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            writeln!(out, "Error: {:?}", error)?;
            Ok(match error.downcast::<err::EncodeError>() {
                Ok(encode_error) => encode_error.report(),
                Err(_) => ExitCode::FAILURE,
            })
        }
    }
}

fn main() -> Result<ExitCode, anyhow::Error> {
    let cli = Cli::parse();

    // Build a tracing subscriber according to the configuration in `cli.common`.
    let collector = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(common::tracing_level(&cli.common))
        .compact()
        .finish();

    // Install collector and go into sub commands.
    let mut term = Term::stderr();
    let result = tracing::subscriber::with_default(collector, || match &cli.command {
        Commands::Encode(args) => encode::run(&cli.common, args),
        Commands::Send(args) => send::run(&cli.common, args),
        Commands::Server(args) => server::run(&cli.common, args),
    });

    finish(&mut term, result)
}
