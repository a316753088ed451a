use clap::{Parser, Subcommand};
use verifier_core::Mode;

#[derive(Parser, Debug)]
#[command(
    name = "readiness-verifier",
    version,
    about = "Checks that the document-conversion service is up and converting"
)]
pub struct Cli {
    #[arg(long, conflicts_with = "full", help = "Print one JSON status line")]
    pub json: bool,
    #[arg(long, help = "Also convert a sample HTML page to PDF")]
    pub full: bool,
    #[arg(
        long,
        global = true,
        help = "Base URL of the conversion service, scheme and port included"
    )]
    pub endpoint: Option<String>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the status endpoint until healthy. Exits non-zero if the
    /// service never comes up, so setup scripts can stop before installing
    /// the service unit.
    Wait {
        #[arg(long, help = "Number of probes before giving up")]
        attempts: Option<u32>,
        #[arg(long, help = "Seconds to sleep between probes")]
        delay: Option<u64>,
    },
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.json {
            Mode::Json
        } else if self.full {
            Mode::Full
        } else {
            Mode::Basic
        }
    }
}
