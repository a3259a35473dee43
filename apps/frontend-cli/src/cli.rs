//! Command line flags.

use clap::Parser;

use crate::infrastructure::feed::ConnectionMode;

/// Live order feed viewer.
#[derive(Debug, Parser)]
#[command(name = "frontend-cli", about = "Live order feed viewer", version)]
pub struct Cli {
    /// Feed to join; prompted for when omitted.
    #[arg(short, long, value_enum)]
    pub mode: Option<ConnectionMode>,

    /// Channel name sent as the `channel` query parameter.
    #[arg(short, long)]
    pub channel: Option<String>,
}
