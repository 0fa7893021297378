//! CLI argument definitions.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `latest-capture`.
#[derive(Debug, Parser)]
#[command(
    name = "latest-capture",
    version,
    about = "Find, publish and fetch the latest captured image"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for values otherwise taken from the environment.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Root directory holding the `YYYYMMDD` capture folders.
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// Public base URL prepended to artifact paths in lookup records.
    #[arg(long)]
    pub base_url: Option<String>,
    /// Address the HTTP server listens on.
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Viewer auto-refresh interval in seconds.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub refresh: Option<u64>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the latest capture found under the root directory.
    Resolve {
        /// Configuration overrides.
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the lookup record (JSON) for the latest capture.
    Lookup {
        /// Configuration overrides.
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the viewer page (HTML) for the latest capture.
    View {
        /// Configuration overrides.
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Serve the lookup endpoint, the viewer page and the captured images.
    Serve {
        /// Configuration overrides.
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Download the image a lookup endpoint reports as latest.
    Fetch {
        /// Lookup endpoint URL.
        #[arg(long)]
        api: String,
        /// File the downloaded image is written to.
        #[arg(long, default_value = "latest.jpg")]
        output: PathBuf,
        /// Repeat every N seconds until Ctrl-C instead of fetching once.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
    },
}
