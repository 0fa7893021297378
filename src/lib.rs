//! Core library entry for the `latest-capture` CLI.
//!
//! The heart of the crate is [`resolver`], which finds the newest capture in a
//! date-partitioned directory tree. [`lookup`] and [`viewer`] turn a resolution
//! into a JSON record or an HTML page, [`server`] exposes both over HTTP, and
//! [`fetch`] is the client side that downloads whatever a lookup endpoint
//! reports as latest.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod fetch;
pub mod lookup;
pub mod ports;
pub mod resolver;
pub mod server;
pub mod viewer;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_resolves_missing_root_without_error() {
        let result = run(["latest-capture", "resolve", "--root", "/nonexistent/latest-capture-root"]);
        assert!(result.is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["latest-capture", "unknown"]);
        assert!(result.is_err());
    }
}
