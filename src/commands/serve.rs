//! `latest-capture serve` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::server;

/// Execute the `serve` command, blocking until the server shuts down.
///
/// # Errors
///
/// Returns an error string if the runtime cannot start, the address cannot be
/// bound, or the server fails.
pub fn run(ctx: ServiceContext, config: &Config) -> Result<(), String> {
    super::runtime()?.block_on(server::serve(ctx, config))
}
