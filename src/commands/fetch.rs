//! `latest-capture fetch` command.

use std::path::Path;
use std::time::Duration;

use crate::context::ServiceContext;
use crate::fetch;
use crate::server;

/// Execute the `fetch` command.
///
/// Without an interval, fetches once and fails if that fetch fails. With one,
/// keeps fetching until Ctrl-C, then returns normally so a recording session
/// can still be written.
///
/// # Errors
///
/// Returns an error string if the runtime cannot start or the single fetch
/// fails.
pub fn run_with_context(
    ctx: &ServiceContext,
    api: &str,
    output: &Path,
    interval: Option<u64>,
) -> Result<(), String> {
    let runtime = super::runtime()?;
    match interval {
        Some(secs) => {
            let interval = Duration::from_secs(secs);
            runtime.block_on(fetch::watch(ctx, api, output, interval, server::shutdown_signal()));
            Ok(())
        }
        None => runtime
            .block_on(fetch::fetch_latest(ctx, api, output))
            .map(|fetched| println!("{}", fetched.path.display()))
            .map_err(|e| e.to_string()),
    }
}
