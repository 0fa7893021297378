//! `latest-capture lookup` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::lookup::LookupEndpoint;

/// Execute the `lookup` command.
///
/// Prints the lookup record as pretty JSON. When no capture exists the record
/// is still printed, and the command then fails so scripts see the absence in
/// the exit status.
///
/// # Errors
///
/// Returns an error string if the tree cannot be listed or no capture exists.
pub fn run_with_context(ctx: &ServiceContext, config: &Config) -> Result<(), String> {
    let endpoint = LookupEndpoint::new(&config.root, &config.base_url);
    let record = endpoint.lookup(ctx).map_err(|e| e.to_string())?;
    let json = record.to_pretty_json().map_err(|e| format!("Failed to encode record: {e}"))?;
    println!("{json}");

    if record.success {
        Ok(())
    } else {
        Err(format!("No image found under {}", config.root.display()))
    }
}
