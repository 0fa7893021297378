//! `latest-capture view` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::viewer::ViewerPage;

/// Execute the `view` command: print the viewer page HTML to stdout.
///
/// # Errors
///
/// Returns an error string if the capture tree cannot be listed.
pub fn run_with_context(ctx: &ServiceContext, config: &Config) -> Result<(), String> {
    let page = ViewerPage::new(&config.root, config.refresh_secs);
    print!("{}", page.render(ctx).map_err(|e| e.to_string())?);
    Ok(())
}
