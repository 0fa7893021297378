//! Command dispatch and handlers.

pub mod fetch;
pub mod lookup;
pub mod resolve;
pub mod serve;
pub mod view;

use std::env;
use std::path::PathBuf;

use tracing::info;

use crate::cassette::session::RecordingSession;
use crate::cli::{Command, ConfigArgs};
use crate::config::Config;
use crate::context::ServiceContext;

/// Environment variable naming a directory to record port interactions into.
pub const RECORD_VAR: &str = "LATEST_CAPTURE_RECORD";

/// Dispatch a parsed command to its handler.
///
/// When `LATEST_CAPTURE_RECORD` is set to a directory path, all port
/// interactions are recorded to per-port cassette files in a timestamped
/// directory below it.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let (ctx, session) = if let Ok(path) = env::var(RECORD_VAR) {
        let (ctx, session) = ServiceContext::recording_at(&PathBuf::from(path))?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    // Consumes the context so every recorder reference is released here.
    let result = dispatch_with_context(command, ctx);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(command: &Command, ctx: ServiceContext) -> Result<(), String> {
    match command {
        Command::Resolve { config } => resolve::run_with_context(&ctx, &load_config(config)?),
        Command::Lookup { config } => lookup::run_with_context(&ctx, &load_config(config)?),
        Command::View { config } => view::run_with_context(&ctx, &load_config(config)?),
        Command::Serve { config } => serve::run(ctx, &load_config(config)?),
        Command::Fetch { api, output, interval } => {
            fetch::run_with_context(&ctx, api, output, *interval)
        }
    }
}

/// Environment configuration with the command's flags applied on top.
fn load_config(args: &ConfigArgs) -> Result<Config, String> {
    Config::from_env().map(|config| config.with_overrides(args)).map_err(|e| e.to_string())
}

/// Build the single-threaded runtime used by the async commands.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))
}

/// Finish a recording session and report the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    info!(dir = %output_dir.display(), "Recording saved");
    Ok(())
}
