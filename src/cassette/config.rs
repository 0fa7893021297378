//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::replayer::CassetteReplayer;

/// Per-port cassette file paths.
///
/// Ports without a cassette path panic if called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the clock port cassette file.
    pub clock: Option<PathBuf>,
    /// Path to the filesystem port cassette file.
    pub fs: Option<PathBuf>,
    /// Path to the HTTP port cassette file.
    pub http: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the clock port.
    pub clock: Option<CassetteReplayer>,
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
    /// Replayer for the HTTP port.
    pub http: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Returns a config where all port paths are `None`. Any port called
    /// during replay will panic because no cassette is loaded.
    #[must_use]
    pub fn panic_on_unspecified() -> Self {
        Self::default()
    }

    /// Points every port at `<dir>/<port>.cassette.yaml`, the layout written
    /// by a [`RecordingSession`](super::session::RecordingSession). Files that
    /// do not exist leave their port unconfigured.
    #[must_use]
    pub fn from_session_dir(dir: &Path) -> Self {
        let existing = |port: &str| {
            let path = dir.join(format!("{port}.cassette.yaml"));
            path.is_file().then_some(path)
        };
        Self { clock: existing("clock"), fs: existing("fs"), http: existing("http") }
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        let load = |path: &Option<PathBuf>| path.as_deref().map(CassetteReplayer::from_path).transpose();
        Ok(PortReplayers { clock: load(&self.clock)?, fs: load(&self.fs)?, http: load(&self.http)? })
    }
}
