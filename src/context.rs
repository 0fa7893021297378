//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::{LiveClock, LiveFileSystem, LiveHttpClient};
use crate::adapters::recording::{RecordingClock, RecordingFileSystem, RecordingHttpClient};
use crate::adapters::replaying::{ReplayingClock, ReplayingFileSystem, ReplayingHttpClient};
use crate::cassette::config::CassetteConfig;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::{Clock, FileSystem, HttpClient, HttpFuture, HttpRequest};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
/// The context is `Send + Sync`, so the server shares one behind an `Arc`.
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// Filesystem for directory discovery and file output.
    pub fs: Box<dyn FileSystem>,
    /// HTTP client for the fetch command.
    pub http: Box<dyn HttpClient>,
}

impl ServiceContext {
    /// Creates a live context backed by the system clock, disk and network.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            http: Box::new(LiveHttpClient::new()),
        }
    }

    /// Creates a live context whose port calls are recorded to per-port
    /// cassettes under `base`.
    ///
    /// The returned session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(base: &Path) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new_in(base)?;
        let ctx = Self {
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), session.clock.clone())),
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), session.fs.clone())),
            http: Box::new(RecordingHttpClient::new(
                Box::new(LiveHttpClient::new()),
                session.http.clone(),
            )),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Each port gets its own replayer over the same cassette so that
    /// per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        Ok(Self {
            clock: Box::new(ReplayingClock::new(CassetteReplayer::from_path(path)?)),
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::from_path(path)?)),
            http: Box::new(ReplayingHttpClient::new(CassetteReplayer::from_path(path)?)),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette file use a panicking adapter that
    /// fails with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(PanickingClock),
            },
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            http: match replayers.http {
                Some(r) => Box::new(ReplayingHttpClient::new(r)),
                None => Box::new(PanickingHttpClient),
            },
        })
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        panic!("Clock port not configured in CassetteConfig: no cassette loaded for clock");
    }
}

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn is_dir(&self, _path: &Path) -> std::io::Result<bool> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn is_file(&self, _path: &Path) -> std::io::Result<bool> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn list_dir(&self, _path: &Path) -> std::io::Result<Vec<String>> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn write(&self, _path: &Path, _contents: &[u8]) -> std::io::Result<()> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
}

struct PanickingHttpClient;
impl HttpClient for PanickingHttpClient {
    fn get(&self, _request: &HttpRequest) -> HttpFuture<'_> {
        panic!("HttpClient port not configured in CassetteConfig: no cassette loaded for http");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    }

    #[test]
    fn replaying_context_from_monolithic_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.cassette.yaml");

        write_cassette(
            &path,
            vec![
                Interaction {
                    seq: 0,
                    port: "clock".into(),
                    method: "now".into(),
                    input: json!(null),
                    output: json!("2024-06-15T10:30:00Z"),
                },
                Interaction {
                    seq: 1,
                    port: "fs".into(),
                    method: "is_dir".into(),
                    input: json!({"path": "./himawari"}),
                    output: json!({"ok": true}),
                },
            ],
        );

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        assert!(ctx.fs.is_dir(Path::new("./himawari")).unwrap());
    }

    #[test]
    fn recording_context_writes_session_cassettes() {
        let base = tempfile::tempdir().unwrap();
        let (ctx, session) = ServiceContext::recording_at(base.path()).unwrap();
        let _ = ctx.clock.now();
        drop(ctx);

        let dir = session.finish().unwrap();
        assert!(dir.join("clock.cassette.yaml").is_file());

        let replay = ServiceContext::replaying_from(&CassetteConfig::from_session_dir(&dir)).unwrap();
        assert!(replay.clock.now().timestamp() > 0);
    }

    #[test]
    #[should_panic(expected = "not configured in CassetteConfig")]
    fn unspecified_port_panics_with_clear_message() {
        let config = CassetteConfig::panic_on_unspecified();
        let ctx = ServiceContext::replaying_from(&config).unwrap();
        let _ = ctx.fs.is_dir(Path::new("/"));
    }
}
