//! Replaying adapter for the `FileSystem` port.

use std::io;
use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_io_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn is_dir(&self, _path: &Path) -> io::Result<bool> {
        replay_io_result(&next_output(&self.replayer, "fs", "is_dir"), "fs::is_dir")
    }

    fn is_file(&self, _path: &Path) -> io::Result<bool> {
        replay_io_result(&next_output(&self.replayer, "fs", "is_file"), "fs::is_file")
    }

    fn list_dir(&self, _path: &Path) -> io::Result<Vec<String>> {
        replay_io_result(&next_output(&self.replayer, "fs", "list_dir"), "fs::list_dir")
    }

    fn write(&self, _path: &Path, _contents: &[u8]) -> io::Result<()> {
        replay_io_result(&next_output(&self.replayer, "fs", "write"), "fs::write")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn make_replayer(interactions: Vec<Interaction>) -> CassetteReplayer {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        CassetteReplayer::new(&cassette)
    }

    fn fs_call(seq: u64, method: &str, output: serde_json::Value) -> Interaction {
        Interaction {
            seq,
            port: "fs".into(),
            method: method.into(),
            input: json!({"path": "/srv/himawari"}),
            output,
        }
    }

    #[test]
    fn replaying_list_dir() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![fs_call(
            0,
            "list_dir",
            json!({"ok": ["20240101", "20240102"]}),
        )]));
        let entries = fs.list_dir(Path::new("/srv/himawari")).unwrap();
        assert_eq!(entries, vec!["20240101", "20240102"]);
    }

    #[test]
    fn replaying_list_dir_keeps_error_kind() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![
            fs_call(0, "list_dir", json!({"err": "gone", "kind": "not_found"})),
            fs_call(1, "list_dir", json!({"err": "denied", "kind": "permission_denied"})),
        ]));
        let first = fs.list_dir(Path::new("/a")).unwrap_err();
        assert_eq!(first.kind(), io::ErrorKind::NotFound);
        let second = fs.list_dir(Path::new("/b")).unwrap_err();
        assert_eq!(second.kind(), io::ErrorKind::PermissionDenied);
        assert!(second.to_string().contains("denied"));
    }

    #[test]
    fn replaying_is_dir_and_is_file() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![
            fs_call(0, "is_dir", json!({"ok": true})),
            fs_call(1, "is_file", json!({"ok": false})),
            fs_call(2, "is_dir", json!({"err": "denied", "kind": "permission_denied"})),
        ]));
        assert!(fs.is_dir(Path::new("/srv/himawari")).unwrap());
        assert!(!fs.is_file(Path::new("/srv/himawari")).unwrap());
        let err = fs.is_dir(Path::new("/srv/himawari/20240101")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
