//! Recording adapter for the `FileSystem` port.

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_io_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::FileSystem;

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput<'a> {
    path: &'a str,
}

#[derive(Serialize)]
struct WriteInput<'a> {
    path: &'a str,
    len: usize,
}

impl FileSystem for RecordingFileSystem {
    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        let result = self.inner.is_dir(path);
        let input = PathInput { path: &path.display().to_string() };
        record_io_result(&self.recorder, "fs", "is_dir", &input, &result);
        result
    }

    fn is_file(&self, path: &Path) -> io::Result<bool> {
        let result = self.inner.is_file(path);
        let input = PathInput { path: &path.display().to_string() };
        record_io_result(&self.recorder, "fs", "is_file", &input, &result);
        result
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let result = self.inner.list_dir(path);
        let input = PathInput { path: &path.display().to_string() };
        record_io_result(&self.recorder, "fs", "list_dir", &input, &result);
        result
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let result = self.inner.write(path, contents);
        // Image bytes are not worth keeping; the length is enough to compare runs.
        let input = WriteInput { path: &path.display().to_string(), len: contents.len() };
        record_io_result(&self.recorder, "fs", "write", &input, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;

    #[test]
    fn records_listing_and_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("20240101")).unwrap();
        let cassette_path = dir.path().join("fs.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test", "abc")));

        {
            let fs = RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder));
            assert!(fs.is_dir(&dir.path().join("20240101")).unwrap());
            let _ = fs.list_dir(dir.path()).unwrap();
            assert!(fs.list_dir(&dir.path().join("absent")).is_err());
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&cassette_path).unwrap();
        assert!(content.contains("is_dir"));
        assert!(content.contains("list_dir"));
        assert!(content.contains("20240101"));
        assert!(content.contains("not_found"));
    }
}
