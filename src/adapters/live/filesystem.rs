//! Live filesystem adapter using `std::fs`.

use std::fs::Metadata;
use std::io;
use std::path::Path;

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(metadata_if_present(path)?.as_ref().is_some_and(Metadata::is_dir))
    }

    fn is_file(&self, path: &Path) -> io::Result<bool> {
        Ok(metadata_if_present(path)?.as_ref().is_some_and(Metadata::is_file))
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        // Stable order keeps recorded cassettes diffable.
        entries.sort();
        Ok(entries)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    }
}

fn metadata_if_present(path: &Path) -> io::Result<Option<Metadata>> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
