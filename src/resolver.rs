//! Latest-capture resolution.
//!
//! The capture process writes images into a tree laid out as
//!
//! ```text
//! <root>/
//!   ├── 20240101/
//!   │     └── 1699999999.jpg
//!   └── 20240102/
//!         ├── 1700000000.jpg
//!         └── 1700000100.jpg
//! ```
//!
//! and names everything so that plain string order is chronological order.
//! Resolution therefore needs nothing but two directory listings: the
//! greatest `YYYYMMDD` directory under the root, then the greatest `.jpg`
//! file inside it. Timestamps, sizes and contents are never looked at.
//!
//! Only the newest date folder is ever inspected. If it holds no `.jpg`
//! yet (for example right after midnight, before the first capture of the
//! day), the result is [`Resolution::NotFound`]; older folders are not
//! consulted.

use std::io;
use std::path::Path;

use serde::Serialize;

use crate::error::ResolveError;
use crate::ports::FileSystem;

/// Extension a capture file must carry, compared case-sensitively.
pub const ARTIFACT_EXTENSION: &str = "jpg";

/// The newest capture found under a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedArtifact {
    /// Name of the selected `YYYYMMDD` folder.
    pub date_folder: String,
    /// Name of the selected file inside it.
    pub file_name: String,
    /// `<root>/<date_folder>/<file_name>`, with the root as given.
    pub relative_path: String,
}

impl ResolvedArtifact {
    /// The relative path with leading `.` and `/` characters removed, ready to
    /// be appended to a base URL (`./himawari/x` becomes `himawari/x`).
    #[must_use]
    pub fn url_path(&self) -> &str {
        self.relative_path.trim_start_matches(['.', '/'])
    }
}

/// Outcome of a resolution that did not hit an I/O failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A capture was found.
    Found(ResolvedArtifact),
    /// The root is missing, holds no date folder, or its newest date folder
    /// holds no capture.
    NotFound,
}

impl Resolution {
    /// Returns the artifact when one was found.
    #[must_use]
    pub fn found(&self) -> Option<&ResolvedArtifact> {
        match self {
            Self::Found(artifact) => Some(artifact),
            Self::NotFound => None,
        }
    }
}

/// Finds the newest capture under `root`.
///
/// # Errors
///
/// Returns [`ResolveError::Io`] when listing a directory or checking the type
/// of a candidate entry fails for any reason other than the path not
/// existing. Absence is reported as [`Resolution::NotFound`].
pub fn resolve(fs: &dyn FileSystem, root: &Path) -> Result<Resolution, ResolveError> {
    if !inspect(root, fs.is_dir(root))? {
        return Ok(Resolution::NotFound);
    }

    let Some(mut folders) = list_if_present(fs, root)? else {
        return Ok(Resolution::NotFound);
    };
    sort_descending(&mut folders);
    let Some(date_folder) = first_match(folders, is_date_folder_name, |name| {
        let path = root.join(name);
        inspect(&path, fs.is_dir(&path))
    })?
    else {
        return Ok(Resolution::NotFound);
    };

    let folder_path = root.join(&date_folder);
    // The folder may vanish between the two listings; that is absence too.
    let Some(mut files) = list_if_present(fs, &folder_path)? else {
        return Ok(Resolution::NotFound);
    };
    sort_descending(&mut files);
    let Some(file_name) = first_match(files, has_artifact_extension, |name| {
        let path = folder_path.join(name);
        inspect(&path, fs.is_file(&path))
    })?
    else {
        return Ok(Resolution::NotFound);
    };

    let root_display = root.to_string_lossy();
    let relative_path = format!("{}/{date_folder}/{file_name}", root_display.trim_end_matches('/'));

    Ok(Resolution::Found(ResolvedArtifact { date_folder, file_name, relative_path }))
}

/// Returns `true` for names made of exactly eight ASCII digits.
#[must_use]
pub fn is_date_folder_name(name: &str) -> bool {
    name.len() == 8 && name.bytes().all(|b| b.is_ascii_digit())
}

/// Returns `true` when the text after the last `.` is exactly `jpg`.
///
/// `.JPG`, `.jpeg` and extension-less names are rejected.
#[must_use]
pub fn has_artifact_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| ext == ARTIFACT_EXTENSION)
}

fn list_if_present(fs: &dyn FileSystem, dir: &Path) -> Result<Option<Vec<String>>, ResolveError> {
    match fs.list_dir(dir) {
        Ok(entries) => Ok(Some(entries)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ResolveError::Io { path: dir.to_path_buf(), source }),
    }
}

/// Attaches `path` to a failed type check.
fn inspect(path: &Path, checked: io::Result<bool>) -> Result<bool, ResolveError> {
    checked.map_err(|source| ResolveError::Io { path: path.to_path_buf(), source })
}

/// First name (in the given order) that matches `pattern` and passes `check`.
///
/// `check` only runs for names matching the pattern, so unrelated entries
/// that cannot be inspected never fail a resolution.
fn first_match<P, C>(
    names: Vec<String>,
    pattern: P,
    mut check: C,
) -> Result<Option<String>, ResolveError>
where
    P: Fn(&str) -> bool,
    C: FnMut(&str) -> Result<bool, ResolveError>,
{
    for name in names {
        if pattern(&name) && check(&name)? {
            return Ok(Some(name));
        }
    }
    Ok(None)
}

/// Byte-wise descending, so the first match is the newest.
fn sort_descending(names: &mut [String]) {
    names.sort_unstable_by(|a, b| b.as_bytes().cmp(a.as_bytes()));
}
