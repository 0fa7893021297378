//! Lookup endpoint: the machine-readable view of the latest capture.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::context::ServiceContext;
use crate::error::ResolveError;
use crate::resolver::{self, Resolution};

/// Message carried by a record when no capture was found.
pub const NOT_FOUND_MESSAGE: &str = "Latest image not found in the expected directory structure.";

/// JSON record describing the latest capture.
///
/// Field order is part of the output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    /// Whether a capture was found.
    pub success: bool,
    /// Request time, seconds since the Unix epoch.
    pub timestamp: i64,
    /// Absolute URL of the capture, empty when not found.
    pub latest_url: String,
    /// File name of the capture, `null` when not found.
    pub filename: Option<String>,
    /// Human-readable explanation, present only when not found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LookupRecord {
    /// Builds the record for a resolution taken at `timestamp`.
    #[must_use]
    pub fn from_resolution(resolution: &Resolution, base_url: &str, timestamp: i64) -> Self {
        match resolution {
            Resolution::Found(artifact) => Self {
                success: true,
                timestamp,
                latest_url: format!("{base_url}{}", artifact.url_path()),
                filename: Some(artifact.file_name.clone()),
                message: None,
            },
            Resolution::NotFound => Self {
                success: false,
                timestamp,
                latest_url: String::new(),
                filename: None,
                message: Some(NOT_FOUND_MESSAGE.to_string()),
            },
        }
    }

    /// Renders the record as JSON indented by four spaces.
    ///
    /// `serde_json` never escapes `/`, so URLs come out verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // The serializer only ever emits UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Resolves the latest capture and describes it as a [`LookupRecord`].
#[derive(Debug, Clone)]
pub struct LookupEndpoint {
    root: PathBuf,
    base_url: String,
}

impl LookupEndpoint {
    /// Creates an endpoint over `root`, publishing URLs under `base_url`.
    ///
    /// `base_url` is used verbatim and should end in `/`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self { root: root.into(), base_url: base_url.into() }
    }

    /// The directory this endpoint resolves against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the latest capture and builds its record.
    ///
    /// # Errors
    ///
    /// Returns an error if listing the capture tree fails.
    pub fn lookup(&self, ctx: &ServiceContext) -> Result<LookupRecord, ResolveError> {
        let timestamp = ctx.clock.now().timestamp();
        let resolution = resolver::resolve(ctx.fs.as_ref(), &self.root)?;
        Ok(LookupRecord::from_resolution(&resolution, &self.base_url, timestamp))
    }
}
