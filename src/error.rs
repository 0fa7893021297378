//! Error types shared across the crate.
//!
//! Absence of a capture is never an error; see [`crate::resolver::Resolution`].

use std::path::PathBuf;

use thiserror::Error;

/// Inspecting the capture tree failed for a reason other than a path being absent.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Listing or inspecting `path` failed (permission denied, I/O error, ...).
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path whose listing or type check failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Failures while downloading the latest image from a lookup endpoint.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or its body could not be read.
    #[error("request to {url} failed: {source}")]
    Request {
        /// Requested URL.
        url: String,
        /// Transport error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The lookup response carried no usable image URL.
    #[error("lookup response from {0} contains no image URL")]
    NoImageUrl(String),
    /// The downloaded image could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// An environment variable held a value that could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bind address is not a valid socket address.
    #[error("{var} is not a valid socket address: {value:?}")]
    InvalidBind {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
    /// The refresh interval is not a positive integer.
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidRefresh {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
    /// The base URL is empty.
    #[error("{0} must not be empty")]
    EmptyBaseUrl(&'static str),
}
