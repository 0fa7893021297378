//! HTTP client port used by the fetch client.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Boxed future type alias used by [`HttpClient`] to keep the trait dyn-compatible.
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// A GET request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL to fetch.
    pub url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

/// A fully buffered response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Performs HTTP GET requests.
pub trait HttpClient: Send + Sync {
    /// Fetches the given URL, buffering the whole body.
    ///
    /// A non-2xx status is not an error at this level.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, times out, or the body
    /// cannot be read.
    fn get(&self, request: &HttpRequest) -> HttpFuture<'_>;
}
