//! Replaying adapter for the `HttpClient` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{HttpClient, HttpFuture, HttpRequest};

/// Serves recorded HTTP responses from a cassette.
pub struct ReplayingHttpClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingHttpClient {
    /// Create a replaying HTTP client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl HttpClient for ReplayingHttpClient {
    fn get(&self, _request: &HttpRequest) -> HttpFuture<'_> {
        let output = next_output(&self.replayer, "http", "get");
        Box::pin(async move { replay_result(&output, "http::get") })
    }
}
