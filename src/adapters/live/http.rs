//! Live adapter for the `HttpClient` port using `reqwest`.

use std::time::Duration;

use reqwest::Client;

use crate::ports::http::{HttpClient, HttpFuture, HttpRequest, HttpResponse};

/// Live HTTP client backed by a shared `reqwest` connection pool.
pub struct LiveHttpClient {
    client: Client,
}

impl LiveHttpClient {
    /// Creates a new live HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for LiveHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for LiveHttpClient {
    fn get(&self, request: &HttpRequest) -> HttpFuture<'_> {
        let url = request.url.clone();
        let timeout = Duration::from_secs(request.timeout_secs);

        Box::pin(async move {
            let response = self
                .client
                .get(&url)
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("GET {url} failed: {e}").into()
                })?;

            let status = response.status().as_u16();
            let body =
                response.bytes().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to read response body from {url}: {e}").into()
                })?;

            Ok(HttpResponse { status, body: body.to_vec() })
        })
    }
}
