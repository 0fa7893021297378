//! Client side: download whatever a lookup endpoint reports as the latest
//! capture.
//!
//! The endpoint is not required to be this crate's own server. Its body may be
//! a JSON object (the URL under `latest_url`, `url`, `image` or `latest`, first
//! non-empty string wins), a bare JSON string, or plain text holding the URL.
//!
//! Only string values count as URLs. A number, boolean, array or object under
//! one of the keys is skipped and the next key is tried, so a malformed field
//! never becomes a request to a nonsense address.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use tracing::{error, info};

use crate::context::ServiceContext;
use crate::error::FetchError;
use crate::ports::{HttpRequest, HttpResponse};

/// Timeout for the lookup request.
pub const LOOKUP_TIMEOUT_SECS: u64 = 10;
/// Timeout for the image download.
pub const IMAGE_TIMEOUT_SECS: u64 = 20;

const URL_KEYS: [&str; 4] = ["latest_url", "url", "image", "latest"];

/// A successfully downloaded capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    /// URL the image was downloaded from.
    pub url: String,
    /// File the image was written to.
    pub path: PathBuf,
    /// Number of bytes written.
    pub bytes: usize,
}

/// Pulls the image URL out of a lookup response body.
#[must_use]
pub fn extract_image_url(body: &str) -> Option<String> {
    let non_empty = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            URL_KEYS.iter().find_map(|key| map.get(*key).and_then(Value::as_str).and_then(non_empty))
        }
        Ok(Value::String(url)) => non_empty(&url),
        Ok(_) => None,
        Err(_) => non_empty(body),
    }
}

/// Asks `api_url` for the latest capture and writes it to `output`.
///
/// # Errors
///
/// Returns an error if either request fails or answers with a non-2xx
/// status, if the lookup names no image, or if the file cannot be written.
pub async fn fetch_latest(
    ctx: &ServiceContext,
    api_url: &str,
    output: &Path,
) -> Result<FetchedImage, FetchError> {
    info!(api = api_url, "Requesting latest image URL");
    let lookup = get_success(ctx, api_url, LOOKUP_TIMEOUT_SECS).await?;
    let url = extract_image_url(&lookup.text())
        .ok_or_else(|| FetchError::NoImageUrl(api_url.to_string()))?;

    info!(url = %url, "Downloading latest image");
    let image = get_success(ctx, &url, IMAGE_TIMEOUT_SECS).await?;
    ctx.fs
        .write(output, &image.body)
        .map_err(|source| FetchError::Write { path: output.to_path_buf(), source })?;

    info!(path = %output.display(), bytes = image.body.len(), "Image saved");
    Ok(FetchedImage { url, path: output.to_path_buf(), bytes: image.body.len() })
}

/// Runs one fetch, logging instead of returning the failure.
///
/// Returns `true` if an image was saved.
pub async fn fetch_round(ctx: &ServiceContext, api_url: &str, output: &Path) -> bool {
    match fetch_latest(ctx, api_url, output).await {
        Ok(_) => true,
        Err(e) => {
            error!("Fetch failed: {e}");
            false
        }
    }
}

/// Fetches every `interval` until `stop` resolves.
///
/// Failed rounds do not stop the loop. `stop` is checked before each round and
/// raced against both the round in flight and the sleep, so the loop returns
/// promptly once it fires.
pub async fn watch<S>(
    ctx: &ServiceContext,
    api_url: &str,
    output: &Path,
    interval: Duration,
    stop: S,
) where
    S: Future<Output = ()>,
{
    tokio::pin!(stop);
    loop {
        tokio::select! {
            biased;
            () = &mut stop => break,
            _ = fetch_round(ctx, api_url, output) => {}
        }
        info!(secs = interval.as_secs(), "Sleeping until next fetch");
        tokio::select! {
            biased;
            () = &mut stop => break,
            () = tokio::time::sleep(interval) => {}
        }
    }
    info!("Fetch loop stopped");
}

async fn get_success(
    ctx: &ServiceContext,
    url: &str,
    timeout_secs: u64,
) -> Result<HttpResponse, FetchError> {
    let request = HttpRequest { url: url.to_string(), timeout_secs };
    let response = ctx
        .http
        .get(&request)
        .await
        .map_err(|source| FetchError::Request { url: url.to_string(), source })?;
    if !response.is_success() {
        return Err(FetchError::Status { url: url.to_string(), status: response.status });
    }
    Ok(response)
}
