//! Replaying adapters that replay recorded interactions.

pub mod clock;
pub mod filesystem;
pub mod http;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use http::ReplayingHttpClient;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

/// Pull the next recorded output for `port::method`.
///
/// # Panics
///
/// Panics if the cassette has no further interaction for the pair.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output
}

/// Decode a plain (non-Result) recorded output.
///
/// # Panics
///
/// Panics if the output does not deserialize into `T`.
pub(crate) fn replay_value<T: DeserializeOwned>(output: serde_json::Value, context: &str) -> T {
    serde_json::from_value(output)
        .unwrap_or_else(|e| panic!("{context}: failed to deserialize recorded output: {e}"))
}

/// Decode a recorded `{"ok": v}` / `{"err": msg}` output.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}

/// Decode a recorded `io::Result`, restoring the error kind when present.
pub(crate) fn replay_io_result<T: DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> std::io::Result<T> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        let kind = output
            .get("kind")
            .and_then(serde_json::Value::as_str)
            .map_or(std::io::ErrorKind::Other, crate::cassette::format::io_kind_from_name);
        return Err(std::io::Error::new(kind, msg));
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone()).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{context}: failed to deserialize: {e}"),
        )
    })
}
