//! HTTP server exposing the lookup endpoint, the viewer page and the images.
//!
//! Routes:
//!
//! | Path                     | Response                                  |
//! |--------------------------|-------------------------------------------|
//! | `/`, `/index.html`       | viewer page                               |
//! | `/api`, `/api.php`       | lookup record (200, or 404 when absent)   |
//! | `/health`                | `OK`                                      |
//! | `/<root>/...`            | files under the capture root              |
//!
//! `<root>` is the configured root with leading `.` and `/` removed, which
//! is exactly the prefix both the viewer `src` and the lookup URL point at.

use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::context::ServiceContext;
use crate::lookup::LookupEndpoint;
use crate::viewer::ViewerPage;

#[derive(Clone)]
struct AppState {
    ctx: Arc<ServiceContext>,
    lookup: LookupEndpoint,
    viewer: ViewerPage,
}

/// Builds the application router.
pub fn router(ctx: Arc<ServiceContext>, config: &Config) -> Router {
    let state = AppState {
        ctx,
        lookup: LookupEndpoint::new(&config.root, &config.base_url),
        viewer: ViewerPage::new(&config.root, config.refresh_secs),
    };

    let app = Router::new()
        .route("/", get(viewer_handler))
        .route("/index.html", get(viewer_handler))
        .route("/api", get(lookup_handler))
        .route("/api.php", get(lookup_handler))
        .route("/health", get(|| async { "OK" }))
        .with_state(state);

    let files = ServeDir::new(&config.root);
    let mount = image_mount(&config.root);
    if mount.is_empty() {
        // Axum cannot nest at "/", so a root of "." is served as the fallback.
        app.fallback_service(files)
    } else {
        app.nest_service(&format!("/{mount}"), files)
    }
}

/// URL prefix under which the files of `root` are served.
#[must_use]
pub fn image_mount(root: &Path) -> String {
    root.to_string_lossy().trim_start_matches(['.', '/']).trim_end_matches('/').to_string()
}

/// Binds `config.bind` and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(ctx: ServiceContext, config: &Config) -> Result<(), String> {
    let app = router(Arc::new(ctx), config);

    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|e| format!("Failed to bind {}: {e}", config.bind))?;
    let addr = listener.local_addr().map_err(|e| format!("Failed to read local address: {e}"))?;

    info!(root = %config.root.display(), "Listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("HTTP server error: {e}"))
}

/// Resolves on Ctrl-C. If the signal cannot be watched it never resolves.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Unable to listen for Ctrl-C, serving until killed: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

async fn lookup_handler(State(state): State<AppState>) -> Response {
    let AppState { ctx, lookup, .. } = state;
    let record = match tokio::task::spawn_blocking(move || lookup.lookup(&ctx)).await {
        Ok(Ok(record)) => record,
        Ok(Err(e)) => return internal_error(&e),
        Err(e) => return internal_error(&e),
    };

    let status = if record.success {
        debug!(url = %record.latest_url, "lookup resolved");
        StatusCode::OK
    } else {
        debug!("lookup found no capture");
        StatusCode::NOT_FOUND
    };

    match record.to_pretty_json() {
        Ok(body) => {
            let headers =
                [(header::CONTENT_TYPE, "application/json"), (header::CACHE_CONTROL, "no-store")];
            (status, headers, body).into_response()
        }
        Err(e) => internal_error(&e),
    }
}

async fn viewer_handler(State(state): State<AppState>) -> Response {
    let AppState { ctx, viewer, .. } = state;
    match tokio::task::spawn_blocking(move || viewer.render(&ctx)).await {
        Ok(Ok(page)) => ([(header::CACHE_CONTROL, "no-store")], Html(page)).into_response(),
        Ok(Err(e)) => internal_error(&e),
        Err(e) => internal_error(&e),
    }
}

fn internal_error(err: &dyn Display) -> Response {
    error!("request failed: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
