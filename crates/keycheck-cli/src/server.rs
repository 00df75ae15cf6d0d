//! HTTP boundary: one POST endpoint that validates a batch of keys.

use std::future::Future;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::{Router, middleware};
use keycheck_validator::{BatchRequest, BatchValidator};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

const ALLOWED_METHODS: &str = "POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";
const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

#[derive(Clone)]
struct AppState {
    batch: BatchValidator,
}

/// Routes: `POST`/`OPTIONS` on `/` and `/validate`, `GET /health`. Every
/// response, including the 404 fallback, carries the CORS headers.
pub fn router(batch: BatchValidator) -> Router {
    Router::new()
        .route("/", post(validate_keys).options(preflight))
        .route("/validate", post(validate_keys).options(preflight))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(middleware::map_response(with_cors_headers))
        .with_state(AppState { batch })
}

/// Serve until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    batch: BatchValidator,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }
    axum::serve(listener, router(batch))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn validate_keys(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match BatchRequest::parse(&body) {
        Ok(request) => request,
        Err(err) => {
            debug!(error = %err, "rejecting batch payload");
            return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
        }
    };
    info!(count = request.keys.len(), hint = ?request.provider, "validating keys");

    // The batch reduces every per-key failure to `false`; anything that
    // still escapes becomes a bare 500.
    let batch = state.batch.clone();
    match tokio::spawn(async move { batch.run(request).await }).await {
        Ok(results) => Json(results).into_response(),
        Err(err) => {
            error!(error = %err, "batch validation aborted");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
        }
    }
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

async fn with_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    response
}
