use crate::dtos::health::{HealthResponse, STATUS_OK, STORE_CONNECTED, UNKNOWN_HOSTNAME};
use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;
use std::ffi::OsString;
use std::io;

/// Always 200. Store connectivity is reported in the body, never through the status code.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mongodb = match state.store.ping().await {
        Ok(()) => STORE_CONNECTED.to_string(),
        Err(e) => {
            let message = probe_failure_message(e);
            tracing::warn!(error = %message, "Store health probe failed");
            message
        }
    };

    Json(HealthResponse {
        status: STATUS_OK.to_string(),
        service: state.config.app_name.clone(),
        hostname: local_hostname(),
        mongodb,
    })
}

/// 503 while the store is unreachable, for orchestrators that gate traffic.
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match state.store.ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

fn local_hostname() -> String {
    hostname_or_unknown(hostname::get())
}

fn hostname_or_unknown(lookup: io::Result<OsString>) -> String {
    lookup
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_HOSTNAME.to_string())
}

// The driver's own message, without the "Database error:" prefix AppError adds.
fn probe_failure_message(err: AppError) -> String {
    match err {
        AppError::DatabaseError(inner) => inner.to_string(),
        other => other.to_string(),
    }
}
