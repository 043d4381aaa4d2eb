use axum::http::StatusCode;

/// Handler for `GET /healthz` — process liveness.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` — readiness to take traffic.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
