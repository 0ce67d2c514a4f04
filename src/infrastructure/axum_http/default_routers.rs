use axum::{http::StatusCode, response::IntoResponse};

use crate::infrastructure::axum_http::error_responses::error_response;

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn not_found() -> impl IntoResponse {
    error_response(StatusCode::NOT_FOUND, "route not found")
}
