use axum::{http::StatusCode, response::IntoResponse};

#[axum::debug_handler]
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, "backend is running")
}
