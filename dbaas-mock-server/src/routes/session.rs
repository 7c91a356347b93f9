//! Session endpoint: sets a cookie so tests can observe credential modes.

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

pub(crate) async fn open() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(SET_COOKIE, "sid=mock-session; Path=/; HttpOnly")],
        Json(json!({"ok": true})),
    )
}
