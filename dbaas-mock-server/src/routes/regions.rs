//! The regions collection endpoint.

use axum::Json;

use crate::state::{AppState, NamedRefDoc};

pub(crate) async fn list() -> Json<Vec<NamedRefDoc>> {
    Json(AppState::regions())
}
