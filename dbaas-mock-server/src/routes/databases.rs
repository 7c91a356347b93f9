//! The databases collection endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::{AppState, DbRecord, NamedRefDoc, RefDoc};

const WORKLOADS: &[&str] = &["small", "medium", "large"];

#[derive(Debug, Deserialize)]
pub(crate) struct CreateDb {
    name: String,
    description: String,
    workload: String,
    tech_contact: RefDoc,
    region: RefDoc,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateDb {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReconfigureDb {
    case: CaseIn,
    workload: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CaseIn {
    subject: String,
    description: String,
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "Database not found."})),
    )
        .into_response()
}

fn logic_error(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"message": message})),
    )
        .into_response()
}

pub(crate) async fn list(State(state): State<AppState>) -> Json<Vec<Value>> {
    let store = state.store();
    Json(store.dbs.values().map(DbRecord::summary).collect())
}

pub(crate) async fn create(State(state): State<AppState>, Json(input): Json<CreateDb>) -> Response {
    if !WORKLOADS.contains(&input.workload.as_str()) {
        return logic_error("Unsupported workload type.");
    }
    let Some(region) = AppState::regions().into_iter().find(|r| r.id == input.region.id) else {
        return logic_error("Region not found.");
    };

    let record = DbRecord {
        id: state.next_id(),
        name: input.name,
        description: input.description,
        workload: input.workload,
        tech_contact: input.tech_contact,
        region: NamedRefDoc {
            id: region.id,
            name: region.name,
        },
        status: "reviewing".to_string(),
        case: None,
        events: None,
        access: None,
    };

    let summary = record.summary();
    state.store().dbs.insert(record.id.clone(), record);
    (StatusCode::CREATED, Json(summary)).into_response()
}

pub(crate) async fn retrieve(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store().dbs.get(&id) {
        Some(record) => Json(record.detail()).into_response(),
        None => not_found(),
    }
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateDb>,
) -> Response {
    let mut store = state.store();
    match store.dbs.get_mut(&id) {
        Some(record) => {
            if let Some(name) = input.name {
                record.name = name;
            }
            if let Some(description) = input.description {
                record.description = description;
            }
            Json(record.detail()).into_response()
        }
        None => not_found(),
    }
}

pub(crate) async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store().dbs.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

pub(crate) async fn reconfigure(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ReconfigureDb>,
) -> Response {
    if input.case.subject.is_empty() || input.case.description.is_empty() {
        return logic_error("Case subject and description are required.");
    }
    if let Some(workload) = &input.workload {
        if !WORKLOADS.contains(&workload.as_str()) {
            return logic_error("Unsupported workload type.");
        }
    }

    let mut store = state.store();
    let store = &mut *store;
    match store.dbs.get_mut(&id) {
        Some(record) => {
            store.seq += 1;
            record.status = "reconfiguring".to_string();
            record.case = Some(RefDoc {
                id: format!("CS-{:04}", store.seq),
            });
            if let Some(workload) = input.workload {
                record.workload = workload;
            }
            Json(record.detail()).into_response()
        }
        None => not_found(),
    }
}

pub(crate) async fn activate(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let mut store = state.store();
    match store.dbs.get_mut(&id) {
        Some(record) => {
            record.status = "active".to_string();
            record.case = None;
            record.access = Some(json!({
                "host": format!("{}.db.example.com", record.id.to_lowercase()),
                "port": 5432,
                "username": "admin",
            }));
            Json(record.detail()).into_response()
        }
        None => not_found(),
    }
}
