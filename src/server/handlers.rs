//! HTTP handlers for record operations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use bigdecimal::BigDecimal;
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{RecordsError, RecordsResult};
use crate::core::query::{QueryResult, RecordQueryParams};
use crate::core::record::Record;
use crate::core::store::RecordStore;
use crate::core::validation::{RawFormInput, RecordValidator};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub validator: Arc<RecordValidator>,
}

/// Response for the list records endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecordsResponse {
    #[serde(flatten)]
    pub result: QueryResult,
    pub count: usize,
    pub balance_due: BigDecimal,
}

impl From<QueryResult> for ListRecordsResponse {
    fn from(result: QueryResult) -> Self {
        Self {
            count: result.count(),
            balance_due: result.balance_due(),
            result,
        }
    }
}

/// Validate a submitted form and store it
///
/// POST /api/records
pub async fn create_record(
    State(state): State<AppState>,
    Json(input): Json<RawFormInput>,
) -> RecordsResult<(StatusCode, Json<Record>)> {
    let details = state.validator.validate(input)?;
    let id = state.store.insert(details)?;
    let record = state
        .store
        .get(&id)?
        .ok_or(RecordsError::NotFound { id })?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Filtered view with totals
///
/// GET /api/records?from=&to=&search=
pub async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<RecordQueryParams>,
) -> RecordsResult<Json<ListRecordsResponse>> {
    let range = params.date_range(Utc::now())?;
    let result = state.store.query(&range, params.search_term())?;
    Ok(Json(result.into()))
}

/// GET /api/records/{id}
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> RecordsResult<Json<Record>> {
    state
        .store
        .get(&id)?
        .map(Json)
        .ok_or(RecordsError::NotFound { id })
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "optica-records"
    }))
}
