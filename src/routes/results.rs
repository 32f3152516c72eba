use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::dto::quiz_dto::LimitQuery;
use crate::error::Result;
use crate::AppState;

/// Most recent quiz results, newest first.
#[axum::debug_handler]
pub async fn list_results(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse> {
    query.validate()?;
    let results = state.history.recent(query.limit).await;
    Ok(Json(json!({ "items": results })))
}

/// One result with its answers split into wrong and correct.
#[axum::debug_handler]
pub async fn get_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.history.detail(id).await?))
}
