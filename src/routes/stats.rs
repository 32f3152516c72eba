use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::dto::quiz_dto::LimitQuery;
use crate::error::{Error, Result};
use crate::AppState;

/// Most-missed words, weakest first.
#[axum::debug_handler]
pub async fn list_weak_words(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse> {
    query.validate()?;
    let limit = query.limit.unwrap_or(state.settings.weak_word_limit);
    let words = state.weak_words.select_weakest(limit).await;
    Ok(Json(json!({ "items": words })))
}

/// Start a practice session over the weakest words.
#[axum::debug_handler]
pub async fn start_weak_word_practice(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let weakest = state
        .weak_words
        .select_weakest(state.settings.practice_word_limit)
        .await;
    let ids = weakest.into_iter().map(|w| w.stats.word_id).collect();
    let session = state.sessions.start_practice(ids).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

#[axum::debug_handler]
pub async fn get_word_stats(
    State(state): State<AppState>,
    Path(word_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let stats = state
        .stats
        .lookup(word_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No attempts recorded for word {}", word_id)))?;
    Ok(Json(stats))
}
