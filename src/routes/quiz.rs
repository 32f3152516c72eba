use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::quiz_dto::{SelectAnswerRequest, StartQuizRequest};
use crate::error::{Error, Result};
use crate::AppState;

/// Start a quiz session. With `word_ids` it is a practice run over exactly
/// those words, otherwise `count` random active words. Sending both is
/// rejected.
#[axum::debug_handler]
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartQuizRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let session = match (req.word_ids, req.count) {
        (Some(_), Some(_)) => {
            return Err(Error::BadRequest(
                "count cannot be combined with word_ids".to_string(),
            ))
        }
        (Some(ids), None) => state.sessions.start_practice(ids).await?,
        (None, count) => state.sessions.start_general(count).await?,
    };
    Ok((StatusCode::CREATED, Json(session)))
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.sessions.get(id)?))
}

#[axum::debug_handler]
pub async fn select_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectAnswerRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    Ok(Json(state.sessions.select_answer(id, req.answer)?))
}

#[axum::debug_handler]
pub async fn advance_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.sessions.advance(id).await?))
}
