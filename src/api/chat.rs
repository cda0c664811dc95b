//! Conversation log endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::error::{ApiError, ValidationErrorBuilder};
use crate::db::{AppendTurnRequest, ChatTurn, HistoryQuery};
use crate::store::chat;
use crate::AppState;

/// Append one question/answer turn
///
/// POST /api/users/:id/chat
pub async fn append_turn(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<AppendTurnRequest>,
) -> Result<(StatusCode, Json<ChatTurn>), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if req.question.trim().is_empty() {
        errors.add("question", "Question is required");
    }
    if req.answer.trim().is_empty() {
        errors.add("answer", "Answer is required");
    }
    errors.finish()?;

    let turn = chat::append_turn(&state.db, &user_id, &req.question, &req.answer).await?;
    Ok((StatusCode::CREATED, Json(turn)))
}

/// Replay the conversation chronologically
///
/// GET /api/users/:id/chat?limit=
pub async fn history(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<ChatTurn>>, ApiError> {
    if let Some(limit) = query.limit {
        if limit < 1 {
            return Err(ApiError::bad_request("limit must be positive"));
        }
    }

    let turns = chat::history(&state.db, &user_id, query.limit).await?;
    Ok(Json(turns))
}
