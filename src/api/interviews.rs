//! Mock interview session endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{
    validate_experience_level, validate_interview_type, validate_questions, validate_title,
};
use crate::db::{
    CompleteSessionRequest, InterviewSessionResponse, RecordAnswerRequest, StartSessionRequest,
};
use crate::store::interviews::{self, NewSession};
use crate::AppState;

fn validate_start_request(req: &StartSessionRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_title(&req.position_title) {
        errors.add("position_title", e);
    }
    if let Err(e) = validate_experience_level(&req.experience_level) {
        errors.add("experience_level", e);
    }
    if let Err(e) = validate_interview_type(&req.interview_type) {
        errors.add("interview_type", e);
    }
    if let Err(e) = validate_questions(&req.questions) {
        errors.add("questions", e);
    }

    errors.finish()
}

/// Start a session with its question list fixed up front
///
/// POST /api/users/:id/interviews
pub async fn start_session(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<InterviewSessionResponse>), ApiError> {
    validate_start_request(&req)?;

    let new_session = NewSession {
        position_title: req.position_title,
        company_name: req.company_name,
        experience_level: req.experience_level,
        industry: req.industry,
        interview_type: req.interview_type,
        questions: req.questions,
    };
    let session = interviews::start_session(&state.db, &user_id, &new_session).await?;

    tracing::info!(user_id = %user_id, session_id = %session.id, "Interview session started");
    Ok((StatusCode::CREATED, Json(session.into())))
}

/// List a user's sessions, newest first
///
/// GET /api/users/:id/interviews
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<InterviewSessionResponse>>, ApiError> {
    let sessions = interviews::list_sessions(&state.db, &user_id).await?;
    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

/// Get one session; the path user must own it
///
/// GET /api/users/:id/interviews/:session_id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path((user_id, session_id)): Path<(String, String)>,
) -> Result<Json<InterviewSessionResponse>, ApiError> {
    let session = interviews::get_session(&state.db, &session_id, &user_id).await?;
    Ok(Json(session.into()))
}

/// Record or revise an answer while the session is incomplete
///
/// POST /api/users/:id/interviews/:session_id/answers
pub async fn record_answer(
    State(state): State<Arc<AppState>>,
    Path((user_id, session_id)): Path<(String, String)>,
    Json(req): Json<RecordAnswerRequest>,
) -> Result<Json<InterviewSessionResponse>, ApiError> {
    if req.answer.trim().is_empty() {
        return Err(ApiError::bad_request("answer must not be empty"));
    }

    // Ownership check before mutating.
    interviews::get_session(&state.db, &session_id, &user_id).await?;

    let session =
        interviews::record_answer(&state.db, &session_id, req.question_index, &req.answer).await?;
    Ok(Json(session.into()))
}

/// Finalize the session with feedback; terminal and one-shot
///
/// POST /api/users/:id/interviews/:session_id/complete
pub async fn complete_session(
    State(state): State<Arc<AppState>>,
    Path((user_id, session_id)): Path<(String, String)>,
    Json(req): Json<CompleteSessionRequest>,
) -> Result<Json<InterviewSessionResponse>, ApiError> {
    interviews::get_session(&state.db, &session_id, &user_id).await?;

    let session = interviews::complete_session(&state.db, &session_id, &req.feedback).await?;

    tracing::info!(user_id = %user_id, session_id = %session_id, "Interview session completed");
    Ok(Json(session.into()))
}
