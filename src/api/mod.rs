pub mod auth;
mod chat;
mod documents;
mod error;
mod interviews;
mod users;
mod validation;

pub use error::{ApiError, ErrorCode, ErrorResponse};

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Users
        .route("/users", post(users::create_user))
        .route("/users/:id", get(users::get_user))
        .route("/users/:id", delete(users::delete_user))
        .route("/auth/login", post(users::login))
        // Documents
        .route("/users/:id/documents", post(documents::save_document))
        .route("/users/:id/documents", get(documents::list_documents))
        .route("/users/:id/documents/latest", get(documents::get_latest))
        .route("/users/:id/documents/versions", get(documents::list_versions))
        .route("/users/:id/documents/:doc_id", delete(documents::delete_document))
        // Chat history
        .route("/users/:id/chat", post(chat::append_turn))
        .route("/users/:id/chat", get(chat::history))
        // Interview sessions
        .route("/users/:id/interviews", post(interviews::start_session))
        .route("/users/:id/interviews", get(interviews::list_sessions))
        .route("/users/:id/interviews/:session_id", get(interviews::get_session))
        .route(
            "/users/:id/interviews/:session_id/answers",
            post(interviews::record_answer),
        )
        .route(
            "/users/:id/interviews/:session_id/complete",
            post(interviews::complete_session),
        )
        // Protected by the admin token
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
