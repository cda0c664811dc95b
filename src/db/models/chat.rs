//! Conversation log models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One question/answer exchange. Rows are immutable once written; the log
/// has no update path anywhere in the crate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatTurn {
    pub id: String,
    pub user_id: String,
    pub question: String,
    pub answer: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct AppendTurnRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}
