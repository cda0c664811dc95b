//! Conversation log: append-only question/answer turns.
//!
//! There is deliberately no update or delete here; the log is an audit
//! trail and only goes away when its owner is deleted (cascade).

use uuid::Uuid;

use super::{now_rfc3339, StoreError, StoreResult};
use crate::db::{ChatTurn, DbPool};

/// Append one immutable turn to the user's log.
pub async fn append_turn(
    pool: &DbPool,
    user_id: &str,
    question: &str,
    answer: &str,
) -> StoreResult<ChatTurn> {
    let owner: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    if owner.is_none() {
        return Err(StoreError::NotFound(format!("user {} not found", user_id)));
    }

    let id = Uuid::new_v4().to_string();
    let now = now_rfc3339();

    sqlx::query(
        "INSERT INTO chat_history (id, user_id, question, answer, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(user_id)
    .bind(question)
    .bind(answer)
    .bind(&now)
    .execute(pool)
    .await?;

    let turn = sqlx::query_as::<_, ChatTurn>("SELECT * FROM chat_history WHERE id = ?")
        .bind(&id)
        .fetch_one(pool)
        .await?;
    Ok(turn)
}

/// Chronological replay of the user's conversation. With a limit, the most
/// recent N turns are returned, still oldest first. Each call re-executes
/// the query.
pub async fn history(
    pool: &DbPool,
    user_id: &str,
    limit: Option<i64>,
) -> StoreResult<Vec<ChatTurn>> {
    // rowid breaks ties between turns appended within the same timestamp
    // granularity.
    let turns = match limit {
        Some(limit) => {
            sqlx::query_as::<_, ChatTurn>(
                "SELECT id, user_id, question, answer, created_at FROM ( \
                   SELECT id, user_id, question, answer, created_at, rowid AS rid \
                   FROM chat_history WHERE user_id = ? \
                   ORDER BY created_at DESC, rid DESC LIMIT ? \
                 ) ORDER BY created_at ASC, rid ASC",
            )
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, ChatTurn>(
                "SELECT id, user_id, question, answer, created_at \
                 FROM chat_history WHERE user_id = ? \
                 ORDER BY created_at ASC, rowid ASC",
            )
            .bind(user_id)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(turns)
}
