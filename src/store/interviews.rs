//! Interview session store.
//!
//! Sessions start incomplete with their question list fixed; answers are
//! filled (and may be revised) while incomplete. Completion stores the
//! feedback and is terminal: once `completed` is set, neither answers nor
//! the flag ever change again, and a second completion is a caller bug
//! surfaced as `Conflict`.

use uuid::Uuid;

use super::{now_rfc3339, StoreError, StoreResult};
use crate::db::{serialize_answers, serialize_questions, DbPool, InterviewSession};

/// Metadata and questions for a new session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub position_title: String,
    pub company_name: Option<String>,
    pub experience_level: String,
    pub industry: Option<String>,
    pub interview_type: String,
    pub questions: Vec<String>,
}

/// Create a session in the incomplete state with no answers or feedback.
pub async fn start_session(
    pool: &DbPool,
    user_id: &str,
    new_session: &NewSession,
) -> StoreResult<InterviewSession> {
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
        "INSERT INTO interview_sessions \
         (id, user_id, position_title, company_name, experience_level, industry, \
          interview_type, questions, answers, completed, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, '{}', 0, ?, ?)",
    )
    .bind(&id)
    .bind(user_id)
    .bind(&new_session.position_title)
    .bind(&new_session.company_name)
    .bind(&new_session.experience_level)
    .bind(&new_session.industry)
    .bind(&new_session.interview_type)
    .bind(serialize_questions(&new_session.questions))
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    fetch_session(pool, &id).await
}

/// Record (or revise) the answer for one question. Fails with `Conflict`
/// once the session is completed and `NotFound` for an index outside the
/// session's question list.
pub async fn record_answer(
    pool: &DbPool,
    session_id: &str,
    question_index: usize,
    answer_text: &str,
) -> StoreResult<InterviewSession> {
    let mut tx = pool.begin().await?;

    let session = sqlx::query_as::<_, InterviewSession>(
        "SELECT * FROM interview_sessions WHERE id = ?",
    )
    .bind(session_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| StoreError::NotFound(format!("session {} not found", session_id)))?;

    if session.completed {
        return Err(StoreError::Conflict(format!(
            "session {} is already completed",
            session_id
        )));
    }

    let questions = session.get_questions();
    if question_index >= questions.len() {
        return Err(StoreError::NotFound(format!(
            "question index {} out of range (session has {} questions)",
            question_index,
            questions.len()
        )));
    }

    let mut answers = session.get_answers();
    answers.insert(question_index, answer_text.to_string());

    sqlx::query("UPDATE interview_sessions SET answers = ?, updated_at = ? WHERE id = ?")
        .bind(serialize_answers(&answers))
        .bind(now_rfc3339())
        .bind(session_id)
        .execute(&mut *tx)
        .await?;

    let updated = sqlx::query_as::<_, InterviewSession>(
        "SELECT * FROM interview_sessions WHERE id = ?",
    )
    .bind(session_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(updated)
}

/// One-shot terminal transition: store feedback and flip `completed`.
/// Calling this twice is an error, not an idempotent no-op.
pub async fn complete_session(
    pool: &DbPool,
    session_id: &str,
    feedback: &str,
) -> StoreResult<InterviewSession> {
    let mut tx = pool.begin().await?;

    let session = sqlx::query_as::<_, InterviewSession>(
        "SELECT * FROM interview_sessions WHERE id = ?",
    )
    .bind(session_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| StoreError::NotFound(format!("session {} not found", session_id)))?;

    if session.completed {
        return Err(StoreError::Conflict(format!(
            "session {} is already completed",
            session_id
        )));
    }

    // The completed = 0 guard makes the flip race-safe even if another
    // writer slipped in between the read and this update.
    let result = sqlx::query(
        "UPDATE interview_sessions SET feedback = ?, completed = 1, updated_at = ? \
         WHERE id = ? AND completed = 0",
    )
    .bind(feedback)
    .bind(now_rfc3339())
    .bind(session_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::Conflict(format!(
            "session {} is already completed",
            session_id
        )));
    }

    let updated = sqlx::query_as::<_, InterviewSession>(
        "SELECT * FROM interview_sessions WHERE id = ?",
    )
    .bind(session_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(updated)
}

/// Fetch a session for its owner. A mismatched requester gets `Auth`.
pub async fn get_session(
    pool: &DbPool,
    session_id: &str,
    requesting_user_id: &str,
) -> StoreResult<InterviewSession> {
    let session = fetch_session(pool, session_id).await?;
    if session.user_id != requesting_user_id {
        return Err(StoreError::Auth(format!(
            "session {} is not owned by user {}",
            session_id, requesting_user_id
        )));
    }
    Ok(session)
}

/// All sessions for a user, newest first.
pub async fn list_sessions(pool: &DbPool, user_id: &str) -> StoreResult<Vec<InterviewSession>> {
    let sessions = sqlx::query_as::<_, InterviewSession>(
        "SELECT * FROM interview_sessions WHERE user_id = ? ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(sessions)
}

async fn fetch_session(pool: &DbPool, session_id: &str) -> StoreResult<InterviewSession> {
    sqlx::query_as::<_, InterviewSession>("SELECT * FROM interview_sessions WHERE id = ?")
        .bind(session_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("session {} not found", session_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::store::users;

    fn new_session(questions: usize) -> NewSession {
        NewSession {
            position_title: "Backend Engineer".to_string(),
            company_name: Some("Acme".to_string()),
            experience_level: "Mid-Level".to_string(),
            industry: Some("Software".to_string()),
            interview_type: "Technical".to_string(),
            questions: (0..questions).map(|i| format!("Question {}", i)).collect(),
        }
    }

    #[tokio::test]
    async fn session_starts_incomplete_and_empty() {
        let pool = test_pool().await;
        let user = users::create_user(&pool, "alice@example.com", "alice", "h1")
            .await
            .unwrap();

        let session = start_session(&pool, &user.id, &new_session(3)).await.unwrap();
        assert!(!session.completed);
        assert!(session.feedback.is_none());
        assert_eq!(session.get_questions().len(), 3);
        assert!(session.get_answers().is_empty());
    }

    #[tokio::test]
    async fn answers_fill_and_may_be_revised_before_completion() {
        let pool = test_pool().await;
        let user = users::create_user(&pool, "alice@example.com", "alice", "h1")
            .await
            .unwrap();
        let session = start_session(&pool, &user.id, &new_session(3)).await.unwrap();

        let updated = record_answer(&pool, &session.id, 0, "first answer")
            .await
            .unwrap();
        assert_eq!(updated.get_answers().get(&0).unwrap(), "first answer");

        let updated = record_answer(&pool, &session.id, 0, "revised answer")
            .await
            .unwrap();
        assert_eq!(updated.get_answers().get(&0).unwrap(), "revised answer");
        assert_eq!(updated.get_answers().len(), 1);
    }

    #[tokio::test]
    async fn out_of_range_index_is_not_found() {
        let pool = test_pool().await;
        let user = users::create_user(&pool, "alice@example.com", "alice", "h1")
            .await
            .unwrap();
        let session = start_session(&pool, &user.id, &new_session(3)).await.unwrap();

        let err = record_answer(&pool, &session.id, 3, "x").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn completion_is_terminal() {
        let pool = test_pool().await;
        let user = users::create_user(&pool, "alice@example.com", "alice", "h1")
            .await
            .unwrap();
        let session = start_session(&pool, &user.id, &new_session(3)).await.unwrap();
        record_answer(&pool, &session.id, 0, "a").await.unwrap();

        let completed = complete_session(&pool, &session.id, "solid answers")
            .await
            .unwrap();
        assert!(completed.completed);
        assert_eq!(completed.feedback.as_deref(), Some("solid answers"));

        // Second completion is a caller bug.
        let err = complete_session(&pool, &session.id, "again").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // Answers are frozen too.
        let err = record_answer(&pool, &session.id, 1, "late").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn get_session_enforces_ownership() {
        let pool = test_pool().await;
        let alice = users::create_user(&pool, "alice@example.com", "alice", "h1")
            .await
            .unwrap();
        let bob = users::create_user(&pool, "bob@example.com", "bob", "h2")
            .await
            .unwrap();
        let session = start_session(&pool, &alice.id, &new_session(3)).await.unwrap();

        let fetched = get_session(&pool, &session.id, &alice.id).await.unwrap();
        assert_eq!(fetched.id, session.id);

        let err = get_session(&pool, &session.id, &bob.id).await.unwrap_err();
        assert!(matches!(err, StoreError::Auth(_)));
    }

    #[tokio::test]
    async fn list_sessions_is_scoped_and_newest_first() {
        let pool = test_pool().await;
        let user = users::create_user(&pool, "alice@example.com", "alice", "h1")
            .await
            .unwrap();
        let first = start_session(&pool, &user.id, &new_session(3)).await.unwrap();
        let second = start_session(&pool, &user.id, &new_session(4)).await.unwrap();

        let sessions = list_sessions(&pool, &user.id).await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, second.id);
        assert_eq!(sessions[1].id, first.id);
        assert!(sessions[0].created_at >= sessions[1].created_at);
    }
}
