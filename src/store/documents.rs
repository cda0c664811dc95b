//! Document store: versioned resume and cover-letter content.
//!
//! A lineage is the set of rows sharing (user_id, title, document_type).
//! Saving always appends a new row at max version + 1; prior versions are
//! never touched. The unique index on (user_id, title, document_type,
//! version_number) guarantees two racing saves cannot both claim the same
//! version.

use uuid::Uuid;

use super::{now_rfc3339, StoreError, StoreResult};
use crate::db::{DbPool, Document, DocumentType};

/// Append a new version to the (user, title, type) lineage, starting at 1.
pub async fn save_document(
    pool: &DbPool,
    user_id: &str,
    document_type: DocumentType,
    title: &str,
    content: &str,
    template_style: Option<&str>,
) -> StoreResult<Document> {
    let mut tx = pool.begin().await?;

    let owner: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
    if owner.is_none() {
        return Err(StoreError::NotFound(format!("user {} not found", user_id)));
    }

    let id = Uuid::new_v4().to_string();
    let now = now_rfc3339();

    // Version assignment and insert are one statement inside the
    // transaction, so the read-max/insert pair cannot interleave with a
    // concurrent writer on the same lineage.
    sqlx::query(
        "INSERT INTO documents \
         (id, user_id, document_type, title, content, template_style, version_number, created_at, updated_at) \
         SELECT ?, ?, ?, ?, ?, ?, COALESCE(MAX(version_number), 0) + 1, ?, ? \
         FROM documents WHERE user_id = ? AND title = ? AND document_type = ?",
    )
    .bind(&id)
    .bind(user_id)
    .bind(document_type)
    .bind(title)
    .bind(content)
    .bind(template_style)
    .bind(&now)
    .bind(&now)
    .bind(user_id)
    .bind(title)
    .bind(document_type)
    .execute(&mut *tx)
    .await?;

    let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = ?")
        .bind(&id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(document)
}

/// Highest-versioned document in a lineage.
pub async fn get_latest(
    pool: &DbPool,
    user_id: &str,
    title: &str,
    document_type: DocumentType,
) -> StoreResult<Document> {
    sqlx::query_as::<_, Document>(
        "SELECT * FROM documents \
         WHERE user_id = ? AND title = ? AND document_type = ? \
         ORDER BY version_number DESC LIMIT 1",
    )
    .bind(user_id)
    .bind(title)
    .bind(document_type)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| {
        StoreError::NotFound(format!(
            "no {} titled \"{}\" for user {}",
            document_type, title, user_id
        ))
    })
}

/// All of a user's documents, newest first, optionally filtered by type.
/// Every call re-executes the query; no cursor state is held.
pub async fn list_documents(
    pool: &DbPool,
    user_id: &str,
    document_type: Option<DocumentType>,
) -> StoreResult<Vec<Document>> {
    let documents = match document_type {
        Some(doc_type) => {
            sqlx::query_as::<_, Document>(
                "SELECT * FROM documents WHERE user_id = ? AND document_type = ? \
                 ORDER BY updated_at DESC, version_number DESC",
            )
            .bind(user_id)
            .bind(doc_type)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Document>(
                "SELECT * FROM documents WHERE user_id = ? \
                 ORDER BY updated_at DESC, version_number DESC",
            )
            .bind(user_id)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(documents)
}

/// Full history of a lineage, oldest version first.
pub async fn list_versions(
    pool: &DbPool,
    user_id: &str,
    title: &str,
    document_type: DocumentType,
) -> StoreResult<Vec<Document>> {
    let documents = sqlx::query_as::<_, Document>(
        "SELECT * FROM documents \
         WHERE user_id = ? AND title = ? AND document_type = ? \
         ORDER BY version_number ASC",
    )
    .bind(user_id)
    .bind(title)
    .bind(document_type)
    .fetch_all(pool)
    .await?;
    Ok(documents)
}

/// Hard-delete a single version. Only the owner may delete; a mismatched
/// requester gets `Auth`, not `NotFound`, so ownership bugs stay visible.
pub async fn delete_document(
    pool: &DbPool,
    document_id: &str,
    requesting_user_id: &str,
) -> StoreResult<()> {
    let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = ?")
        .bind(document_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("document {} not found", document_id)))?;

    if document.user_id != requesting_user_id {
        return Err(StoreError::Auth(format!(
            "document {} is not owned by user {}",
            document_id, requesting_user_id
        )));
    }

    sqlx::query("DELETE FROM documents WHERE id = ?")
        .bind(document_id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::store::users;

    async fn alice(pool: &DbPool) -> String {
        users::create_user(pool, "alice@example.com", "alice", "h1")
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn first_save_starts_at_version_one() {
        let pool = test_pool().await;
        let user_id = alice(&pool).await;

        let doc = save_document(&pool, &user_id, DocumentType::Resume, "Resume A", "v1", None)
            .await
            .unwrap();
        assert_eq!(doc.version_number, 1);
        assert_eq!(doc.content, "v1");
    }

    #[tokio::test]
    async fn second_save_appends_version_two_and_latest_follows() {
        let pool = test_pool().await;
        let user_id = alice(&pool).await;

        let first = save_document(&pool, &user_id, DocumentType::Resume, "Resume A", "v1", None)
            .await
            .unwrap();
        let second = save_document(
            &pool,
            &user_id,
            DocumentType::Resume,
            "Resume A",
            "v2",
            Some("Modern"),
        )
        .await
        .unwrap();

        assert_eq!(second.version_number, first.version_number + 1);

        let latest = get_latest(&pool, &user_id, "Resume A", DocumentType::Resume)
            .await
            .unwrap();
        assert_eq!(latest.version_number, 2);
        assert_eq!(latest.content, "v2");
        assert_eq!(latest.template_style.as_deref(), Some("Modern"));

        // Both rows survive, newest first.
        let listed = list_documents(&pool, &user_id, None).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].version_number, 2);
        assert_eq!(listed[1].version_number, 1);
    }

    #[tokio::test]
    async fn lineages_are_independent() {
        let pool = test_pool().await;
        let user_id = alice(&pool).await;

        save_document(&pool, &user_id, DocumentType::Resume, "Resume A", "a1", None)
            .await
            .unwrap();
        save_document(&pool, &user_id, DocumentType::Resume, "Resume A", "a2", None)
            .await
            .unwrap();
        // Same title, different type: separate lineage restarting at 1.
        let letter = save_document(
            &pool,
            &user_id,
            DocumentType::CoverLetter,
            "Resume A",
            "c1",
            None,
        )
        .await
        .unwrap();
        assert_eq!(letter.version_number, 1);

        let resumes = list_documents(&pool, &user_id, Some(DocumentType::Resume))
            .await
            .unwrap();
        assert_eq!(resumes.len(), 2);

        let versions = list_versions(&pool, &user_id, "Resume A", DocumentType::Resume)
            .await
            .unwrap();
        assert_eq!(
            versions.iter().map(|d| d.version_number).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[tokio::test]
    async fn save_for_unknown_user_is_not_found() {
        let pool = test_pool().await;
        let err = save_document(&pool, "missing", DocumentType::Resume, "T", "c", None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_requires_ownership() {
        let pool = test_pool().await;
        let owner_id = alice(&pool).await;
        let other = users::create_user(&pool, "bob@example.com", "bob", "h2")
            .await
            .unwrap();

        let doc = save_document(&pool, &owner_id, DocumentType::Resume, "Resume A", "v1", None)
            .await
            .unwrap();

        let err = delete_document(&pool, &doc.id, &other.id).await.unwrap_err();
        assert!(matches!(err, StoreError::Auth(_)));

        delete_document(&pool, &doc.id, &owner_id).await.unwrap();
        let err = delete_document(&pool, &doc.id, &owner_id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
