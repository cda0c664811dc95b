//! Versioned document models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Kind of user-authored artifact a document row holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum DocumentType {
    Resume,
    CoverLetter,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Resume => "resume",
            DocumentType::CoverLetter => "cover_letter",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One version of a document. Saving under an existing (user, title, type)
/// lineage appends a new row; prior versions are never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: String,
    pub user_id: String,
    pub document_type: DocumentType,
    pub title: String,
    pub content: String,
    pub template_style: Option<String>,
    pub version_number: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveDocumentRequest {
    pub document_type: DocumentType,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub template_style: Option<String>,
}

/// Query parameters for document listing endpoints.
#[derive(Debug, Deserialize)]
pub struct DocumentListQuery {
    #[serde(default)]
    pub document_type: Option<DocumentType>,
}

/// Query parameters for lineage lookups (latest, versions).
#[derive(Debug, Deserialize)]
pub struct DocumentLineageQuery {
    pub title: String,
    pub document_type: DocumentType,
}
