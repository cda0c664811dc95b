//! Mock interview session models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;

/// A mock interview session. `questions` and `answers` are JSON TEXT
/// columns; use the typed accessors instead of touching the raw strings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewSession {
    pub id: String,
    pub user_id: String,
    pub position_title: String,
    pub company_name: Option<String>,
    pub experience_level: String,
    pub industry: Option<String>,
    pub interview_type: String,
    pub questions: String,
    pub answers: String,
    pub feedback: Option<String>,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl InterviewSession {
    /// Parse the ordered question list from its JSON column.
    pub fn get_questions(&self) -> Vec<String> {
        serde_json::from_str(&self.questions).unwrap_or_default()
    }

    /// Parse the answers map (question index -> answer text) from its JSON column.
    pub fn get_answers(&self) -> BTreeMap<usize, String> {
        serde_json::from_str(&self.answers).unwrap_or_default()
    }
}

/// Serialize a question list for storage.
pub fn serialize_questions(questions: &[String]) -> String {
    serde_json::to_string(questions).unwrap_or_else(|_| "[]".to_string())
}

/// Serialize an answers map for storage.
pub fn serialize_answers(answers: &BTreeMap<usize, String>) -> String {
    serde_json::to_string(answers).unwrap_or_else(|_| "{}".to_string())
}

/// Session with questions and answers parsed out of their JSON columns.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewSessionResponse {
    pub id: String,
    pub user_id: String,
    pub position_title: String,
    pub company_name: Option<String>,
    pub experience_level: String,
    pub industry: Option<String>,
    pub interview_type: String,
    pub questions: Vec<String>,
    pub answers: BTreeMap<usize, String>,
    pub feedback: Option<String>,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<InterviewSession> for InterviewSessionResponse {
    fn from(session: InterviewSession) -> Self {
        let questions = session.get_questions();
        let answers = session.get_answers();
        Self {
            id: session.id,
            user_id: session.user_id,
            position_title: session.position_title,
            company_name: session.company_name,
            experience_level: session.experience_level,
            industry: session.industry,
            interview_type: session.interview_type,
            questions,
            answers,
            feedback: session.feedback,
            completed: session.completed,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionRequest {
    pub position_title: String,
    #[serde(default)]
    pub company_name: Option<String>,
    pub experience_level: String,
    #[serde(default)]
    pub industry: Option<String>,
    pub interview_type: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordAnswerRequest {
    pub question_index: usize,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct CompleteSessionRequest {
    pub feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(questions: &str, answers: &str) -> InterviewSession {
        InterviewSession {
            id: "s1".to_string(),
            user_id: "u1".to_string(),
            position_title: "Data Analyst".to_string(),
            company_name: None,
            experience_level: "Entry Level".to_string(),
            industry: None,
            interview_type: "General".to_string(),
            questions: questions.to_string(),
            answers: answers.to_string(),
            feedback: None,
            completed: false,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn questions_and_answers_parse_from_json_columns() {
        let session = session_with(
            r#"["Tell me about yourself","Why this role?"]"#,
            r#"{"0":"I am...","1":"Because..."}"#,
        );
        assert_eq!(session.get_questions().len(), 2);
        assert_eq!(session.get_answers().get(&1).unwrap(), "Because...");
    }

    #[test]
    fn malformed_json_columns_fall_back_to_empty() {
        let session = session_with("not json", "also not json");
        assert!(session.get_questions().is_empty());
        assert!(session.get_answers().is_empty());
    }

    #[test]
    fn answers_round_trip_with_integer_keys() {
        let mut answers = BTreeMap::new();
        answers.insert(0usize, "first".to_string());
        answers.insert(3usize, "fourth".to_string());

        let json = serialize_answers(&answers);
        let parsed: BTreeMap<usize, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, answers);
    }
}
