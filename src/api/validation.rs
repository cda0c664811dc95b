//! Input validation for API requests.
//!
//! Field validators return `Result<(), String>` so handlers can aggregate
//! them with the `ValidationErrorBuilder` from the `error` module.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating email addresses (pragmatic, not RFC-complete)
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).unwrap();

    /// Regex for validating usernames (alphanumeric with dashes/underscores, 2-32 chars)
    static ref USERNAME_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9][a-zA-Z0-9_-]{1,31}$"
    ).unwrap();
}

/// Template styles the document generator understands.
pub const TEMPLATE_STYLES: &[&str] = &["Simple", "Modern", "Minimal"];

/// Experience levels accepted on interview sessions.
pub const EXPERIENCE_LEVELS: &[&str] =
    &["Entry Level", "Mid-Level", "Senior Level", "Executive"];

/// Interview formats accepted on interview sessions.
pub const INTERVIEW_TYPES: &[&str] = &["General", "Technical", "Behavioral", "Case Study"];

/// Bounds on the number of questions in one session.
pub const MIN_QUESTIONS: usize = 3;
pub const MAX_QUESTIONS: usize = 10;

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if email.len() > 254 {
        return Err("Email is too long (max 254 characters)".to_string());
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }
    if !USERNAME_REGEX.is_match(username) {
        return Err(
            "Username must be 2-32 characters: letters, digits, dashes or underscores"
                .to_string(),
        );
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title is required".to_string());
    }
    if title.len() > 200 {
        return Err("Title is too long (max 200 characters)".to_string());
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), String> {
    if content.is_empty() {
        return Err("Content is required".to_string());
    }
    Ok(())
}

pub fn validate_template_style(style: &Option<String>) -> Result<(), String> {
    if let Some(s) = style {
        if !TEMPLATE_STYLES.contains(&s.as_str()) {
            return Err(format!(
                "Unknown template style \"{}\" (expected one of: {})",
                s,
                TEMPLATE_STYLES.join(", ")
            ));
        }
    }
    Ok(())
}

pub fn validate_experience_level(level: &str) -> Result<(), String> {
    if !EXPERIENCE_LEVELS.contains(&level) {
        return Err(format!(
            "Unknown experience level \"{}\" (expected one of: {})",
            level,
            EXPERIENCE_LEVELS.join(", ")
        ));
    }
    Ok(())
}

pub fn validate_interview_type(interview_type: &str) -> Result<(), String> {
    if !INTERVIEW_TYPES.contains(&interview_type) {
        return Err(format!(
            "Unknown interview type \"{}\" (expected one of: {})",
            interview_type,
            INTERVIEW_TYPES.join(", ")
        ));
    }
    Ok(())
}

pub fn validate_questions(questions: &[String]) -> Result<(), String> {
    if questions.len() < MIN_QUESTIONS || questions.len() > MAX_QUESTIONS {
        return Err(format!(
            "A session needs between {} and {} questions (got {})",
            MIN_QUESTIONS,
            MAX_QUESTIONS,
            questions.len()
        ));
    }
    if questions.iter().any(|q| q.trim().is_empty()) {
        return Err("Questions must not be empty".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_emails() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a.b+tag@sub.domain.org").is_ok());
    }

    #[test]
    fn rejects_bad_emails() {
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn username_bounds() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("a_b-c9").is_ok());
        assert!(validate_username("a").is_err());
        assert!(validate_username("-leading").is_err());
        assert!(validate_username(&"x".repeat(33)).is_err());
    }

    #[test]
    fn template_style_list_is_closed() {
        assert!(validate_template_style(&None).is_ok());
        assert!(validate_template_style(&Some("Modern".to_string())).is_ok());
        assert!(validate_template_style(&Some("Gothic".to_string())).is_err());
    }

    #[test]
    fn question_count_bounds() {
        let make = |n: usize| (0..n).map(|i| format!("q{}", i)).collect::<Vec<_>>();
        assert!(validate_questions(&make(2)).is_err());
        assert!(validate_questions(&make(3)).is_ok());
        assert!(validate_questions(&make(10)).is_ok());
        assert!(validate_questions(&make(11)).is_err());
        assert!(validate_questions(&["".to_string(), "q".to_string(), "q".to_string()]).is_err());
    }

    #[test]
    fn interview_metadata_lists() {
        assert!(validate_experience_level("Mid-Level").is_ok());
        assert!(validate_experience_level("Wizard").is_err());
        assert!(validate_interview_type("Case Study").is_ok());
        assert!(validate_interview_type("Trivia").is_err());
    }
}
