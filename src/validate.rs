//! Submission validation
//!
//! Rejects malformed submissions before they reach the store or the scorer.
//! Every error names the offending field, e.g. `answers.A1.maturity`.

use crate::catalog::SizeBracket;
use crate::error::EvaluationError;
use crate::models::{Question, SubmissionRequest};
use crate::scoring::check_answers;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::warn;

static EMAIL: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
    })
}

/// A rejected submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Answer(#[from] EvaluationError),

    #[error("Please enter a valid email address: '{0}'")]
    InvalidEmail(String),
}

impl ValidationError {
    /// Dotted path of the rejected field
    pub fn field(&self) -> String {
        match self {
            ValidationError::Answer(e) => e.field_path(),
            ValidationError::InvalidEmail(_) => "email".to_string(),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Validate a submission against a question list.
///
/// Answers are checked first, then the email. Blank optional strings are
/// accepted and treated as absent. The company size is free-form: an
/// unknown bracket is kept as given and only logged.
pub fn validate(request: &SubmissionRequest, questions: &[Question]) -> Result<(), ValidationError> {
    check_answers(questions, &request.answers)?;

    if let Some(email) = request.email.as_deref().filter(|e| !e.trim().is_empty()) {
        if !is_valid_email(email.trim()) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }
    }

    let size = request
        .user_info
        .as_ref()
        .and_then(|u| u.company_size.as_deref())
        .filter(|s| !s.trim().is_empty());
    if let Some(size) = size {
        if SizeBracket::from_id(size).is_none() {
            warn!("Unknown company size '{}', size notes will be omitted", size);
        }
    }

    Ok(())
}
