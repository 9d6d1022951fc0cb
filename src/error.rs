//! Errors raised by the scoring core

use thiserror::Error;

/// Which half of a paired rating was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingField {
    Maturity,
    Importance,
}

impl std::fmt::Display for RatingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingField::Maturity => write!(f, "maturity"),
            RatingField::Importance => write!(f, "importance"),
        }
    }
}

/// A rejected evaluation, with the reason it was rejected.
///
/// Empty categories and an entirely unanswered set are not errors; they are
/// reported on the [`Evaluation`](crate::scoring::Evaluation) itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Invalid answer for {question}: {field} = {value} (allowed {min}..={max})")]
    InvalidAnswer {
        question: String,
        field: RatingField,
        value: i64,
        min: u8,
        max: u8,
    },

    #[error("Answer references unknown question '{0}'")]
    UnknownQuestion(String),
}

impl EvaluationError {
    /// Dotted path of the offending input, e.g. `answers.A1.maturity`
    pub fn field_path(&self) -> String {
        match self {
            EvaluationError::InvalidAnswer {
                question, field, ..
            } => format!("answers.{}.{}", question, field),
            EvaluationError::UnknownQuestion(id) => format!("answers.{}", id),
        }
    }
}

pub type EvaluationResult<T> = Result<T, EvaluationError>;
