//! Maturity/importance risk scoring
//!
//! This module turns a completed answer set into per-category analytics and
//! one priority category. It is the single implementation behind every
//! report format and the notification body.
//!
//! # Scoring Formula
//!
//! ```text
//! risk(question) = (3 - maturity) × importance          0..=9
//! risk(category) = Σ risk(question) over answered questions
//!
//! priority = argmax over categories, keys in order:
//!   risk(category)          higher wins
//!   avg importance          higher wins
//!   avg maturity            lower wins
//!   declaration order       earlier wins
//! ```
//!
//! # Classification
//!
//! - **Critical**: avg maturity < 1.5 and avg importance > 2
//! - **Caution**: avg maturity < 2
//! - **Healthy**: otherwise
//!
//! # Example
//!
//! One answer each in A, B and C:
//! - A = (0, 3) → risk 9, Critical
//! - B = (1, 3) → risk 6, Critical
//! - C = (3, 1) → risk 0, Healthy
//!
//! Priority = A. D has no answers, so it has no averages and no status.

mod aggregate;
mod classify;
mod evaluation;
mod priority;

pub use aggregate::{aggregate, risk, CategoryAggregate};
pub use classify::{
    classify, Status, CAUTION_MATURITY_BELOW, CRITICAL_IMPORTANCE_ABOVE, CRITICAL_MATURITY_BELOW,
};
pub use evaluation::{
    check_answers, evaluate, CategoryScore, Evaluation, MatrixPoint, RadarPoint, IDEAL_MATURITY,
};
pub use priority::{compare_urgency, select_priority, Priority};

use crate::catalog::QUESTIONS;
use crate::error::EvaluationResult;
use crate::models::AnswerSet;

/// Evaluate against the built-in question catalog
pub fn evaluate_builtin(answers: &AnswerSet) -> EvaluationResult<Evaluation> {
    evaluate(QUESTIONS, answers)
}
