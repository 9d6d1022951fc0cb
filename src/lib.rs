//! maturity-check - project management maturity self-assessment
//!
//! Scores a questionnaire of paired ratings (maturity 0-3, importance 1-3)
//! into per-category risk, classifies each category, and picks the single
//! category to improve first. Around that core sit validation, a
//! file-backed submission store, an outbox notifier and report renderers.
//!
//! ```
//! use maturity_check::models::{Answer, AnswerSet, CategoryKey};
//! use maturity_check::scoring::evaluate_builtin;
//!
//! let mut answers = AnswerSet::new();
//! answers.insert("A1".into(), Answer::new(0, 3));
//! answers.insert("B1".into(), Answer::new(1, 3));
//!
//! let eval = evaluate_builtin(&answers).unwrap();
//! assert_eq!(eval.recommendation(), Some(CategoryKey::A));
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod feedback;
pub mod models;
pub mod notify;
pub mod reporters;
pub mod scoring;
pub mod store;
pub mod validate;
