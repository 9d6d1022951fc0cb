//! Per-category aggregation of paired ratings

use crate::models::{AnswerSet, CategoryKey, Question, MAX_MATURITY};
use serde::Serialize;

/// Risk contributed by one answered question: `(3 - maturity) * importance`.
///
/// Ranges over 0..=9 for in-range input. A fully optimized practice carries
/// no risk regardless of its importance.
pub fn risk(maturity: u8, importance: u8) -> u32 {
    u32::from(MAX_MATURITY.saturating_sub(maturity)) * u32::from(importance)
}

/// Sums for one category over its answered questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryAggregate {
    pub category: CategoryKey,
    /// Answered questions only
    pub count: u32,
    pub maturity_sum: u32,
    pub importance_sum: u32,
    /// Sum of per-question risk, not an average
    pub risk_sum: u32,
}

impl CategoryAggregate {
    pub fn empty(category: CategoryKey) -> Self {
        Self {
            category,
            count: 0,
            maturity_sum: 0,
            importance_sum: 0,
            risk_sum: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `None` when nothing in the category was answered
    pub fn avg_maturity(&self) -> Option<f64> {
        mean(self.maturity_sum, self.count)
    }

    /// `None` when nothing in the category was answered
    pub fn avg_importance(&self) -> Option<f64> {
        mean(self.importance_sum, self.count)
    }

    fn add(&mut self, maturity: u8, importance: u8) {
        self.count += 1;
        self.maturity_sum += u32::from(maturity);
        self.importance_sum += u32::from(importance);
        self.risk_sum += risk(maturity, importance);
    }
}

fn mean(sum: u32, count: u32) -> Option<f64> {
    (count > 0).then(|| f64::from(sum) / f64::from(count))
}

/// Reduce answers into one aggregate per category, in declaration order.
///
/// Questions without an answer are skipped entirely. Answers whose id is not
/// among `questions`, or whose ratings are off the scale, are ignored here;
/// rejecting them is the caller's job.
pub fn aggregate(questions: &[Question], answers: &AnswerSet) -> [CategoryAggregate; 4] {
    let mut out = CategoryKey::ALL.map(CategoryAggregate::empty);

    for question in questions {
        let Some((maturity, importance)) = answers.get(question.id).and_then(|a| a.ratings())
        else {
            continue;
        };
        out[question.category.index()].add(maturity, importance);
    }

    out
}
