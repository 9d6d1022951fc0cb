//! Whole-run evaluation: aggregation, priority and classification in one pass

use super::aggregate::{aggregate, CategoryAggregate};
use super::classify::{classify, Status};
use super::priority::{select_priority, Priority};
use crate::error::{EvaluationError, EvaluationResult, RatingField};
use crate::models::{
    AnswerSet, CategoryKey, Question, MAX_IMPORTANCE, MAX_MATURITY, MIN_IMPORTANCE,
};
use serde::Serialize;

/// Scale ceiling shown as the "ideal" series on charts
pub const IDEAL_MATURITY: f64 = MAX_MATURITY as f64;

/// Derived figures for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: CategoryKey,
    pub name: &'static str,
    pub aggregate: CategoryAggregate,
    pub avg_maturity: Option<f64>,
    pub avg_importance: Option<f64>,
    /// `(3 - avg_maturity) * avg_importance`, the per-category table figure
    pub display_risk: Option<f64>,
    /// `None` when the category has no answers
    pub status: Option<Status>,
}

impl CategoryScore {
    fn from_aggregate(aggregate: CategoryAggregate) -> Self {
        let avg_maturity = aggregate.avg_maturity();
        let avg_importance = aggregate.avg_importance();
        let averages = avg_maturity.zip(avg_importance);
        Self {
            category: aggregate.category,
            name: aggregate.category.name(),
            aggregate,
            avg_maturity,
            avg_importance,
            display_risk: averages.map(|(m, i)| (IDEAL_MATURITY - m) * i),
            status: averages.map(|(m, i)| classify(m, i)),
        }
    }
}

/// Radar chart point: current vs. ideal maturity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    pub category: CategoryKey,
    pub name: &'static str,
    pub current: f64,
    pub ideal: f64,
}

/// Maturity x importance matrix point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixPoint {
    pub category: CategoryKey,
    pub name: &'static str,
    pub maturity: f64,
    pub importance: f64,
    pub is_priority: bool,
}

/// Immutable result of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Selected priority; only meaningful when `insufficient_data` is false
    pub priority: CategoryKey,
    pub insufficient_data: bool,
    /// One entry per category, in declaration order
    pub categories: Vec<CategoryScore>,
    pub answered: usize,
    pub total_questions: usize,
}

impl Evaluation {
    /// The priority category, or `None` when nothing was answered
    pub fn recommendation(&self) -> Option<CategoryKey> {
        (!self.insufficient_data).then_some(self.priority)
    }

    pub fn category(&self, key: CategoryKey) -> &CategoryScore {
        &self.categories[key.index()]
    }

    /// Worst status across categories with data
    pub fn overall_level(&self) -> Option<Status> {
        self.categories.iter().filter_map(|c| c.status).max()
    }

    /// Radar series; unanswered categories are omitted
    pub fn radar(&self) -> Vec<RadarPoint> {
        self.categories
            .iter()
            .filter_map(|c| {
                Some(RadarPoint {
                    category: c.category,
                    name: c.name,
                    current: round2(c.avg_maturity?),
                    ideal: IDEAL_MATURITY,
                })
            })
            .collect()
    }

    /// Matrix series; unanswered categories are omitted
    pub fn matrix(&self) -> Vec<MatrixPoint> {
        self.categories
            .iter()
            .filter_map(|c| {
                Some(MatrixPoint {
                    category: c.category,
                    name: c.name,
                    maturity: round2(c.avg_maturity?),
                    importance: round2(c.avg_importance?),
                    is_priority: self.recommendation() == Some(c.category),
                })
            })
            .collect()
    }

    /// Human-readable breakdown of how the result was reached
    pub fn explain(&self) -> String {
        let mut lines = Vec::new();

        lines.push("# Scoring Breakdown\n".to_string());
        lines.push("```".to_string());
        lines.push("risk(question) = (3 - maturity) x importance".to_string());
        lines.push("risk(category) = sum of risk over answered questions".to_string());
        lines.push("priority       = max risk, then max avg importance, then min avg maturity".to_string());
        lines.push("```\n".to_string());

        lines.push(format!(
            "Answered {} of {} questions.\n",
            self.answered, self.total_questions
        ));

        for c in &self.categories {
            let a = &c.aggregate;
            lines.push(format!("## {} {}\n", c.category, c.name));
            match (c.avg_maturity, c.avg_importance, c.status) {
                (Some(m), Some(i), Some(status)) => {
                    lines.push(format!("- Answered: {}", a.count));
                    lines.push(format!("- Risk sum: {}", a.risk_sum));
                    lines.push(format!("- Avg maturity: {:.2} (sum {})", m, a.maturity_sum));
                    lines.push(format!("- Avg importance: {:.2} (sum {})", i, a.importance_sum));
                    lines.push(format!("- Status: {}\n", status));
                }
                _ => lines.push("- No answers\n".to_string()),
            }
        }

        match self.recommendation() {
            Some(key) => lines.push(format!("Priority: {} {}", key, key.name())),
            None => lines.push("Priority: insufficient data".to_string()),
        }

        lines.join("\n")
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Reject any answer that is out of range or names an unknown question.
///
/// Answers are checked in id order, so the first reported problem is stable.
pub fn check_answers(questions: &[Question], answers: &AnswerSet) -> EvaluationResult<()> {
    for (id, answer) in answers {
        if !questions.iter().any(|q| q.id == id.as_str()) {
            return Err(EvaluationError::UnknownQuestion(id.clone()));
        }
        if !answer.maturity_in_range() {
            return Err(EvaluationError::InvalidAnswer {
                question: id.clone(),
                field: RatingField::Maturity,
                value: answer.maturity,
                min: 0,
                max: MAX_MATURITY,
            });
        }
        if !answer.importance_in_range() {
            return Err(EvaluationError::InvalidAnswer {
                question: id.clone(),
                field: RatingField::Importance,
                value: answer.importance,
                min: MIN_IMPORTANCE,
                max: MAX_IMPORTANCE,
            });
        }
    }
    Ok(())
}

/// Evaluate an answer set against a question list.
///
/// Invalid input is rejected rather than clamped. The computation is pure:
/// the same input always yields the same `Evaluation`.
pub fn evaluate(questions: &[Question], answers: &AnswerSet) -> EvaluationResult<Evaluation> {
    check_answers(questions, answers)?;

    let aggregates = aggregate(questions, answers);
    let priority = select_priority(&aggregates).unwrap_or(Priority {
        category: CategoryKey::ALL[0],
        insufficient_data: true,
    });

    let categories: Vec<CategoryScore> = aggregates
        .into_iter()
        .map(CategoryScore::from_aggregate)
        .collect();
    let answered = categories.iter().map(|c| c.aggregate.count as usize).sum();

    Ok(Evaluation {
        priority: priority.category,
        insufficient_data: priority.insufficient_data,
        categories,
        answered,
        total_questions: questions.len(),
    })
}
