//! Core data models for maturity-check

use crate::catalog::SizeBracket;
use crate::feedback::{self, Feedback};
use crate::scoring::Evaluation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Highest maturity rating (fully optimized practice)
pub const MAX_MATURITY: u8 = 3;
/// Lowest importance rating
pub const MIN_IMPORTANCE: u8 = 1;
/// Highest importance rating
pub const MAX_IMPORTANCE: u8 = 3;

/// Assessment categories, in declaration order.
///
/// Declaration order is the enumeration order used by the priority
/// selector's last-resort tie-break.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CategoryKey {
    A,
    B,
    C,
    D,
}

impl CategoryKey {
    /// All categories in declaration order
    pub const ALL: [CategoryKey; 4] = [CategoryKey::A, CategoryKey::B, CategoryKey::C, CategoryKey::D];

    /// Position in declaration order
    pub fn index(self) -> usize {
        match self {
            CategoryKey::A => 0,
            CategoryKey::B => 1,
            CategoryKey::C => 2,
            CategoryKey::D => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CategoryKey::A => "Utilization Management",
            CategoryKey::B => "Skills & Staffing",
            CategoryKey::C => "Profitability Management",
            CategoryKey::D => "Process Maturity",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CategoryKey::A => "Visibility into resource utilization and workload",
            CategoryKey::B => "Optimal staffing and skill management",
            CategoryKey::C => "Project budget-vs-actual control and margins",
            CategoryKey::D => "Organizational management processes and governance",
        }
    }
}

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryKey::A => write!(f, "A"),
            CategoryKey::B => write!(f, "B"),
            CategoryKey::C => write!(f, "C"),
            CategoryKey::D => write!(f, "D"),
        }
    }
}

impl std::str::FromStr for CategoryKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(CategoryKey::A),
            "B" => Ok(CategoryKey::B),
            "C" => Ok(CategoryKey::C),
            "D" => Ok(CategoryKey::D),
            other => Err(format!("Unknown category '{}'. Valid categories: A, B, C, D", other)),
        }
    }
}

/// A catalog question (static configuration, not user data)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub category: CategoryKey,
    pub text: &'static str,
    pub description: &'static str,
}

/// A single paired rating.
///
/// Ratings are read as wide integers so that `-1` or `300` reach validation
/// and get reported against their field instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// 0 (not practiced) to 3 (optimized)
    pub maturity: i64,
    /// 1 (low) to 3 (high)
    pub importance: i64,
}

impl Answer {
    pub fn new(maturity: u8, importance: u8) -> Self {
        Self {
            maturity: i64::from(maturity),
            importance: i64::from(importance),
        }
    }

    pub fn maturity_in_range(&self) -> bool {
        (0..=i64::from(MAX_MATURITY)).contains(&self.maturity)
    }

    pub fn importance_in_range(&self) -> bool {
        (i64::from(MIN_IMPORTANCE)..=i64::from(MAX_IMPORTANCE)).contains(&self.importance)
    }

    /// Both ratings, when both are on their scales
    pub fn ratings(&self) -> Option<(u8, u8)> {
        if !self.maturity_in_range() || !self.importance_in_range() {
            return None;
        }
        Some((
            u8::try_from(self.maturity).ok()?,
            u8::try_from(self.importance).ok()?,
        ))
    }
}

/// Question id -> answer. Skipped questions are simply absent.
pub type AnswerSet = BTreeMap<String, Answer>;

/// Optional free-form attributes captured with a submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Size bracket id (`S1`..`S5`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Incoming submission, before validation and persistence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[serde(default)]
    pub answers: AnswerSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
}

/// A persisted submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: u64,
    pub answers: AnswerSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    pub fn company_name(&self) -> Option<&str> {
        self.user_info
            .as_ref()
            .and_then(|u| u.company_name.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn size_bracket(&self) -> Option<&str> {
        self.user_info
            .as_ref()
            .and_then(|u| u.company_size.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

/// Everything a reporter needs: the evaluation plus presentation context.
///
/// Built once per render from a fresh evaluation; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeBracket>,
    pub evaluation: Evaluation,
    /// Absent when there is not enough data for a recommendation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}

impl AssessmentReport {
    /// Report for an unsaved answer set
    pub fn new(evaluation: Evaluation, size: Option<&str>) -> Self {
        let size = size.and_then(SizeBracket::from_id);
        let feedback = evaluation
            .recommendation()
            .map(|key| feedback::resolve_bracket(key, size));
        Self {
            id: None,
            company_name: None,
            created_at: None,
            size,
            evaluation,
            feedback,
        }
    }

    /// Report for a stored submission. The submission's own size bracket
    /// wins over `default_size` when it is a known bracket.
    pub fn for_submission(
        submission: &Submission,
        evaluation: Evaluation,
        default_size: Option<&str>,
    ) -> Self {
        let declared = submission
            .size_bracket()
            .filter(|s| SizeBracket::from_id(s).is_some());
        if let (Some(declared), Some(requested)) = (declared, default_size) {
            if SizeBracket::from_id(declared) != SizeBracket::from_id(requested) {
                debug!(
                    "Submission {} declares size {}, ignoring {}",
                    submission.id, declared, requested
                );
            }
        }
        let size = declared.or(default_size);
        Self {
            id: Some(submission.id),
            company_name: submission.company_name().map(str::to_string),
            created_at: Some(submission.created_at),
            ..Self::new(evaluation, size)
        }
    }

    /// Heading name for the organization
    pub fn display_name(&self) -> &str {
        self.company_name.as_deref().unwrap_or("Not specified")
    }
}
