//! Built-in question catalog
//!
//! Twelve questions, three per category, plus the five organization size
//! brackets used to refine feedback text. Categories themselves are the
//! closed [`CategoryKey`] enum.

use crate::models::{CategoryKey, Question};
use serde::Serialize;

/// Built-in questions, in presentation order
pub const QUESTIONS: &[Question] = &[
    // Category A
    Question {
        id: "A1",
        category: CategoryKey::A,
        text: "Time entry rate",
        description: "All members record effort daily or weekly and the actual picture is known",
    },
    Question {
        id: "A2",
        category: CategoryKey::A,
        text: "Unified plan vs. actual",
        description: "Planned and actual effort can be compared in real time in one place",
    },
    Question {
        id: "A3",
        category: CategoryKey::A,
        text: "PM workload visibility",
        description: "Management load and overwork of PM/PL staff is measured at the organization level",
    },
    // Category B
    Question {
        id: "B1",
        category: CategoryKey::B,
        text: "Skill-based assignment",
        description: "Staffing decisions are based on recorded individual skill levels",
    },
    Question {
        id: "B2",
        category: CategoryKey::B,
        text: "Escalation prevention",
        description: "Dependency on specific people and project risk are detected before projects go critical",
    },
    Question {
        id: "B3",
        category: CategoryKey::B,
        text: "Templated requirements",
        description: "Requirements and design processes are standardized rather than person-dependent",
    },
    // Category C
    Question {
        id: "C1",
        category: CategoryKey::C,
        text: "Standard estimation basis",
        description: "Estimate assumptions and calculation logic are an established organizational standard",
    },
    Question {
        id: "C2",
        category: CategoryKey::C,
        text: "Variance root cause",
        description: "When actuals diverge from plan, the true cause (estimate, scope change, productivity) is identified",
    },
    Question {
        id: "C3",
        category: CategoryKey::C,
        text: "Clear exit criteria",
        description: "Exit or downsizing criteria for loss-making or risky projects are defined and applied",
    },
    // Category D
    Question {
        id: "D1",
        category: CategoryKey::D,
        text: "Standard RAID management",
        description: "Risks, assumptions, issues and dependencies are managed with one common method",
    },
    Question {
        id: "D2",
        category: CategoryKey::D,
        text: "Executive dashboard",
        description: "Leadership can see the state of the whole project portfolio immediately",
    },
    Question {
        id: "D3",
        category: CategoryKey::D,
        text: "Resource coordination forum",
        description: "A cross-department forum or process for resource allocation and prioritization is working",
    },
];

/// Look up a built-in question by id
pub fn question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Questions belonging to one category
pub fn questions_in(category: CategoryKey) -> impl Iterator<Item = &'static Question> {
    QUESTIONS.iter().filter(move |q| q.category == category)
}

/// Coarse organization size, used only to refine feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SizeBracket {
    S1,
    S2,
    S3,
    S4,
    S5,
}

impl SizeBracket {
    pub const ALL: [SizeBracket; 5] = [
        SizeBracket::S1,
        SizeBracket::S2,
        SizeBracket::S3,
        SizeBracket::S4,
        SizeBracket::S5,
    ];

    /// Parse a bracket id. Unknown ids are `None`, never an error.
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_uppercase().as_str() {
            "S1" => Some(SizeBracket::S1),
            "S2" => Some(SizeBracket::S2),
            "S3" => Some(SizeBracket::S3),
            "S4" => Some(SizeBracket::S4),
            "S5" => Some(SizeBracket::S5),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            SizeBracket::S1 => "S1",
            SizeBracket::S2 => "S2",
            SizeBracket::S3 => "S3",
            SizeBracket::S4 => "S4",
            SizeBracket::S5 => "S5",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeBracket::S1 => "Solo / up to 10 people",
            SizeBracket::S2 => "11-30 people",
            SizeBracket::S3 => "31-100 people",
            SizeBracket::S4 => "101-300 people",
            SizeBracket::S5 => "301+ people",
        }
    }
}

impl std::fmt::Display for SizeBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_question_ids_unique() {
        let ids: HashSet<&str> = QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), QUESTIONS.len());
    }

    #[test]
    fn test_three_questions_per_category() {
        for key in CategoryKey::ALL {
            assert_eq!(questions_in(key).count(), 3, "category {}", key);
        }
    }

    #[test]
    fn test_question_lookup() {
        assert_eq!(question("C2").map(|q| q.category), Some(CategoryKey::C));
        assert!(question("Z9").is_none());
    }

    #[test]
    fn test_size_bracket_ids() {
        for bracket in SizeBracket::ALL {
            assert_eq!(SizeBracket::from_id(bracket.id()), Some(bracket));
        }
        assert_eq!(SizeBracket::from_id("s4"), Some(SizeBracket::S4));
        assert_eq!(SizeBracket::from_id("S9"), None);
    }
}
