//! Static guidance for the priority category
//!
//! Lookup only: one entry per category, optionally refined by the
//! organization's size bracket. An unknown or missing bracket yields the
//! base text.

use crate::catalog::SizeBracket;
use crate::models::CategoryKey;
use serde::Serialize;

/// Guidance shown for the selected priority category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub category: CategoryKey,
    pub headline: &'static str,
    pub text: &'static str,
    /// Zero to two recommended actions
    pub actions: Vec<&'static str>,
    /// Size-specific caution, present only for a known bracket
    pub size_note: Option<String>,
}

struct Entry {
    headline: &'static str,
    text: &'static str,
    actions: [&'static str; 2],
    /// Indexed by bracket, S1..S5
    size_notes: [&'static str; 5],
}

fn entry(category: CategoryKey) -> &'static Entry {
    match category {
        CategoryKey::A => &UTILIZATION,
        CategoryKey::B => &STAFFING,
        CategoryKey::C => &PROFITABILITY,
        CategoryKey::D => &PROCESS,
    }
}

static UTILIZATION: Entry = Entry {
    headline: "Making utilization visible is your top priority",
    text: "You cannot see what is happening on projects, so early warning signs are missed and \
           problems are handled after the fact. Start by making accurate time entry a habit and \
           monitoring the gap between plan and actual.",
    actions: [
        "Enforce daily time entry for every member",
        "Hold a weekly review of plan vs. actual per project",
    ],
    size_notes: [
        "At {size}, {category} can start with a shared spreadsheet; the habit matters more than the tool.",
        "At {size}, the first overloaded PM is usually invisible until a deadline slips. Make weekly load visible now.",
        "At {size}, informal status checks stop scaling. {category} needs one agreed source of actuals.",
        "At {size}, department-level tools drift apart. Consolidate {category} data before comparing teams.",
        "At {size}, gaps in {category} hide portfolio-wide overcommitment. Tie time data to resource planning.",
    ],
};

static STAFFING: Entry = Entry {
    headline: "Optimizing resource allocation is urgent",
    text: "There is a high risk of depending on a few key people and of productivity loss from \
           skill mismatches. Build a skill map and move toward standardized, person-independent \
           ways of working.",
    actions: [
        "Create a skill map for key members",
        "Prepare standard templates for requirements and design work",
    ],
    size_notes: [
        "At {size}, every person is a single point of failure. Document who can cover whom in {category}.",
        "At {size}, one key departure can stall several projects. Start the skill map with your busiest people.",
        "At {size}, assignments made from memory start to miss better fits. {category} needs a shared view.",
        "At {size}, staffing across departments is negotiated ad hoc. Give {category} a common skill vocabulary.",
        "At {size}, the same scarce skills are contested by many projects. Treat {category} as a portfolio decision.",
    ],
};

static PROFITABILITY: Entry = Entry {
    headline: "Tighter profitability control is needed",
    text: "Deals are easily won on rough estimates and loss-making projects are left running. \
           Make the basis of each estimate explicit and strengthen governance such as exit criteria.",
    actions: [
        "Add approval criteria to the estimation process",
        "Write down exit and downsizing criteria for loss-making projects",
    ],
    size_notes: [
        "At {size}, one underpriced project can erase the year's margin. Review {category} on every quote.",
        "At {size}, estimates still live in individual heads. Capture the assumptions behind each one.",
        "At {size}, variance is noticed only at project close. {category} needs a monthly checkpoint.",
        "At {size}, margins differ sharply between units. Compare {category} figures on a common basis.",
        "At {size}, a few large losses dominate the portfolio. Escalation rules for {category} must be enforced.",
    ],
};

static PROCESS: Entry = Entry {
    headline: "Aim for standardized organizational processes",
    text: "Much of the work is handled ad hoc, so the organization does not learn from experience. \
           Build the mechanisms: strengthen the PMO function and establish reporting lines to \
           leadership.",
    actions: [
        "Set up a PMO or an equivalent function",
        "Build an executive dashboard covering all projects",
    ],
    size_notes: [
        "At {size}, a lightweight checklist is enough to start {category}; avoid heavy frameworks.",
        "At {size}, a part-time PMO role is usually sufficient. Name an owner for {category}.",
        "At {size}, inconsistent practices between teams start to cost real time. Standardize {category} now.",
        "At {size}, {category} requires a dedicated PMO with authority across departments.",
        "At {size}, {category} depends on portfolio governance reaching leadership every month.",
    ],
};

fn bracket_index(bracket: SizeBracket) -> usize {
    match bracket {
        SizeBracket::S1 => 0,
        SizeBracket::S2 => 1,
        SizeBracket::S3 => 2,
        SizeBracket::S4 => 3,
        SizeBracket::S5 => 4,
    }
}

/// Resolve guidance for a category, refined by a raw size bracket id.
///
/// `size` may be anything the submitter typed; unknown values are ignored.
pub fn resolve(category: CategoryKey, size: Option<&str>) -> Feedback {
    resolve_bracket(category, size.and_then(SizeBracket::from_id))
}

/// Resolve guidance for a category and an already-parsed bracket
pub fn resolve_bracket(category: CategoryKey, bracket: Option<SizeBracket>) -> Feedback {
    let e = entry(category);
    Feedback {
        category,
        headline: e.headline,
        text: e.text,
        actions: e.actions.to_vec(),
        size_note: bracket.map(|b| {
            e.size_notes[bracket_index(b)]
                .replace("{size}", b.label())
                .replace("{category}", category.name())
        }),
    }
}

/// File name of the category-specific guide attached to notifications
pub fn attachment_name(category: CategoryKey) -> &'static str {
    match category {
        CategoryKey::A => "guide-utilization-management.pdf",
        CategoryKey::B => "guide-skills-and-staffing.pdf",
        CategoryKey::C => "guide-profitability-management.pdf",
        CategoryKey::D => "guide-process-maturity.pdf",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_guidance() {
        for key in CategoryKey::ALL {
            let fb = resolve(key, None);
            assert_eq!(fb.category, key);
            assert!(!fb.headline.is_empty());
            assert!(!fb.text.is_empty());
            assert!(fb.actions.len() <= 2);
            assert!(fb.size_note.is_none());
        }
    }

    #[test]
    fn test_size_note_interpolated() {
        let fb = resolve(CategoryKey::D, Some("S4"));
        let note = fb.size_note.expect("size note");
        assert!(note.contains("101-300 people"));
        assert!(note.contains("Process Maturity"));
        assert!(!note.contains('{'));
    }

    #[test]
    fn test_all_size_notes_fully_interpolated() {
        for key in CategoryKey::ALL {
            for bracket in SizeBracket::ALL {
                let note = resolve_bracket(key, Some(bracket)).size_note.unwrap();
                assert!(!note.contains('{'), "{} {}: {}", key, bracket, note);
            }
        }
    }

    #[test]
    fn test_unknown_size_falls_back_to_base() {
        let base = resolve(CategoryKey::B, None);
        let unknown = resolve(CategoryKey::B, Some("huge"));
        assert_eq!(base, unknown);
        assert_eq!(resolve(CategoryKey::B, Some("")), base);
    }

    #[test]
    fn test_attachment_names_distinct() {
        let names: std::collections::HashSet<_> =
            CategoryKey::ALL.iter().map(|k| attachment_name(*k)).collect();
        assert_eq!(names.len(), 4);
    }
}
