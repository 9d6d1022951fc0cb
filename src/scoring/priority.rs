//! Priority category selection
//!
//! Urgency order, most significant key first:
//!
//! 1. risk sum, higher wins
//! 2. average importance, higher wins
//! 3. average maturity, lower wins
//! 4. earlier category in declaration order wins
//!
//! Averages are compared as exact fractions (cross-multiplied sums) so that
//! equal averages really tie. A category with no answers has no averages and
//! loses keys 2 and 3 to any answered category.

use super::aggregate::CategoryAggregate;
use crate::models::CategoryKey;
use std::cmp::Ordering;

/// Outcome of priority selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Priority {
    pub category: CategoryKey,
    /// Nothing was answered; `category` is only the first declared one
    pub insufficient_data: bool,
}

/// Compare two averages given as `(sum, count)` pairs, both non-empty
fn cmp_fraction(a_sum: u32, a_count: u32, b_sum: u32, b_count: u32) -> Ordering {
    (u64::from(a_sum) * u64::from(b_count)).cmp(&(u64::from(b_sum) * u64::from(a_count)))
}

/// Answered categories order above unanswered ones
fn cmp_presence(a: &CategoryAggregate, b: &CategoryAggregate) -> Option<Ordering> {
    match (a.is_empty(), b.is_empty()) {
        (false, false) => None,
        (true, true) => Some(Ordering::Equal),
        (true, false) => Some(Ordering::Less),
        (false, true) => Some(Ordering::Greater),
    }
}

/// Total urgency order. `Greater` means `a` should be prioritized over `b`.
pub fn compare_urgency(a: &CategoryAggregate, b: &CategoryAggregate) -> Ordering {
    a.risk_sum
        .cmp(&b.risk_sum)
        .then_with(|| {
            cmp_presence(a, b).unwrap_or_else(|| {
                cmp_fraction(a.importance_sum, a.count, b.importance_sum, b.count)
            })
        })
        .then_with(|| {
            cmp_presence(a, b).unwrap_or_else(|| {
                // lower maturity is more urgent
                cmp_fraction(b.maturity_sum, b.count, a.maturity_sum, a.count)
            })
        })
        .then_with(|| b.category.cmp(&a.category))
}

/// Pick exactly one priority category.
///
/// The result does not depend on the order of `aggregates` beyond the
/// declaration-order tie-break, which is keyed on [`CategoryKey`] itself.
/// Returns `None` only for an empty slice.
pub fn select_priority(aggregates: &[CategoryAggregate]) -> Option<Priority> {
    let best = aggregates.iter().max_by(|a, b| compare_urgency(a, b))?;
    Some(Priority {
        category: best.category,
        insufficient_data: aggregates.iter().all(CategoryAggregate::is_empty),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agg(category: CategoryKey, count: u32, m: u32, i: u32, risk: u32) -> CategoryAggregate {
        CategoryAggregate {
            category,
            count,
            maturity_sum: m,
            importance_sum: i,
            risk_sum: risk,
        }
    }

    #[test]
    fn test_strictly_highest_risk_wins() {
        let aggs = [
            agg(CategoryKey::A, 3, 0, 9, 10),
            agg(CategoryKey::B, 3, 9, 3, 11),
            agg(CategoryKey::C, 3, 0, 9, 10),
            agg(CategoryKey::D, 0, 0, 0, 0),
        ];
        let p = select_priority(&aggs).unwrap();
        assert_eq!(p.category, CategoryKey::B);
        assert!(!p.insufficient_data);
    }

    #[test]
    fn test_tie_broken_by_average_importance() {
        // both risk 6; X avg importance 2.5, Y 2.0
        let y = agg(CategoryKey::A, 2, 2, 4, 6);
        let x = agg(CategoryKey::B, 2, 2, 5, 6);
        let p = select_priority(&[y, x]).unwrap();
        assert_eq!(p.category, CategoryKey::B);
    }

    #[test]
    fn test_tie_broken_by_lower_average_maturity() {
        // equal risk, equal avg importance 2.0; X maturity 1.0, Y 2.0
        let y = agg(CategoryKey::A, 1, 2, 2, 6);
        let x = agg(CategoryKey::C, 1, 1, 2, 6);
        let p = select_priority(&[y, x]).unwrap();
        assert_eq!(p.category, CategoryKey::C);
    }

    #[test]
    fn test_exact_average_comparison() {
        // 6/3 vs 12/6 must tie on importance and fall through to maturity
        let a = agg(CategoryKey::A, 3, 3, 6, 6);
        let b = agg(CategoryKey::B, 6, 3, 12, 6);
        assert_eq!(cmp_fraction(2, 3, 4, 6), Ordering::Equal);
        // b has avg maturity 0.5 vs a 1.0
        assert_eq!(select_priority(&[a, b]).unwrap().category, CategoryKey::B);
    }

    #[test]
    fn test_full_tie_keeps_first_declared() {
        let a = agg(CategoryKey::A, 1, 1, 2, 4);
        let d = agg(CategoryKey::D, 1, 1, 2, 4);
        assert_eq!(select_priority(&[a, d]).unwrap().category, CategoryKey::A);
        // reordering the input does not change the result
        assert_eq!(select_priority(&[d, a]).unwrap().category, CategoryKey::A);
    }

    #[test]
    fn test_answered_beats_empty_at_zero_risk() {
        let a = CategoryAggregate::empty(CategoryKey::A);
        let b = agg(CategoryKey::B, 1, 3, 1, 0);
        let p = select_priority(&[a, b]).unwrap();
        assert_eq!(p.category, CategoryKey::B);
        assert!(!p.insufficient_data);
    }

    #[test]
    fn test_all_empty_is_insufficient_data() {
        let aggs = CategoryKey::ALL.map(CategoryAggregate::empty);
        let p = select_priority(&aggs).unwrap();
        assert_eq!(p.category, CategoryKey::A);
        assert!(p.insufficient_data);
    }

    #[test]
    fn test_empty_slice() {
        assert!(select_priority(&[]).is_none());
    }

    #[test]
    fn test_selection_is_deterministic() {
        let aggs = [
            agg(CategoryKey::A, 2, 3, 5, 7),
            agg(CategoryKey::B, 2, 1, 4, 7),
            agg(CategoryKey::C, 3, 2, 6, 9),
            agg(CategoryKey::D, 3, 2, 6, 9),
        ];
        let first = select_priority(&aggs);
        for _ in 0..5 {
            assert_eq!(select_priority(&aggs), first);
        }
        assert_eq!(first.unwrap().category, CategoryKey::C);
    }
}
