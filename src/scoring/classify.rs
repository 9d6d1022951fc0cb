//! Status classification from category averages

use serde::{Deserialize, Serialize};

/// Average maturity must be strictly below this for `Critical`
pub const CRITICAL_MATURITY_BELOW: f64 = 1.5;
/// Average importance must be strictly above this for `Critical`
pub const CRITICAL_IMPORTANCE_ABOVE: f64 = 2.0;
/// Average maturity strictly below this is at least `Caution`
pub const CAUTION_MATURITY_BELOW: f64 = 2.0;

/// Ordinal status label, ordered from best to worst
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Status {
    Healthy,
    Caution,
    Critical,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Healthy => "Healthy",
            Status::Caution => "Caution",
            Status::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a category. The ranges overlap, so the check order matters:
/// Critical first, then Caution, else Healthy.
pub fn classify(avg_maturity: f64, avg_importance: f64) -> Status {
    if avg_maturity < CRITICAL_MATURITY_BELOW && avg_importance > CRITICAL_IMPORTANCE_ABOVE {
        Status::Critical
    } else if avg_maturity < CAUTION_MATURITY_BELOW {
        Status::Caution
    } else {
        Status::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_boundary_is_strict() {
        assert_eq!(classify(1.5, 2.5), Status::Caution);
        assert_eq!(classify(1.49, 2.01), Status::Critical);
        assert_eq!(classify(1.0, 2.0), Status::Caution);
    }

    #[test]
    fn test_caution_boundary() {
        assert_eq!(classify(1.99, 1.0), Status::Caution);
        assert_eq!(classify(2.0, 3.0), Status::Healthy);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify(0.0, 3.0), Status::Critical);
        assert_eq!(classify(0.0, 1.0), Status::Caution);
        assert_eq!(classify(3.0, 3.0), Status::Healthy);
    }

    #[test]
    fn test_status_ordering() {
        assert!(Status::Critical > Status::Caution);
        assert!(Status::Caution > Status::Healthy);
        assert_eq!(Status::Critical.to_string(), "Critical");
    }
}
