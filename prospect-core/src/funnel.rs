//! Funnel stage labels
//!
//! Contacts progress through an ordered funnel. Stage labels are open
//! strings on the wire so that tenants can rename or extend their
//! pipeline without a schema change; the defaults here are only the
//! seed set presented to new tenants.

use serde::{Deserialize, Serialize};

/// Stage labels every new tenant starts with, in funnel order.
pub const DEFAULT_STAGES: &[&str] = &[
    "New",
    "Qualified",
    "In Discussion",
    "In Negotiation",
    "Won",
    "Lost",
];

/// Ordered set of funnel stage labels for one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelStages {
    stages: Vec<String>,
}

impl FunnelStages {
    pub fn new(stages: Vec<String>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    /// Whether a status label belongs to this funnel.
    ///
    /// Unknown labels are not an error anywhere in the pipeline; this
    /// only drives presentation (e.g. which column a card lands in).
    pub fn is_known(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    /// Zero-based position of a label within the funnel, if present.
    /// Comparison is case-insensitive because the service preserves
    /// whatever casing the creating client sent.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.stages
            .iter()
            .position(|s| s.eq_ignore_ascii_case(label))
    }
}

impl Default for FunnelStages {
    fn default() -> Self {
        Self {
            stages: DEFAULT_STAGES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_funnel_order() {
        let funnel = FunnelStages::default();
        assert_eq!(funnel.stages().len(), 6);
        assert_eq!(funnel.stages()[0], "New");
        assert_eq!(funnel.stages()[5], "Lost");
        assert!(funnel.position("Qualified") < funnel.position("Won"));
    }

    #[test]
    fn test_position_is_case_insensitive() {
        let funnel = FunnelStages::default();
        assert_eq!(funnel.position("in discussion"), Some(2));
        assert_eq!(funnel.position("WON"), Some(4));
    }

    #[test]
    fn test_unknown_label_is_not_an_error() {
        let funnel = FunnelStages::default();
        assert!(!funnel.is_known("Archived"));
        assert_eq!(funnel.position("Archived"), None);
    }

    #[test]
    fn test_custom_funnel() {
        let funnel = FunnelStages::new(vec!["Cold".into(), "Warm".into(), "Closed".into()]);
        assert!(funnel.is_known("warm"));
        assert!(!funnel.is_known("New"));
    }
}
