use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Policy;

/// A proposed rewrite for a single policy
///
/// The pipeline only surfaces results whose proposed text differs from the
/// current text after trimming; trim-identical results are dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteResult {
    /// ID of the policy this rewrite applies to
    pub id: String,
    /// Display title of the policy
    pub title: String,
    /// Original policy text, unchanged
    pub current: String,
    /// Model-suggested replacement text (whitespace-trimmed)
    pub proposed: String,
}

impl RewriteResult {
    /// Build a result from a policy and the model's proposed text
    pub fn from_policy(policy: &Policy, proposed: impl Into<String>) -> Self {
        Self {
            id: policy.id.clone(),
            title: policy.title.clone(),
            current: policy.text.clone(),
            proposed: proposed.into(),
        }
    }

    /// Whether the proposed text materially differs from the current text.
    /// Purely a trimmed string comparison; formatting-only differences count.
    pub fn is_changed(&self) -> bool {
        self.current.trim() != self.proposed.trim()
    }
}

/// Metadata about a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Number of policies sent to the rewriter
    pub policies_considered: usize,
    /// Number of policies whose proposed text changed
    pub policies_changed: usize,
    /// Model that produced the rewrites
    pub model: String,
}

/// Machine-readable output of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingReport {
    /// Unique identifier for this run (UUID)
    pub report_id: Uuid,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
    /// Regulation identifier the run was asked to map
    pub regulation_id: String,
    /// Resolved regulation text; empty for an unknown identifier
    pub regulation_text: String,
    /// Changed policies, in catalog order
    pub mapped: Vec<RewriteResult>,
    /// Run metadata
    pub metadata: ReportMetadata,
}

impl MappingReport {
    pub fn new(
        regulation_id: impl Into<String>,
        regulation_text: impl Into<String>,
        mapped: Vec<RewriteResult>,
        policies_considered: usize,
        model: impl Into<String>,
    ) -> Self {
        let policies_changed = mapped.len();
        Self {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            regulation_id: regulation_id.into(),
            regulation_text: regulation_text.into(),
            mapped,
            metadata: ReportMetadata {
                policies_considered,
                policies_changed,
                model: model.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rewrite_result() {
        let json = r#"{
            "id": "pol-privacy-02",
            "title": "Employee Data Communication",
            "current": "Employees are notified through HR portal announcements.",
            "proposed": "Employees are notified through HR portal announcements, including explicit notice of biometric processing."
        }"#;

        let result: RewriteResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.id, "pol-privacy-02");
        assert!(result.is_changed());
    }

    #[test]
    fn test_is_changed_ignores_surrounding_whitespace() {
        let policy = Policy::new("pol-x", "X", "Some wording.");
        let unchanged = RewriteResult::from_policy(&policy, "  Some wording.\n");
        let changed = RewriteResult::from_policy(&policy, "Some other wording.");

        assert!(!unchanged.is_changed());
        assert!(changed.is_changed());
    }

    #[test]
    fn test_report_counts() {
        let policy = Policy::new("pol-x", "X", "Old.");
        let mapped = vec![RewriteResult::from_policy(&policy, "New.")];
        let report = MappingReport::new("reg-001", "Some regulation.", mapped, 10, "test-model");

        assert_eq!(report.metadata.policies_considered, 10);
        assert_eq!(report.metadata.policies_changed, 1);
        assert_eq!(report.regulation_id, "reg-001");
    }
}
