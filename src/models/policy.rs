use serde::{Deserialize, Serialize};

/// A named compliance obligation, looked up by a stable identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Regulation {
    /// Unique identifier (e.g., "reg-001")
    pub id: String,
    /// Free-text description of the obligation
    pub text: String,
}

impl Regulation {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// An internal policy document record, subject to rewrite
///
/// Source records are immutable: a pipeline run produces a rewritten copy
/// and never mutates the original text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Unique identifier (e.g., "pol-privacy-01")
    pub id: String,
    /// Display title
    pub title: String,
    /// Current policy wording
    pub text: String,
}

impl Policy {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy() {
        let json = r#"{
            "id": "pol-privacy-01",
            "title": "Biometric Data Collection",
            "text": "We collect biometric information for attendance verification."
        }"#;

        let policy: Policy = serde_json::from_str(json).unwrap();

        assert_eq!(policy.id, "pol-privacy-01");
        assert_eq!(policy.title, "Biometric Data Collection");
        assert!(policy.text.contains("biometric"));
    }
}
