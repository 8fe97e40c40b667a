use anyhow::{Result, bail};
use std::collections::HashSet;

use crate::models::{Policy, Regulation};

/// Read-only configuration data for a pipeline run: the regulation lookup
/// table and the ordered policy catalog.
///
/// Constructed once and injected into the coordinator; never mutated. The
/// built-in tables match the reference deployment, and alternate tables can
/// be loaded from JSON (see `crate::io::parse_catalog_file`).
#[derive(Debug, Clone)]
pub struct Catalog {
    regulations: Vec<Regulation>,
    policies: Vec<Policy>,
}

impl Catalog {
    /// Create a catalog from explicit tables.
    ///
    /// Duplicate regulation or policy ids are rejected: lookups and report
    /// entries are keyed by id.
    pub fn new(regulations: Vec<Regulation>, policies: Vec<Policy>) -> Result<Self> {
        let mut seen = HashSet::new();
        for regulation in &regulations {
            if !seen.insert(regulation.id.as_str()) {
                bail!("duplicate regulation id: {}", regulation.id);
            }
        }
        let mut seen = HashSet::new();
        for policy in &policies {
            if !seen.insert(policy.id.as_str()) {
                bail!("duplicate policy id: {}", policy.id);
            }
        }
        Ok(Self {
            regulations,
            policies,
        })
    }

    /// Fetch a regulation's text by id
    ///
    /// Returns an empty string for an unknown id. Absence is not an error:
    /// the coordinator treats an empty result as "nothing to do".
    pub fn fetch_regulation(&self, reg_id: &str) -> &str {
        self.regulations
            .iter()
            .find(|r| r.id == reg_id)
            .map(|r| r.text.as_str())
            .unwrap_or("")
    }

    /// All known regulation ids, in insertion order
    pub fn regulation_ids(&self) -> impl Iterator<Item = &str> {
        self.regulations.iter().map(|r| r.id.as_str())
    }

    /// All regulations, in insertion order
    pub fn regulations(&self) -> &[Regulation] {
        &self.regulations
    }

    /// The full policy catalog, in fixed insertion order
    pub fn list_policies(&self) -> &[Policy] {
        &self.policies
    }

    /// The fixed tables of the reference deployment
    pub fn builtin() -> Self {
        Self {
            regulations: builtin_regulations(),
            policies: builtin_policies(),
        }
    }
}

fn builtin_regulations() -> Vec<Regulation> {
    vec![
        Regulation::new(
            "reg-001",
            "Organizations collecting biometric identifiers must provide explicit notice to \
             employees and delete biometric records within 30 days of their initial purpose \
             being fulfilled.",
        ),
        Regulation::new(
            "reg-002",
            "Healthcare entities must retain operational logs for at least 180 days and \
             preserve all protected health information (PHI) for a minimum of 6 years. \
             Deletions must follow a documented workflow with auditable logs.",
        ),
        Regulation::new(
            "reg-003",
            "Public companies must disclose material cybersecurity incidents within 4 business \
             days and demonstrate board-level oversight over cybersecurity risk management.",
        ),
    ]
}

fn builtin_policies() -> Vec<Policy> {
    vec![
        Policy::new(
            "pol-privacy-01",
            "Biometric Data Collection",
            "We collect biometric information such as fingerprint clock-ins and facial \
             recognition scans for attendance verification purposes.",
        ),
        Policy::new(
            "pol-privacy-02",
            "Employee Data Communication",
            "Employees are notified of data practices through HR portal announcements and \
             quarterly email briefings, but biometric processing is not explicitly referenced.",
        ),
        Policy::new(
            "pol-privacy-03",
            "Data Deletion Schedule",
            "Personal data is erased within 90 days of account closure unless other \
             regulations require additional retention.",
        ),
        Policy::new(
            "pol-retention-01",
            "Operational Log Storage",
            "System logs are retained for approximately six months to support audits, \
             incident analysis, and infrastructure troubleshooting.",
        ),
        Policy::new(
            "pol-retention-02",
            "PHI Storage Policy",
            "Protected health information is kept for 36 months in payroll-related archives. \
             Extended retention may apply depending on HR requirements.",
        ),
        Policy::new(
            "pol-retention-03",
            "Data Removal Workflow",
            "Deletion requests are processed by IT via automated scripts. All removals \
             produce an audit trail stored in the internal compliance system.",
        ),
        Policy::new(
            "pol-security-01",
            "Internal Incident Handling",
            "Security incidents are documented internally. External disclosure requirements \
             have not yet been assessed.",
        ),
        Policy::new(
            "pol-security-02",
            "Cyber Governance",
            "Cyber risks and major incidents are reviewed by senior management. Formal board \
             oversight is not currently part of the governance structure.",
        ),
        Policy::new(
            "pol-security-ambiguous",
            "Incident Updates",
            "Minor service interruptions are logged daily. Major outages are escalated to \
             management within 48 hours. These are not classified as cybersecurity incidents.",
        ),
        Policy::new(
            "pol-governance-01",
            "Executive Risk Oversight",
            "Risk management updates, including IT-related issues, are presented quarterly to \
             senior leadership. Cybersecurity topics are included when relevant, but board \
             involvement is informal and undocumented.",
        ),
    ]
}
