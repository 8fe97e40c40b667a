use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::MappingReport;

/// Write the machine-readable report as pretty JSON
pub fn write_report(report: &MappingReport, path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).context("Failed to serialize mapping report")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write report: {:?}", path))?;
    Ok(())
}

/// Render the report as human-readable text
///
/// One block per changed policy, showing current and proposed wording.
pub fn render_human_readable(report: &MappingReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("Regulation: {}\n", report.regulation_id));
    out.push_str(&format!("{}\n\n", report.regulation_text));
    out.push_str(&format!(
        "Policies requiring changes: {} of {}\n",
        report.metadata.policies_changed, report.metadata.policies_considered
    ));
    out.push_str(&format!("Model: {}\n", report.metadata.model));
    out.push_str(&format!("Generated: {}\n", report.generated_at.to_rfc3339()));

    for result in &report.mapped {
        out.push('\n');
        out.push_str(&format!("== {} ({})\n", result.title, result.id));
        out.push_str("-- Current:\n");
        out.push_str(&format!("{}\n", result.current));
        out.push_str("-- Proposed:\n");
        out.push_str(&format!("{}\n", result.proposed));
    }

    out
}

/// Write the human-readable rendering to a path
pub fn write_human_readable(report: &MappingReport, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    file.write_all(render_human_readable(report).as_bytes())
        .with_context(|| format!("Failed to write file: {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Policy, RewriteResult};

    fn sample_report() -> MappingReport {
        let policy = Policy::new(
            "pol-privacy-02",
            "Employee Data Communication",
            "Employees are notified through HR portal announcements.",
        );
        let mapped = vec![RewriteResult::from_policy(
            &policy,
            "Employees are notified through HR portal announcements, \
             including explicit notice of biometric processing.",
        )];
        MappingReport::new(
            "reg-001",
            "Organizations collecting biometric identifiers must provide explicit notice.",
            mapped,
            10,
            "test-model",
        )
    }

    #[test]
    fn test_write_report_round_trips() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_report(&report, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: MappingReport = serde_json::from_str(&content).unwrap();

        assert_eq!(parsed.report_id, report.report_id);
        assert_eq!(parsed.mapped.len(), 1);
        assert_eq!(parsed.mapped[0].id, "pol-privacy-02");
    }

    #[test]
    fn test_render_human_readable() {
        let report = sample_report();
        let text = render_human_readable(&report);

        assert!(text.contains("Regulation: reg-001"));
        assert!(text.contains("Policies requiring changes: 1 of 10"));
        assert!(text.contains("== Employee Data Communication (pol-privacy-02)"));
        assert!(text.contains("-- Current:"));
        assert!(text.contains("-- Proposed:"));
    }

    #[test]
    fn test_write_human_readable() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");

        write_human_readable(&report, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Employee Data Communication"));
    }
}
