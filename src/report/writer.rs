use crate::models::ComplianceTally;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render the report text for `tally`
pub fn render_report(tally: &ComplianceTally, log_path: &Path, generated: &DateTime<Local>) -> String {
    let rule = "=".repeat(50);
    let sub_rule = "-".repeat(25);
    let mut out = String::new();

    out.push_str("WINDOWS COMPLIANCE REPORT\n");
    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!("Generated: {}\n", generated.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!("Log File: {}\n", log_path.display()));
    out.push_str(&format!("{}\n\n", rule));

    out.push_str("COMPLIANCE STATISTICS\n");
    out.push_str(&format!("{}\n", sub_rule));
    out.push_str(&format!("Total Systems Checked: {}\n\n", tally.total_systems));

    out.push_str("NON-COMPLIANCE ISSUES\n");
    out.push_str(&format!("{}\n", sub_rule));
    if tally.password_issues > 0 {
        out.push_str(&format!("• Password Issues: {} system(s)\n", tally.password_issues));
    }
    if tally.update_issues > 0 {
        out.push_str(&format!("• Windows Update Issues: {} system(s)\n", tally.update_issues));
    }
    if tally.total_issues() == 0 {
        out.push_str("• No compliance issues found\n");
    }

    out.push_str(&format!("\n{}\n", rule));
    out
}

/// Write the report to `output_path`. Prints the outcome; returns false on failure.
pub fn generate_report(tally: &ComplianceTally, log_path: &Path, output_path: &Path) -> bool {
    let report = render_report(tally, log_path, &Local::now());

    match write_report(output_path, &report) {
        Ok(()) => {
            log::debug!("Report written to {:?}", output_path);
            println!("✅ Compliance report generated: {}", output_path.display());
            true
        }
        Err(e) => {
            println!("❌ Error generating report: {}", e);
            false
        }
    }
}

fn write_report(path: &Path, report: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(report.as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_render_layout_without_issues() {
        let tally = ComplianceTally {
            total_systems: 3,
            ..Default::default()
        };
        let report = render_report(&tally, Path::new("audit_monitor.log"), &fixed_time());
        let rule = "=".repeat(50);
        let expected = format!(
            "WINDOWS COMPLIANCE REPORT\n{rule}\nGenerated: 2024-05-02 08:30:00\nLog File: audit_monitor.log\n{rule}\n\n\
             COMPLIANCE STATISTICS\n{sub}\nTotal Systems Checked: 3\n\n\
             NON-COMPLIANCE ISSUES\n{sub}\n• No compliance issues found\n\n{rule}\n",
            rule = rule,
            sub = "-".repeat(25)
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_render_lists_only_present_categories() {
        let tally = ComplianceTally {
            password_issues: 0,
            update_issues: 1,
            total_systems: 2,
        };
        let report = render_report(&tally, Path::new("a.log"), &fixed_time());
        assert!(report.contains("• Windows Update Issues: 1 system(s)\n"));
        assert!(!report.contains("Password Issues"));
        assert!(!report.contains("No compliance issues found"));
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("compliance_report.txt");
        let tally = ComplianceTally {
            password_issues: 1,
            update_issues: 0,
            total_systems: 1,
        };

        assert!(generate_report(&tally, Path::new("audit_monitor.log"), &out));
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.starts_with("WINDOWS COMPLIANCE REPORT\n"));
        assert!(written.contains("• Password Issues: 1 system(s)"));
    }

    #[test]
    fn test_generate_reports_write_failure() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("missing").join("compliance_report.txt");
        assert!(!generate_report(&ComplianceTally::default(), Path::new("x.log"), &out));
    }
}
