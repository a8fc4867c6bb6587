//! Compliance reporting over the checker's audit log.
//!
//! The log is free text. Issues are recognised by the marker phrases in
//! [`crate::markers`]: issue markers count once if present at all, session
//! markers count every occurrence.

pub mod writer;

pub use writer::{generate_report, render_report};

use crate::error::ReportError;
use crate::markers;
use crate::models::ComplianceTally;
use std::path::Path;

/// Load the whole log, or a [`ReportError`] describing why it is unavailable.
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn load_log(path: &Path) -> Result<String, ReportError> {
    if !path.exists() {
        return Err(ReportError::LogNotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Load the log, printing a diagnostic and returning `None` on any failure
pub fn read_log(path: &Path) -> Option<String> {
    match load_log(path) {
        Ok(content) => Some(content),
        Err(e @ ReportError::LogNotFound(_)) => {
            println!("❌ {}", e);
            None
        }
        Err(e) => {
            println!("❌ Error reading log file: {}", e);
            None
        }
    }
}

/// Tally issue markers and session markers in `content`
pub fn count_issues(content: &str) -> ComplianceTally {
    let mut tally = ComplianceTally::default();

    if content.contains(markers::PASSWORDS_NEVER_EXPIRE) {
        tally.password_issues += 1;
    }
    if content.contains(markers::PASSWORDS_NO_EXPIRATION) {
        tally.password_issues += 1;
    }
    if content.contains(markers::UPDATES_AVAILABLE) {
        tally.update_issues += 1;
    }

    let audit_sessions = content.matches(markers::AUDIT_SESSION).count();
    let monitor_sessions = content.matches(markers::MONITOR_SESSION).count();
    tally.total_systems = (audit_sessions + monitor_sessions) as u32;

    log::debug!(
        "Counted {} audit and {} monitor session(s)",
        audit_sessions,
        monitor_sessions
    );
    tally
}

/// Console summary block
pub fn render_summary(tally: &ComplianceTally) -> String {
    let rule = "=".repeat(40);
    let rate = match tally.compliance_rate() {
        Some(rate) => format!("{:.1}%", rate),
        None => "N/A".to_string(),
    };

    format!(
        "\n{rule}\nWINDOWS COMPLIANCE SUMMARY\n{rule}\n\
         Total Systems: {}\n\
         Systems in Compliance: {}\n\
         Systems NOT in Compliance: {}\n\
         Compliance Rate: {}\n\
         {rule}",
        tally.total_systems,
        tally.compliant_systems(),
        tally.total_issues(),
        rate,
        rule = rule
    )
}

pub fn print_summary(tally: &ComplianceTally) {
    println!("{}", render_summary(tally));
}
