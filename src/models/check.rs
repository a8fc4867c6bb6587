use chrono::{DateTime, Local};
use std::fmt;

/// Which host property a check inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    PasswordExpiration,
    WindowsUpdates,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::PasswordExpiration => write!(f, "password expiration"),
            CheckKind::WindowsUpdates => write!(f, "Windows updates"),
        }
    }
}

/// Classification of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to report
    Compliant,
    /// The host is out of compliance
    Warning,
    /// The check itself could not be completed
    Error,
}

/// Result of one check invocation. Logged, then dropped.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub kind: CheckKind,
    pub outcome: Outcome,
    /// Raw stdout of the external query (empty when it never ran)
    pub raw_text: String,
    /// Message written to the audit log for this result
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl CheckResult {
    pub fn new(kind: CheckKind, outcome: Outcome, raw_text: String, message: impl Into<String>) -> Self {
        CheckResult {
            kind,
            outcome,
            raw_text,
            message: message.into(),
            timestamp: Local::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.outcome == Outcome::Error
    }
}

/// Identity of the host being audited
#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub host_name: String,
    pub os_name: String,
    pub os_release: String,
    pub architecture: String,
    pub collected_at: DateTime<Local>,
}

impl SystemInfo {
    /// Collect identity of the current host
    pub fn collect() -> Self {
        SystemInfo {
            host_name: sysinfo::System::host_name().unwrap_or_else(|| "unknown".to_string()),
            os_name: sysinfo::System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
            os_release: sysinfo::System::os_version().unwrap_or_default(),
            architecture: std::env::consts::ARCH.to_string(),
            collected_at: Local::now(),
        }
    }

    /// Single-line form used in the audit log
    pub fn log_line(&self) -> String {
        format!(
            "Computer: {}, System: {} {}, Architecture: {}",
            self.host_name, self.os_name, self.os_release, self.architecture
        )
    }
}
