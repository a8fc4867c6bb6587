pub mod checker;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod markers;
pub mod models;
pub mod report;

// Re-export commonly used types
pub use checker::{Checker, Mode};
pub use command::{CommandOutput, CommandRunner, ProcessRunner};
pub use config::Config;
pub use error::{CheckError, ReportError};
pub use logging::AuditLog;
pub use models::{CheckKind, CheckResult, ComplianceTally, Outcome, SystemInfo};
