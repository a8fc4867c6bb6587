//! Password-expiration and Windows Update checks.
//!
//! A [`Checker`] owns the command runner and the audit log for one session.
//! Every failure inside a check is logged and turned into an
//! [`Outcome::Error`] result; nothing here terminates the process.

pub mod password;
pub mod updates;

pub use password::{AccountRow, PasswordFinding};
pub use updates::PendingUpdate;

use crate::command::CommandRunner;
use crate::config::CheckerConfig;
use crate::error::CheckError;
use crate::logging::AuditLog;
use crate::markers;
use crate::models::{CheckKind, CheckResult, Outcome, SystemInfo};
use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// The only OS the checker supports
pub const REQUIRED_OS: &str = "windows";

const SLEEP_SLICE: Duration = Duration::from_secs(1);

/// Fail with `WrongPlatform` unless `os` is Windows
pub fn ensure_platform(os: &str) -> Result<(), CheckError> {
    if os.eq_ignore_ascii_case(REQUIRED_OS) {
        Ok(())
    } else {
        Err(CheckError::WrongPlatform(os.to_string()))
    }
}

/// Operating mode selected by the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Audit,
    Monitor,
}

impl Mode {
    /// Parse an answer to the interactive menu. Only `1` and `2` are valid;
    /// anything else is returned as the rejected choice.
    pub fn from_choice(choice: &str) -> Result<Self, String> {
        match choice.trim() {
            "1" => Ok(Mode::Audit),
            "2" => Ok(Mode::Monitor),
            other => Err(other.to_string()),
        }
    }
}

/// `--mode` form: also accepts `audit` / `monitor`
impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice = s.trim();
        match choice.to_lowercase().as_str() {
            "1" | "audit" => Ok(Mode::Audit),
            "2" | "monitor" => Ok(Mode::Monitor),
            _ => Err(choice.to_string()),
        }
    }
}

/// PowerShell emits a bare object for one row and an array for several
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Parse `ConvertTo-Json` output into rows; blank output is an empty list
pub(crate) fn parse_rows<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, serde_json::Error> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    Ok(match serde_json::from_str::<OneOrMany<T>>(raw)? {
        OneOrMany::Many(rows) => rows,
        OneOrMany::One(row) => vec![row],
    })
}

/// Runs the host checks and records their outcome
pub struct Checker<R: CommandRunner> {
    runner: R,
    log: AuditLog,
    powershell: String,
    monitor_interval: Duration,
}

impl<R: CommandRunner> Checker<R> {
    pub fn new(runner: R, log: AuditLog, config: &CheckerConfig) -> Self {
        Checker {
            runner,
            log,
            powershell: config.powershell.clone(),
            monitor_interval: Duration::from_secs(config.monitor_interval_secs),
        }
    }

    pub fn log_mut(&mut self) -> &mut AuditLog {
        &mut self.log
    }

    /// Check that enabled local accounts have password expiry configured
    pub fn check_password_expiration(&mut self) -> CheckResult {
        self.password_check(None)
    }

    /// Check for updates that are available but not yet downloaded
    pub fn check_windows_updates(&mut self) -> CheckResult {
        self.update_check(None)
    }

    fn password_check(&mut self, running: Option<&AtomicBool>) -> CheckResult {
        println!("\nChecking password expiration");

        let raw = match self.powershell(password::PASSWORD_QUERY) {
            Ok(raw) => raw,
            Err(e) => return self.failure(CheckKind::PasswordExpiration, e, running),
        };

        let rows = match password::parse_accounts(&raw) {
            Ok(rows) => rows,
            Err(e) => return self.failure(CheckKind::PasswordExpiration, e.into(), running),
        };

        if rows.is_empty() {
            let message = "No password information found in output";
            self.log.warn(message);
            println!("❌ No password information found");
            return CheckResult::new(CheckKind::PasswordExpiration, Outcome::Error, raw, message);
        }

        println!("Password information retrieved:");
        for row in &rows {
            println!(
                "  {:<24} expires: {:<28} last set: {}",
                row.name,
                row.password_expires.as_deref().unwrap_or("(not set)"),
                row.password_last_set.as_deref().unwrap_or("(unknown)")
            );
        }

        let finding = password::classify(&rows);
        let message = finding.log_message();
        let outcome = match finding {
            PasswordFinding::Configured => {
                self.log.info(message);
                println!("\n✅ Password expiration policies are configured");
                Outcome::Compliant
            }
            PasswordFinding::NeverExpires | PasswordFinding::NoExpirationSet => {
                self.log.warn(message);
                println!("\n🔴 {}", message);
                Outcome::Warning
            }
        };

        CheckResult::new(CheckKind::PasswordExpiration, outcome, raw, message)
    }

    fn update_check(&mut self, running: Option<&AtomicBool>) -> CheckResult {
        println!("\nChecking Windows updates");

        let raw = match self.powershell(updates::UPDATE_QUERY) {
            Ok(raw) => raw,
            Err(e) => return self.failure(CheckKind::WindowsUpdates, e, running),
        };

        let pending = match updates::parse_updates(&raw) {
            Ok(pending) => pending,
            Err(e) => return self.failure(CheckKind::WindowsUpdates, e.into(), running),
        };

        if pending.is_empty() {
            let message = "No Windows updates available";
            self.log.info(message);
            println!("✅ OK: No Windows updates available");
            return CheckResult::new(CheckKind::WindowsUpdates, Outcome::Compliant, raw, message);
        }

        self.log.warn(markers::UPDATES_AVAILABLE);
        println!("🔴 {}", markers::UPDATES_AVAILABLE);
        println!("\nAvailable updates:");
        for update in &pending {
            println!("{}", update.display_line());
        }

        CheckResult::new(
            CheckKind::WindowsUpdates,
            Outcome::Warning,
            raw,
            markers::UPDATES_AVAILABLE,
        )
    }

    /// Print host identity and record it in the audit log
    pub fn print_system_info(&mut self) -> SystemInfo {
        let info = SystemInfo::collect();

        println!("\nSystem Information:");
        println!("Computer Name: {}", info.host_name);
        println!("Operating System: {} {}", info.os_name, info.os_release);
        println!("Architecture: {}", info.architecture);
        println!("Current Time: {}", info.collected_at.format("%Y-%m-%d %H:%M:%S"));
        println!("{}", "-".repeat(50));
        self.log.info(&info.log_line());

        info
    }

    /// One pass over both checks
    pub fn run_audit(&mut self) -> Vec<CheckResult> {
        println!("{}", markers::AUDIT_SESSION);
        println!("{}", "=".repeat(50));

        self.print_system_info();
        self.log.info(markers::AUDIT_SESSION);
        let results = vec![self.check_password_expiration(), self.check_windows_updates()];

        println!("\nAudit completed");
        self.shutdown();
        results
    }

    /// Repeat both checks every monitor interval until `running` is cleared
    pub fn run_monitor(&mut self, running: &AtomicBool) {
        let interval = describe_interval(self.monitor_interval);
        println!("{} (checking every {})", markers::MONITOR_SESSION, interval);
        println!("Press Ctrl+C to stop");
        println!("{}", "=".repeat(50));

        self.print_system_info();
        self.log
            .info(&format!("{} (checking every {})", markers::MONITOR_SESSION, interval));

        while running.load(Ordering::SeqCst) {
            println!(
                "\n[{}] Running security checks",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            );
            self.password_check(Some(running));
            if !running.load(Ordering::SeqCst) {
                break;
            }
            self.update_check(Some(running));

            println!("\n{}", "=".repeat(50));
            self.sleep_while_running(running);
        }

        self.log.info("Monitoring stopped by user");
        println!("\nMonitoring stopped");
        self.shutdown();
    }

    /// Run the mode picked at the menu, or report the rejected choice
    pub fn run_choice(&mut self, choice: Result<Mode, String>, running: &AtomicBool) {
        match choice {
            Ok(Mode::Audit) => {
                self.run_audit();
            }
            Ok(Mode::Monitor) => self.run_monitor(running),
            Err(choice) => {
                self.print_system_info();
                self.log.warn(&format!("Invalid choice selected: {}", choice));
                println!("Invalid choice. Exiting.");
                self.shutdown();
            }
        }
    }

    /// Flush the audit log
    pub fn shutdown(&mut self) {
        if let Err(e) = self.log.flush() {
            log::error!("Could not flush audit log {:?}: {}", self.log.path(), e);
        }
    }

    fn sleep_while_running(&self, running: &AtomicBool) {
        let mut remaining = self.monitor_interval;
        while !remaining.is_zero() && running.load(Ordering::SeqCst) {
            let slice = remaining.min(SLEEP_SLICE);
            std::thread::sleep(slice);
            remaining -= slice;
        }
    }

    fn powershell(&self, script: &str) -> Result<String, CheckError> {
        self.runner
            .run(
                &self.powershell,
                &["-NoProfile", "-NonInteractive", "-Command", script],
            )?
            .into_stdout()
    }

    /// Log a failed check and convert it into an error result.
    /// A failure caused by the monitor being interrupted is not logged.
    fn failure(
        &mut self,
        kind: CheckKind,
        err: CheckError,
        running: Option<&AtomicBool>,
    ) -> CheckResult {
        if running.map_or(false, |r| !r.load(Ordering::SeqCst)) {
            log::debug!("{} check interrupted: {}", kind, err);
            return CheckResult::new(kind, Outcome::Error, String::new(), "interrupted");
        }

        let (label, short) = match kind {
            CheckKind::PasswordExpiration => ("Password expiration check", "Password check"),
            CheckKind::WindowsUpdates => ("Windows update check", "Windows update check"),
        };

        let (message, console) = match &err {
            CheckError::Timeout { .. } => (
                format!("{} timed out", label),
                format!("❌ {} timed out", short),
            ),
            CheckError::Failed { code } => (
                format!("{} failed with return code: {}", label, code),
                format!("❌ Could not check {}", kind),
            ),
            other => (
                format!("Error checking {}: {}", kind, other),
                format!("❌ Error checking {}: {}", kind, other),
            ),
        };

        self.log.error(&message);
        println!("{}", console);
        CheckResult::new(kind, Outcome::Error, String::new(), message)
    }
}

/// `5 minutes`, `90 seconds`, `1 minute`
fn describe_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    match secs {
        60 => "1 minute".to_string(),
        s if s > 0 && s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "1 second".to_string(),
        s => format!("{} seconds", s),
    }
}
