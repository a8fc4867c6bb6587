//! Logging for the checker.
//!
//! Console output goes through the `log` facade and `env_logger`. The audit
//! log file is owned by an explicit [`AuditLog`] handle that the checker
//! holds for the lifetime of a session, so the file is opened once at startup
//! and flushed on shutdown.

use chrono::{DateTime, Local};
use log::Level;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Level name as written to the audit log
pub fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// Format one audit log line, including the trailing newline
pub fn format_line(timestamp: &DateTime<Local>, level: Level, message: &str) -> String {
    format!(
        "{} - {} - {}\n",
        timestamp.format(TIMESTAMP_FORMAT),
        level_name(level),
        message
    )
}

/// Install the console logger. Uses the same line layout as the audit log file.
pub fn init_console_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                Local::now().format(TIMESTAMP_FORMAT),
                level_name(record.level()),
                record.args()
            )
        })
        .init();
}

/// Append-only audit log file
pub struct AuditLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl AuditLog {
    /// Open (or create) the audit log for appending
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(AuditLog {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&mut self, message: &str) {
        self.record(Level::Info, message);
    }

    pub fn warn(&mut self, message: &str) {
        self.record(Level::Warn, message);
    }

    pub fn error(&mut self, message: &str) {
        self.record(Level::Error, message);
    }

    /// Echo `message` to the console logger and append it to the file.
    /// A failed write is reported on the console and otherwise ignored.
    pub fn record(&mut self, level: Level, message: &str) {
        log::log!(level, "{}", message);

        let line = format_line(&Local::now(), level, message);
        let written = self
            .writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.flush());
        if let Err(e) = written {
            log::error!("Could not write to audit log {:?}: {}", self.path, e);
        }
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl Drop for AuditLog {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
