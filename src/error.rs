use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while running an external check
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("command timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("command failed with return code: {code}")]
    Failed { code: i32 },

    #[error("could not start command: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("unexpected command output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not start command runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("unsupported platform: {0}")]
    WrongPlatform(String),
}

/// Errors raised while reading the audit log or writing the report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Log file not found: {}", .0.display())]
    LogNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
