use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default location of the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "winaudit.toml";

/// Errors that can occur while loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Configuration shared by the checker and the report generator
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Checker (audit / monitor) configuration
    #[serde(default)]
    pub checker: CheckerConfig,
    /// Report generator configuration
    #[serde(default)]
    pub report: ReportConfig,
}

/// Checker configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckerConfig {
    /// File the audit log is appended to
    pub log_path: PathBuf,
    /// PowerShell executable used for both queries
    pub powershell: String,
    /// Hard limit on each external command, in seconds
    pub command_timeout_secs: u64,
    /// Pause between monitoring cycles, in seconds
    pub monitor_interval_secs: u64,
}

/// Report generator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Audit log produced by the checker
    pub log_path: PathBuf,
    /// Where the text report is written
    pub output_path: PathBuf,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            log_path: PathBuf::from("audit_monitor.log"),
            powershell: "powershell".to_string(),
            command_timeout_secs: 30,
            monitor_interval_secs: 300,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            log_path: PathBuf::from("../Audit and Monitor/audit_monitor.log"),
            output_path: PathBuf::from("compliance_report.txt"),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load the configuration at `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Config::from_file(path)
        } else {
            log::warn!("Config file {:?} not found, using defaults", path);
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.checker.command_timeout_secs, 30);
        assert_eq!(config.checker.monitor_interval_secs, 300);
        assert_eq!(config.checker.log_path, PathBuf::from("audit_monitor.log"));
        assert_eq!(
            config.report.log_path,
            PathBuf::from("../Audit and Monitor/audit_monitor.log")
        );
        assert_eq!(config.report.output_path, PathBuf::from("compliance_report.txt"));
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("winaudit.toml");

        let mut config = Config::default();
        config.checker.command_timeout_secs = 5;
        config.report.output_path = PathBuf::from("out.txt");
        config.to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("winaudit.toml");
        std::fs::write(&path, "[checker]\nmonitor_interval_secs = 60\n").unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.checker.monitor_interval_secs, 60);
        assert_eq!(loaded.checker.command_timeout_secs, 30);
        assert_eq!(loaded.report, ReportConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let loaded = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("winaudit.toml");
        std::fs::write(&path, "checker = 12").unwrap();

        assert!(matches!(Config::from_file(&path), Err(ConfigError::Parse(_))));
    }
}
