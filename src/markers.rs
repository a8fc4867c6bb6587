//! Marker phrases shared by the checker and the report generator.
//!
//! The report generator classifies log content by exact substring match, so
//! these strings are part of the log format and must not change.

pub const PASSWORDS_NEVER_EXPIRE: &str = "CRITICAL: Some passwords never expire";
pub const PASSWORDS_NO_EXPIRATION: &str = "CRITICAL: Some passwords have no expiration set";
pub const UPDATES_AVAILABLE: &str = "CRITICAL: Windows updates are available";

/// Logged once at the start of every audit session
pub const AUDIT_SESSION: &str = "Running Windows security audit";
/// Logged once at the start of every monitoring session
pub const MONITOR_SESSION: &str = "Starting Windows security monitoring";
