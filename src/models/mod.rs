pub mod check;
pub mod tally;

pub use check::{CheckKind, CheckResult, Outcome, SystemInfo};
pub use tally::ComplianceTally;
