/// Compliance counters derived from one scan of the audit log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplianceTally {
    pub password_issues: u32,
    pub update_issues: u32,
    pub total_systems: u32,
}

impl ComplianceTally {
    pub fn total_issues(&self) -> u32 {
        self.password_issues + self.update_issues
    }

    /// Systems without a detected issue. Negative when the log records more
    /// issue markers than sessions.
    pub fn compliant_systems(&self) -> i64 {
        i64::from(self.total_systems) - i64::from(self.total_issues())
    }

    /// Percentage of compliant systems, `None` when no session was logged
    pub fn compliance_rate(&self) -> Option<f64> {
        if self.total_systems == 0 {
            return None;
        }
        Some(self.compliant_systems() as f64 / f64::from(self.total_systems) * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_with_one_issue_in_four() {
        let tally = ComplianceTally {
            password_issues: 1,
            update_issues: 0,
            total_systems: 4,
        };
        assert_eq!(tally.compliant_systems(), 3);
        assert_eq!(format!("{:.1}", tally.compliance_rate().unwrap()), "75.0");
    }

    #[test]
    fn test_rate_undefined_without_sessions() {
        let tally = ComplianceTally::default();
        assert_eq!(tally.compliance_rate(), None);
        assert_eq!(tally.compliant_systems(), 0);
    }

    #[test]
    fn test_more_issues_than_sessions() {
        let tally = ComplianceTally {
            password_issues: 2,
            update_issues: 1,
            total_systems: 1,
        };
        assert_eq!(tally.total_issues(), 3);
        assert_eq!(tally.compliant_systems(), -2);
        assert_eq!(tally.compliance_rate(), Some(-200.0));
    }
}
