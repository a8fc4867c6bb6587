//! Local account password-expiry query and classification.

use super::parse_rows;
use crate::markers;
use serde::Deserialize;

/// Enabled local accounts with their expiry rendered as text.
///
/// `PasswordExpires` is an ISO date, `Never` when the account carries the
/// DONT_EXPIRE_PASSWD flag, or null when no expiry is set at all.
pub const PASSWORD_QUERY: &str = r#"Get-LocalUser | Where-Object {$_.Enabled -eq $true} | Select-Object Name, @{Name='PasswordExpires';Expression={ if ($_.PasswordExpires) { $_.PasswordExpires.ToString('o') } elseif (([ADSI]"WinNT://$env:COMPUTERNAME/$($_.Name),user").UserFlags.Value -band 0x10000) { 'Never' } else { $null } }}, @{Name='PasswordLastSet';Expression={ if ($_.PasswordLastSet) { $_.PasswordLastSet.ToString('o') } else { $null } }} | ConvertTo-Json -Compress"#;

/// One enabled local account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountRow {
    pub name: String,
    #[serde(default)]
    pub password_expires: Option<String>,
    #[serde(default)]
    pub password_last_set: Option<String>,
}

impl AccountRow {
    fn never_expires(&self) -> bool {
        self.password_expires
            .as_deref()
            .map(|v| v.trim().eq_ignore_ascii_case("never"))
            .unwrap_or(false)
    }

    fn expiry_unset(&self) -> bool {
        self.password_expires
            .as_deref()
            .map(|v| v.trim().is_empty() || v.trim().eq_ignore_ascii_case("null"))
            .unwrap_or(true)
    }
}

/// Worst password-expiry finding across all accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordFinding {
    NeverExpires,
    NoExpirationSet,
    Configured,
}

impl PasswordFinding {
    /// Message written to the audit log for this finding
    pub fn log_message(&self) -> &'static str {
        match self {
            PasswordFinding::NeverExpires => markers::PASSWORDS_NEVER_EXPIRE,
            PasswordFinding::NoExpirationSet => markers::PASSWORDS_NO_EXPIRATION,
            PasswordFinding::Configured => "Password expiration policies are configured correctly",
        }
    }
}

pub fn parse_accounts(raw: &str) -> Result<Vec<AccountRow>, serde_json::Error> {
    parse_rows(raw)
}

/// `NeverExpires` wins over `NoExpirationSet`
pub fn classify(rows: &[AccountRow]) -> PasswordFinding {
    if rows.iter().any(AccountRow::never_expires) {
        PasswordFinding::NeverExpires
    } else if rows.iter().any(AccountRow::expiry_unset) {
        PasswordFinding::NoExpirationSet
    } else {
        PasswordFinding::Configured
    }
}
