//! Pending Windows update query.

use super::parse_rows;
use serde::Deserialize;

/// Updates offered by Microsoft Update that have not been downloaded yet
pub const UPDATE_QUERY: &str = r#"Import-Module PSWindowsUpdate; Get-WindowsUpdate -MicrosoftUpdate | Where-Object {$_.IsDownloaded -eq $false} | Select-Object Title, @{Name='Size';Expression={"$($_.Size)"}}, @{Name='Priority';Expression={"$($_.Priority)"}} | ConvertTo-Json -Compress"#;

/// One pending update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PendingUpdate {
    pub title: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

impl PendingUpdate {
    /// Line printed to the console for this update
    pub fn display_line(&self) -> String {
        let mut line = format!("  - {}", self.title);
        if let Some(size) = self.size.as_deref().filter(|s| !s.is_empty()) {
            line.push_str(&format!(" [{}]", size));
        }
        if let Some(priority) = self.priority.as_deref().filter(|s| !s.is_empty()) {
            line.push_str(&format!(" (priority {})", priority));
        }
        line
    }
}

/// Empty output means nothing is pending
pub fn parse_updates(raw: &str) -> Result<Vec<PendingUpdate>, serde_json::Error> {
    parse_rows(raw)
}
