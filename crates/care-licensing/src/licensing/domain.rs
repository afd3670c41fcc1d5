use serde::{Deserialize, Serialize};

/// Identifier wrapper for license applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// String-valued status column of an application. The workflow is bounded:
/// an application is either still being worked (`Open`) or done (`Closed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Open,
    Closed,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Open => "open",
            ApplicationStatus::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(ApplicationStatus::Open),
            "closed" => Some(ApplicationStatus::Closed),
            _ => None,
        }
    }
}

/// A license application row as read from the store. Rows are owned by the
/// store and never cached across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseApplication {
    pub id: ApplicationId,
    pub client_id: String,
    pub status: ApplicationStatus,
    /// Completion metric in `[0, 100]`; the schema allows null.
    pub progress_percentage: Option<u8>,
}

impl LicenseApplication {
    /// Absent progress is treated as zero.
    pub fn progress(&self) -> u8 {
        self.progress_percentage.unwrap_or(0)
    }

    pub fn is_closed(&self) -> bool {
        self.status == ApplicationStatus::Closed
    }
}
