use std::fmt;

use serde::{Deserialize, Serialize};

/// Pushover delivery credentials, read from the state file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTarget {
    #[serde(rename = "pushoverAppToken", default)]
    pub app_token: String,
    #[serde(rename = "pushoverUserToken", default)]
    pub user_token: String,
    #[serde(rename = "pushoverDevice", default)]
    pub device: String,
}

/// What one item's query produced in a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemOutcome {
    Changed { old: String, new: String },
    Unchanged,
    Failed(String),
}

impl ItemOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, ItemOutcome::Failed(_))
    }
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemOutcome::Changed { old, new } => write!(f, "changed {} -> {}", old, new),
            ItemOutcome::Unchanged => write!(f, "unchanged"),
            ItemOutcome::Failed(e) => write!(f, "failed: {}", e),
        }
    }
}
