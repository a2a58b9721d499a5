use serde::{Deserialize, Serialize};

use super::{NotificationTarget, WatchedItem};

/// Everything the watcher remembers between runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatcherState {
    #[serde(rename = "serviceOn")]
    pub enabled: bool,
    #[serde(rename = "failureCount", default)]
    pub failure_count: u32,
    #[serde(rename = "maxFailures")]
    pub max_failures: u32,
    #[serde(flatten)]
    pub notifier: NotificationTarget,
    #[serde(rename = "gameClients")]
    pub items: Vec<WatchedItem>,
}

impl WatcherState {
    pub fn new(items: Vec<WatchedItem>, max_failures: u32) -> Self {
        Self {
            enabled: true,
            failure_count: 0,
            max_failures,
            notifier: NotificationTarget::default(),
            items,
        }
    }

    pub fn with_notifier(mut self, notifier: NotificationTarget) -> Self {
        self.notifier = notifier;
        self
    }

    /// The threshold actually applied; zero would never trip, so it counts as one.
    pub fn effective_max_failures(&self) -> u32 {
        self.max_failures.max(1)
    }
}
