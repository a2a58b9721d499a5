use crate::domain::{Message, WatchedItem, WatcherState};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("missing data: {0}")]
    MissingData(String),
    #[error("state not found: {0}")]
    NotFound(String),
    #[error("malformed state: {0}")]
    Parse(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("notifier error: {0}")]
    Notifier(String),
    #[error("invalid config: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Look up the currently published version of a watched item.
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// A non-empty version label, or `Transport` / `MissingData`.
    async fn current_version(&self, item: &WatchedItem) -> AppResult<String>;

    /// Human-readable patch notes for the same item.
    fn patch_notes_url(&self, item: &WatchedItem) -> String;
}

/// Deliver notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &Message) -> AppResult<()>;
}

/// Load and persist the watcher state.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn load(&self) -> AppResult<WatcherState>;
    async fn save(&self, state: &WatcherState) -> AppResult<()>;
}
