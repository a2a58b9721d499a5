use async_trait::async_trait;

use crate::application::{AppResult, Notifier};
use crate::domain::Message;

/// Writes notifications into the log instead of delivering them.
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, message: &Message) -> AppResult<()> {
        tracing::info!(
            title = message.title.as_deref().unwrap_or("(none)"),
            url = message.url.as_deref().unwrap_or("(none)"),
            "NOTIFY: {}",
            message.body
        );
        Ok(())
    }
}
