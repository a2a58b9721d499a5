use async_trait::async_trait;

use crate::application::{AppError, AppResult, Notifier};
use crate::domain::Message;

/// Sends every message through each named channel in order.
pub struct MultiNotifier {
    channels: Vec<(String, Box<dyn Notifier>)>,
}

impl MultiNotifier {
    pub fn new() -> Self {
        Self { channels: vec![] }
    }

    pub fn with_channel(mut self, name: impl Into<String>, notifier: Box<dyn Notifier>) -> Self {
        self.channels.push((name.into(), notifier));
        self
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl Default for MultiNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MultiNotifier {
    /// Every channel is tried; the error names each channel that failed.
    async fn notify(&self, message: &Message) -> AppResult<()> {
        let mut failures = vec![];

        for (name, n) in &self.channels {
            if let Err(e) = n.notify(message).await {
                tracing::warn!(channel = %name, "delivery failed: {e}");
                failures.push(format!("{name}: {e}"));
            }
        }

        if failures.is_empty() {
            return Ok(());
        }
        Err(AppError::Notifier(failures.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recording {
        seen: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for Recording {
        async fn notify(&self, message: &Message) -> AppResult<()> {
            self.seen.lock().unwrap().push(message.body.clone());
            if self.fail {
                return Err(AppError::Notifier("HTTP 503".into()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn failing_channel_does_not_stop_later_ones() {
        let broken = Recording {
            fail: true,
            ..Recording::default()
        };
        let log = Recording::default();
        let multi = MultiNotifier::new()
            .with_channel("pushover", Box::new(broken.clone()))
            .with_channel("log", Box::new(log.clone()));

        let err = multi
            .notify(&Message::service_disabled())
            .await
            .unwrap_err();

        assert_eq!(broken.seen.lock().unwrap().len(), 1);
        assert_eq!(log.seen.lock().unwrap().len(), 1);
        match err {
            AppError::Notifier(msg) => {
                assert!(msg.starts_with("pushover:"), "got {msg}");
                assert!(msg.contains("HTTP 503"));
                assert!(!msg.contains("log:"));
            }
            other => panic!("expected notifier error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn all_channels_ok_is_ok() {
        let multi = MultiNotifier::new()
            .with_channel("a", Box::new(Recording::default()))
            .with_channel("b", Box::new(Recording::default()));

        assert!(multi.notify(&Message::service_disabled()).await.is_ok());
        assert_eq!(multi.channel_names(), vec!["a", "b"]);
    }
}
