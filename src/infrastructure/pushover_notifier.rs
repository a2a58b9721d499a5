use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::application::{AppError, AppResult, Notifier};
use crate::domain::{Message, NotificationTarget};

pub const PUSHOVER_URL: &str = "https://api.pushover.net/1/messages.json";

pub struct PushoverNotifier {
    client: reqwest::Client,
    endpoint: String,
    target: NotificationTarget,
}

impl PushoverNotifier {
    pub fn new(target: NotificationTarget, timeout: Duration) -> AppResult<Self> {
        Self::with_endpoint(PUSHOVER_URL, target, timeout)
    }

    pub fn with_endpoint(
        endpoint: impl Into<String>,
        target: NotificationTarget,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            target,
        })
    }
}

#[derive(Debug, Serialize)]
struct PushoverForm<'a> {
    token: &'a str,
    user: &'a str,
    message: &'a str,
    device: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn notify(&self, message: &Message) -> AppResult<()> {
        let form = PushoverForm {
            token: &self.target.app_token,
            user: &self.target.user_token,
            message: &message.body,
            device: &self.target.device,
            title: message.title.as_deref(),
            url: message.url.as_deref(),
        };

        self.client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::Notifier(e.to_string()))?
            .error_for_status()
            .map_err(|e| AppError::Notifier(e.to_string()))?;

        Ok(())
    }
}
