#![allow(dead_code)]

use patchpulse::application::{AppError, AppResult, Notifier};
use patchpulse::domain::Message;

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct CountingNotifier {
    sent: Arc<Mutex<Vec<Message>>>,
    fail: bool,
}

impl CountingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn get(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for CountingNotifier {
    async fn notify(&self, message: &Message) -> AppResult<()> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail {
            return Err(AppError::Notifier("pushover unreachable".into()));
        }
        Ok(())
    }
}
