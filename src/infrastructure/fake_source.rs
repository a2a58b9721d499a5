use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::{AppError, AppResult, VersionSource};
use crate::domain::WatchedItem;

/// Scripted version source. Unknown ids fail with `Transport`.
#[derive(Clone, Default)]
pub struct FakeVersionSource {
    answers: HashMap<String, Result<String, String>>,
    queries: Arc<AtomicUsize>,
}

impl FakeVersionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, source_id: &str, version: &str) -> Self {
        self.answers
            .insert(source_id.to_string(), Ok(version.to_string()));
        self
    }

    pub fn with_error(mut self, source_id: &str, message: &str) -> Self {
        self.answers
            .insert(source_id.to_string(), Err(message.to_string()));
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VersionSource for FakeVersionSource {
    async fn current_version(&self, item: &WatchedItem) -> AppResult<String> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        match self.answers.get(&item.source_id) {
            Some(Ok(v)) => Ok(v.clone()),
            Some(Err(e)) => Err(AppError::Transport(e.clone())),
            None => Err(AppError::Transport(format!(
                "no answer scripted for {}",
                item.source_id
            ))),
        }
    }

    fn patch_notes_url(&self, item: &WatchedItem) -> String {
        format!("https://example.com/patch_notes/{}/latest", item.source_id)
    }
}
