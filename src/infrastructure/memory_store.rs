use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::{AppError, AppResult, StateStore};
use crate::domain::WatcherState;

/// Keeps the state in memory and counts saves.
#[derive(Clone, Default)]
pub struct InMemoryStateStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    state: Option<WatcherState>,
    saves: u32,
    fail_saves: bool,
}

impl InMemoryStateStore {
    pub fn new(state: WatcherState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: Some(state),
                ..Inner::default()
            })),
        }
    }

    /// Make every following save fail with a storage error.
    pub fn fail_saves(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_saves = true;
        }
    }

    pub fn save_count(&self) -> u32 {
        self.inner.lock().map(|i| i.saves).unwrap_or(0)
    }

    pub fn snapshot(&self) -> Option<WatcherState> {
        self.inner.lock().ok().and_then(|i| i.state.clone())
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn load(&self) -> AppResult<WatcherState> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| AppError::Storage("lock poisoned".into()))?;
        inner
            .state
            .clone()
            .ok_or_else(|| AppError::NotFound("in-memory state".into()))
    }

    async fn save(&self, state: &WatcherState) -> AppResult<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| AppError::Storage("lock poisoned".into()))?;
        if inner.fail_saves {
            return Err(AppError::Storage("save disabled".into()));
        }
        inner.state = Some(state.clone());
        inner.saves += 1;
        Ok(())
    }
}
