use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::application::{AppError, AppResult, StateStore};
use crate::domain::WatcherState;

/// Watcher state kept in a pretty-printed JSON file.
///
/// Saves go through a sibling temp file that is synced and then renamed over
/// the target, so a crash mid-write leaves the previous state intact.
pub struct JsonFileStateStore {
    path: PathBuf,
}

impl JsonFileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl StateStore for JsonFileStateStore {
    async fn load(&self) -> AppResult<WatcherState> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AppError::NotFound(self.path.display().to_string()),
                _ => AppError::Storage(format!("read '{}': {e}", self.path.display())),
            })?;

        serde_json::from_str(&raw)
            .map_err(|e| AppError::Parse(format!("'{}': {e}", self.path.display())))
    }

    async fn save(&self, state: &WatcherState) -> AppResult<()> {
        let data = serde_json::to_vec_pretty(state)
            .map_err(|e| AppError::Storage(format!("serialize state: {e}")))?;
        let tmp_path = self.tmp_path();

        let result = match write_synced(&tmp_path, &data).await {
            Ok(()) => tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
                AppError::Storage(format!(
                    "rename '{}' to '{}': {e}",
                    tmp_path.display(),
                    self.path.display()
                ))
            }),
            Err(e) => Err(e),
        };

        if result.is_err() {
            // the previous state file is untouched; only the partial temp goes
            let _ = tokio::fs::remove_file(&tmp_path).await;
        }
        result
    }
}

async fn write_synced(path: &Path, data: &[u8]) -> AppResult<()> {
    let mut file = tokio::fs::File::create(path).await.map_err(|e| {
        AppError::Storage(format!("create temp file '{}': {e}", path.display()))
    })?;
    file.write_all(data)
        .await
        .map_err(|e| AppError::Storage(format!("write temp file: {e}")))?;
    file.sync_all()
        .await
        .map_err(|e| AppError::Storage(format!("sync temp file: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NotificationTarget, WatchedItem};

    fn sample() -> WatcherState {
        WatcherState::new(
            vec![
                WatchedItem::new("Live", "pro", "1.0"),
                WatchedItem::new("PTR", "prot", "1.1"),
            ],
            3,
        )
        .with_notifier(NotificationTarget {
            app_token: "app".into(),
            user_token: "user".into(),
            device: "phone".into(),
        })
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStateStore::new(dir.path().join("config.json"));
        assert!(matches!(store.load().await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStateStore::new(path);
        assert!(matches!(store.load().await, Err(AppError::Parse(_))));
    }

    #[tokio::test]
    async fn save_then_load_gives_back_same_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStateStore::new(dir.path().join("config.json"));
        let state = sample();

        store.save(&state).await.unwrap();
        assert_eq!(store.load().await.unwrap(), state);
        assert!(!store.tmp_path().exists());
    }

    #[tokio::test]
    async fn failed_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // a non-empty directory in place of the state file makes the rename fail
        let path = dir.path().join("config.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();
        let store = JsonFileStateStore::new(&path);

        let err = store.save(&sample()).await.unwrap_err();

        assert!(matches!(err, AppError::Storage(_)), "got {err:?}");
        assert!(!store.tmp_path().exists());
        assert!(path.join("keep").exists());
    }

    #[tokio::test]
    async fn save_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStateStore::new(dir.path().join("config.json"));
        let mut state = sample();
        store.save(&state).await.unwrap();

        state.items[0].version = "2.0".into();
        state.failure_count = 1;
        store.save(&state).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.items[0].version, "2.0");
        assert_eq!(loaded.failure_count, 1);
    }
}
