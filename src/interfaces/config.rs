use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::infrastructure::blizztrack_source::{DEFAULT_BASE_URL, DEFAULT_REGION};

/// Process settings. The watcher state (items, credentials, counters) lives in
/// the state file, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub state_path: PathBuf,
    pub log_path: PathBuf,
    pub region: String,
    pub timeout: Duration,
    pub source_url: String,
    pub dry_run: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("config.json"),
            log_path: PathBuf::from("patchpulse.log"),
            region: DEFAULT_REGION.to_string(),
            timeout: Duration::from_secs(10),
            source_url: DEFAULT_BASE_URL.to_string(),
            dry_run: false,
        }
    }
}

impl Settings {
    /// Validates values and anchors relative paths at `workdir`, if given.
    pub fn resolve(mut self, workdir: Option<&Path>) -> anyhow::Result<Self> {
        if self.region.trim().is_empty() {
            anyhow::bail!("region must not be empty");
        }
        if self.timeout.is_zero() {
            anyhow::bail!("timeout must be greater than zero");
        }
        if self.source_url.trim().is_empty() {
            anyhow::bail!("source url must not be empty");
        }
        if let Some(dir) = workdir {
            self.state_path = anchor(dir, self.state_path);
            self.log_path = anchor(dir, self.log_path);
        }
        Ok(self)
    }
}

fn anchor(dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_are_anchored_at_workdir() {
        let s = Settings::default()
            .resolve(Some(Path::new("/srv/patchpulse")))
            .unwrap();
        assert_eq!(s.state_path, PathBuf::from("/srv/patchpulse/config.json"));
        assert_eq!(s.log_path, PathBuf::from("/srv/patchpulse/patchpulse.log"));
    }

    #[test]
    fn absolute_paths_are_kept() {
        let s = Settings {
            state_path: PathBuf::from("/etc/patchpulse.json"),
            ..Settings::default()
        }
        .resolve(Some(Path::new("/srv")))
        .unwrap();
        assert_eq!(s.state_path, PathBuf::from("/etc/patchpulse.json"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let s = Settings {
            timeout: Duration::ZERO,
            ..Settings::default()
        };
        assert!(s.resolve(None).is_err());
    }
}
