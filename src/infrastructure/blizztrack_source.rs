use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::{AppError, AppResult, VersionSource};
use crate::domain::WatchedItem;

pub const DEFAULT_BASE_URL: &str = "https://blizztrack.com";
pub const DEFAULT_REGION: &str = "us";

/// Reads the published client version from the BlizzTrack API.
pub struct BlizzTrackSource {
    client: reqwest::Client,
    base_url: String,
    region: String,
}

impl BlizzTrackSource {
    pub fn new(
        base_url: impl Into<String>,
        region: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("patchpulse")
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            region: region.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct GameResp {
    #[serde(default)]
    name: String,
    #[serde(default)]
    regions: Vec<RegionResp>,
}

#[derive(Debug, Deserialize)]
struct RegionResp {
    region: String,
    #[serde(rename = "versionsname", default)]
    versions_name: String,
}

fn select_version(game: &GameResp, region: &str) -> Option<String> {
    // the API has used both "us" and "US" over time
    game.regions
        .iter()
        .find(|r| r.region.eq_ignore_ascii_case(region))
        .map(|r| r.versions_name.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl VersionSource for BlizzTrackSource {
    async fn current_version(&self, item: &WatchedItem) -> AppResult<String> {
        let source_id = &item.source_id;
        let url = format!("{}/api/{}/info/json", self.base_url, source_id);

        let resp = self
            .client
            .get(url)
            .query(&[("mode", "vers")])
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let game: GameResp = resp
            .json()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        select_version(&game, &self.region).ok_or_else(|| {
            AppError::MissingData(format!(
                "no version for region '{}' in {} ({})",
                self.region, source_id, game.name
            ))
        })
    }

    fn patch_notes_url(&self, item: &WatchedItem) -> String {
        format!("{}/patch_notes/{}/latest", self.base_url, item.source_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(regions: &[(&str, &str)]) -> GameResp {
        GameResp {
            name: "Overwatch".into(),
            regions: regions
                .iter()
                .map(|(r, v)| RegionResp {
                    region: r.to_string(),
                    versions_name: v.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn region_match_ignores_case() {
        let g = game(&[("eu", "1.0.0.1"), ("US", "1.0.0.2")]);
        assert_eq!(select_version(&g, "us").as_deref(), Some("1.0.0.2"));
    }

    #[test]
    fn blank_label_counts_as_missing() {
        let g = game(&[("us", "  ")]);
        assert_eq!(select_version(&g, "us"), None);
    }

    #[test]
    fn missing_region_counts_as_missing() {
        let g = game(&[("kr", "1.0")]);
        assert_eq!(select_version(&g, "us"), None);
    }
}
