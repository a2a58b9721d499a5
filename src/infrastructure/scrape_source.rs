use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::application::{AppError, AppResult, VersionSource};
use crate::domain::WatchedItem;

/// Reads the version from an item's own web page: the text of the first
/// element matching the item's CSS selector.
pub struct ScrapeSource {
    client: reqwest::Client,
}

impl ScrapeSource {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("patchpulse")
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self { client })
    }
}

/// Html is not Send, so parsing stays in a plain function off the await path.
fn extract_version(html: &str, selector: &str, url: &str) -> AppResult<String> {
    let sel = Selector::parse(selector)
        .map_err(|e| AppError::Config(format!("invalid selector '{selector}': {e:?}")))?;
    let document = Html::parse_document(html);

    let text = document
        .select(&sel)
        .next()
        .map(|el| el.text().collect::<String>())
        .ok_or_else(|| {
            AppError::MissingData(format!("selector '{selector}' did not match on {url}"))
        })?;

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::MissingData(format!(
            "selector '{selector}' matched an empty element on {url}"
        )));
    }
    Ok(text.to_string())
}

#[async_trait]
impl VersionSource for ScrapeSource {
    async fn current_version(&self, item: &WatchedItem) -> AppResult<String> {
        let (url, selector) = match (&item.url, &item.selector) {
            (Some(url), Some(selector)) => (url, selector),
            _ => {
                return Err(AppError::Config(format!(
                    "{} needs both url and selector to be scraped",
                    item.name
                )))
            }
        };

        let html = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| AppError::Transport(e.to_string()))?
            .text()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        extract_version(&html, selector, url)
    }

    fn patch_notes_url(&self, item: &WatchedItem) -> String {
        item.url.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <div class="patch-notes">
          <h2 class="patch-title"> Overwatch 2 Retail Patch - 1.4.2 </h2>
          <h2 class="patch-title">Older patch</h2>
        </div>
    </body></html>"#;

    #[test]
    fn takes_trimmed_text_of_first_match() {
        let v = extract_version(PAGE, "h2.patch-title", "https://example.com").unwrap();
        assert_eq!(v, "Overwatch 2 Retail Patch - 1.4.2");
    }

    #[test]
    fn no_match_is_missing_data() {
        let err = extract_version(PAGE, "h1.nothing", "https://example.com").unwrap_err();
        assert!(matches!(err, AppError::MissingData(_)), "got {err:?}");
    }

    #[test]
    fn bad_selector_is_config_error() {
        let err = extract_version(PAGE, "h2[", "https://example.com").unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "got {err:?}");
    }
}
