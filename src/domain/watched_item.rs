use serde::{Deserialize, Serialize};

/// One game client being watched for new builds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedItem {
    pub name: String,
    #[serde(rename = "blizztrackId")]
    pub source_id: String, // key passed to the version source
    #[serde(default)]
    pub version: String, // last version we notified about
    /// Page to scrape instead of asking the API; also the notification link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// CSS selector whose first match holds the version text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
}

impl WatchedItem {
    pub fn new(
        name: impl Into<String>,
        source_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_id: source_id.into(),
            version: version.into(),
            url: None,
            selector: None,
        }
    }

    pub fn with_page(mut self, url: impl Into<String>, selector: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self.selector = Some(selector.into());
        self
    }

    pub fn is_scraped(&self) -> bool {
        self.selector.is_some()
    }
}
