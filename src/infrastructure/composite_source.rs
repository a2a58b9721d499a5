use async_trait::async_trait;

use crate::application::{AppResult, VersionSource};
use crate::domain::WatchedItem;

/// Routes items with a page selector to the scraper and the rest to the API.
pub struct CompositeVersionSource {
    api: Box<dyn VersionSource>,
    scrape: Box<dyn VersionSource>,
}

impl CompositeVersionSource {
    pub fn new(api: Box<dyn VersionSource>, scrape: Box<dyn VersionSource>) -> Self {
        Self { api, scrape }
    }

    fn route(&self, item: &WatchedItem) -> &dyn VersionSource {
        if item.is_scraped() {
            self.scrape.as_ref()
        } else {
            self.api.as_ref()
        }
    }
}

#[async_trait]
impl VersionSource for CompositeVersionSource {
    async fn current_version(&self, item: &WatchedItem) -> AppResult<String> {
        self.route(item).current_version(item).await
    }

    fn patch_notes_url(&self, item: &WatchedItem) -> String {
        self.route(item).patch_notes_url(item)
    }
}
