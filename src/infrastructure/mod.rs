pub mod blizztrack_source;
pub mod composite_source;
pub mod fake_source;
pub mod json_state_store;
pub mod log_notifier;
pub mod memory_store;
pub mod multi_notifier;
pub mod pushover_notifier;
pub mod scrape_source;
