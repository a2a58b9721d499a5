use futures::future::join_all;

use crate::application::{AppError, AppResult, VersionSource};
use crate::domain::{ChangeEvent, FailureTransition, ItemOutcome, WatchedItem, WatcherState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemReport {
    pub source_id: String,
    pub name: String,
    pub outcome: ItemOutcome,
}

/// Result of one watcher pass. Carries the (possibly mutated) state back to the caller.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub state: WatcherState,
    /// True when the service was already off and nothing was queried.
    pub skipped: bool,
    pub items: Vec<ItemReport>,
    pub changes: Vec<ChangeEvent>,
    pub transition: FailureTransition,
}

impl RunReport {
    pub fn any_error(&self) -> bool {
        self.items.iter().any(|i| i.outcome.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_error()).count()
    }

    pub fn disabled(&self) -> bool {
        self.transition == FailureTransition::Disabled
    }

    /// Persist on any change, error, counter reset or disablement.
    pub fn should_persist(&self) -> bool {
        !self.skipped
            && (!self.changes.is_empty() || self.any_error() || self.transition.changed_state())
    }
}

pub struct CheckVersionsUseCase<'a> {
    pub source: &'a dyn VersionSource,
}

impl<'a> CheckVersionsUseCase<'a> {
    pub async fn execute(&self, mut state: WatcherState) -> RunReport {
        if !state.enabled {
            tracing::info!("service is off, skipping version checks");
            return RunReport {
                state,
                skipped: true,
                items: vec![],
                changes: vec![],
                transition: FailureTransition::None,
            };
        }

        // fan out, then merge only once every query has returned
        let results: Vec<AppResult<String>> = join_all(
            state
                .items
                .iter()
                .map(move |item| self.query(item)),
        )
        .await;

        let mut items = Vec::with_capacity(results.len());
        let mut changes = vec![];

        for (item, result) in state.items.iter_mut().zip(results) {
            let outcome = match result {
                Err(e) => {
                    tracing::error!(item = %item.name, source_id = %item.source_id, "{e}");
                    ItemOutcome::Failed(e.to_string())
                }
                Ok(latest) if latest == item.version => ItemOutcome::Unchanged,
                Ok(latest) => {
                    tracing::info!(
                        item = %item.name,
                        old = %item.version,
                        new = %latest,
                        "new version detected"
                    );
                    let old = std::mem::replace(&mut item.version, latest.clone());
                    changes.push(ChangeEvent {
                        source_id: item.source_id.clone(),
                        name: item.name.clone(),
                        old_version: old.clone(),
                        new_version: latest.clone(),
                        url: self.source.patch_notes_url(item),
                    });
                    ItemOutcome::Changed { old, new: latest }
                }
            };
            tracing::debug!(item = %item.name, outcome = %outcome, "checked");
            items.push(ItemReport {
                source_id: item.source_id.clone(),
                name: item.name.clone(),
                outcome,
            });
        }

        let had_errors = items.iter().any(|i| i.outcome.is_error());
        let transition = state.record_run(had_errors);
        match transition {
            FailureTransition::Incremented { failure_count } => tracing::warn!(
                "service has failed {} times consecutively; \
                 it will be turned off after {} consecutive failures",
                failure_count,
                state.effective_max_failures()
            ),
            FailureTransition::Reset => {
                tracing::info!("consecutive failure count reset to 0 after checking all clients")
            }
            FailureTransition::Disabled => {
                tracing::warn!("service has been turned off after too many consecutive failures")
            }
            FailureTransition::None => {}
        }

        RunReport {
            state,
            skipped: false,
            items,
            changes,
            transition,
        }
    }

    async fn query(&self, item: &WatchedItem) -> AppResult<String> {
        let version = self.source.current_version(item).await?;
        // an empty label would compare as "unchanged" forever
        if version.is_empty() {
            return Err(AppError::MissingData(format!(
                "empty version returned for {}",
                item.source_id
            )));
        }
        Ok(version)
    }
}
