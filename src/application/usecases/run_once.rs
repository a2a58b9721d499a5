use crate::application::usecases::{CheckVersionsUseCase, DispatchNotificationsUseCase};
use crate::application::{AppResult, StateStore};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub skipped: bool,
    pub changes: usize,
    pub errors: usize,
    pub disabled: bool,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
    /// Whether a save was attempted and succeeded.
    pub persisted: bool,
    pub persist_error: Option<String>,
}

pub struct RunOnceUseCase<'a> {
    pub store: &'a dyn StateStore,
    pub check_versions: CheckVersionsUseCase<'a>,
    pub dispatch: DispatchNotificationsUseCase<'a>,
}

impl<'a> RunOnceUseCase<'a> {
    /// Fails only when the state cannot be loaded; nothing is queried or sent then.
    pub async fn execute(&self) -> AppResult<RunSummary> {
        let state = self.store.load().await?;

        let report = self.check_versions.execute(state).await;
        if report.skipped {
            return Ok(RunSummary {
                skipped: true,
                ..RunSummary::default()
            });
        }

        let sent = self.dispatch.dispatch(&report).await;

        let mut summary = RunSummary {
            skipped: false,
            changes: report.changes.len(),
            errors: report.error_count(),
            disabled: report.disabled(),
            notifications_sent: sent.sent,
            notifications_failed: sent.failed,
            persisted: false,
            persist_error: None,
        };

        if report.should_persist() {
            match self.store.save(&report.state).await {
                Ok(()) => summary.persisted = true,
                Err(e) => {
                    tracing::error!("failed to persist state: {e}");
                    summary.persist_error = Some(e.to_string());
                }
            }
        }

        Ok(summary)
    }
}
