use crate::application::{AppResult, Notifier};
use crate::application::usecases::RunReport;
use crate::domain::{ChangeEvent, Message};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub sent: usize,
    pub failed: usize,
}

pub struct DispatchNotificationsUseCase<'a> {
    pub notifier: &'a dyn Notifier,
}

impl<'a> DispatchNotificationsUseCase<'a> {
    pub async fn notify_change(&self, event: &ChangeEvent) -> AppResult<()> {
        self.notifier.notify(&Message::for_change(event)).await
    }

    pub async fn notify_disabled(&self) -> AppResult<()> {
        self.notifier.notify(&Message::service_disabled()).await
    }

    /// Sends one message per change plus the disablement warning if the run tripped it.
    /// Delivery failures are logged and counted, never propagated.
    pub async fn dispatch(&self, report: &RunReport) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for event in &report.changes {
            match self.notify_change(event).await {
                Ok(()) => summary.sent += 1,
                Err(e) => {
                    tracing::error!(item = %event.name, "failed to send change notification: {e}");
                    summary.failed += 1;
                }
            }
        }

        if report.disabled() {
            match self.notify_disabled().await {
                Ok(()) => summary.sent += 1,
                Err(e) => {
                    tracing::error!("failed to send disablement notification: {e}");
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}
