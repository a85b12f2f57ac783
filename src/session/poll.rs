use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{DashboardSession, WidgetQuery};
use crate::widgets::Resource;

/// A running poller. Dropping the handle stops it.
#[derive(Debug)]
pub struct PollHandle {
    resource: Resource,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Refreshes `resource` every `every`, starting one period from now.
///
/// Failures are logged and the next tick tries again.
pub(super) fn spawn(
    session: DashboardSession,
    resource: Resource,
    query: WidgetQuery,
    every: Duration,
) -> PollHandle {
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; the initial load is the caller's.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match session.refresh(resource, query).await {
                Ok(()) => tracing::debug!(%resource, "poll refresh"),
                Err(e) => tracing::warn!(%resource, error = %e, "poll refresh failed"),
            }
        }
    });
    PollHandle { resource, task }
}
