//! Store-backed detection of new assignments.
//!
//! Another process (the HTTP server or a direct database write) may assign
//! tasks, so the in-process [`TaskEventBus`] of a long-running reminder never
//! sees those inserts. [`AssignmentWatcher`] polls the repository for the
//! watched identity's assignments and publishes [`TaskEvent::Assigned`] for
//! every task that was not assigned at the previous poll.

use super::events::{TaskEvent, TaskEventBus};
use crate::directory::domain::UserId;
use crate::task::{
    domain::TaskId,
    ports::{TaskQuery, TaskRepository, TaskRepositoryResult},
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Polls assignments of one identity and republishes new ones as events.
///
/// The first successful poll only records a baseline: assignments present at
/// startup are not announced.
pub struct AssignmentWatcher<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
    events: TaskEventBus,
    user_id: UserId,
    poll_interval: Duration,
    known: Option<HashSet<TaskId>>,
}

impl<R> AssignmentWatcher<R>
where
    R: TaskRepository,
{
    /// Creates a watcher publishing to `events` for `user_id`.
    #[must_use]
    pub const fn new(repository: Arc<R>, events: TaskEventBus, user_id: UserId) -> Self {
        Self {
            repository,
            events,
            user_id,
            poll_interval: DEFAULT_POLL_INTERVAL,
            known: None,
        }
    }

    /// Overrides the poll interval; values below one second are raised.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Returns the poll interval.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Reads the current assignments and publishes the new ones.
    ///
    /// Returns the number of events published. The first call only records
    /// the baseline and returns zero.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the lookup fails; the known set is
    /// left untouched so the next poll retries.
    pub async fn poll(&mut self) -> TaskRepositoryResult<usize> {
        let query = TaskQuery::all().assigned_to(self.user_id);
        let current: HashSet<TaskId> = self
            .repository
            .list(&query)
            .await?
            .iter()
            .map(|task| task.id())
            .collect();

        let Some(previous) = self.known.replace(current.clone()) else {
            debug!(user_id = %self.user_id, assignments = current.len(), "assignment baseline recorded");
            return Ok(0);
        };
        let mut fresh: Vec<TaskId> = current.difference(&previous).copied().collect();
        fresh.sort_by_key(ToString::to_string);
        for task_id in &fresh {
            self.events.publish(TaskEvent::Assigned {
                task_id: *task_id,
                user_id: self.user_id,
            });
        }
        Ok(fresh.len())
    }

    /// Polls until `shutdown` turns `true` or its sender is dropped.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(user_id = %self.user_id, "assignment watcher started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => match self.poll().await {
                    Ok(0) => {}
                    Ok(published) => {
                        info!(user_id = %self.user_id, published, "new assignments detected");
                    }
                    Err(err) => {
                        warn!(user_id = %self.user_id, error = %err, "assignment poll failed");
                    }
                },
            }
        }
        info!(user_id = %self.user_id, "assignment watcher stopped");
    }
}
