//! Business-hours gated reminders and assignment notifications.

use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::notification::{
    domain::{GateOutcome, GateSettings, HourBucket, Notification, RenderError},
    ports::{
        MarkerStore, MarkerStoreError, Notifier, NotifierError, PendingTaskFeed,
        PendingTaskFeedError, Permission,
    },
};
use crate::session::SessionContext;
use crate::task::{domain::TaskId, services::TaskEvent};

const MIN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
enum GateError {
    #[error(transparent)]
    Feed(#[from] PendingTaskFeedError),
    #[error(transparent)]
    Notifier(#[from] NotifierError),
    #[error(transparent)]
    Marker(#[from] MarkerStoreError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Decides when the signed-in identity is reminded of open work.
///
/// Every dependency failure is logged and swallowed: the gate degrades to
/// sending nothing rather than surfacing errors.
#[derive(Clone)]
pub struct NotificationGate<F, N, M, C>
where
    F: PendingTaskFeed,
    N: Notifier,
    M: MarkerStore,
    C: Clock + Send + Sync,
{
    feed: Arc<F>,
    notifier: Arc<N>,
    markers: Arc<M>,
    clock: Arc<C>,
    session: SessionContext,
    settings: GateSettings,
}

impl<F, N, M, C> NotificationGate<F, N, M, C>
where
    F: PendingTaskFeed,
    N: Notifier,
    M: MarkerStore,
    C: Clock + Send + Sync,
{
    /// Creates a gate for `session` with default settings.
    #[must_use]
    pub fn new(
        feed: Arc<F>,
        notifier: Arc<N>,
        markers: Arc<M>,
        clock: Arc<C>,
        session: SessionContext,
    ) -> Self {
        Self {
            feed,
            notifier,
            markers,
            clock,
            session,
            settings: GateSettings::default(),
        }
    }

    /// Replaces the gate settings.
    #[must_use]
    pub fn with_settings(mut self, settings: GateSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the gate settings.
    #[must_use]
    pub const fn settings(&self) -> &GateSettings {
        &self.settings
    }

    /// Runs one reminder check.
    ///
    /// Outside business hours nothing is queried. Otherwise at most one
    /// reminder is sent per local calendar hour, and the hour is recorded
    /// only once a reminder was actually delivered.
    pub async fn check_and_notify(&self) -> GateOutcome {
        let now = self.clock.utc();
        if !self.settings.permits(now) {
            debug!(user_id = %self.session.user_id(), "reminder skipped outside business hours");
            return GateOutcome::OutsideBusinessHours;
        }
        let bucket = HourBucket::from_local(self.settings.local_time(now));
        match self.remind(bucket).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(user_id = %self.session.user_id(), error = %err, "reminder check failed");
                GateOutcome::Failed
            }
        }
    }

    /// Notifies the identity of a new assignment.
    ///
    /// Events for other identities and status changes are ignored. Assignment
    /// notifications respect business hours but not the hourly marker.
    /// Returns `true` when a notification was delivered.
    pub async fn notify_assignment(&self, event: TaskEvent) -> bool {
        let TaskEvent::Assigned { task_id, user_id } = event else {
            return false;
        };
        if user_id != self.session.user_id() || !self.settings.permits(self.clock.utc()) {
            return false;
        }
        match self.announce(task_id).await {
            Ok(sent) => sent,
            Err(err) => {
                warn!(task_id = %task_id, error = %err, "assignment notification failed");
                false
            }
        }
    }

    /// Runs the reminder loop until `shutdown` turns `true`.
    ///
    /// Permission is requested once; without it the loop never starts. The
    /// first check runs after the initial delay and then once per interval.
    /// Assignment events are handled as they arrive. A closed event channel
    /// also ends the loop.
    pub async fn run(
        &self,
        mut events: broadcast::Receiver<TaskEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        match self.notifier.request_permission().await {
            Ok(Permission::Granted) => {}
            Ok(permission) => {
                info!(?permission, "notifications not permitted; reminders disabled");
                return;
            }
            Err(err) => {
                warn!(error = %err, "notification permission request failed");
                return;
            }
        }
        if *shutdown.borrow() {
            return;
        }

        let start = Instant::now() + self.settings.initial_delay();
        let mut ticker = tokio::time::interval_at(start, self.settings.interval().max(MIN_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let outcome = self.check_and_notify().await;
                    debug!(?outcome, "reminder check finished");
                }
                received = events.recv() => match received {
                    Ok(event) => {
                        self.notify_assignment(event).await;
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "task events dropped before delivery");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
        info!(user_id = %self.session.user_id(), "reminder loop stopped");
    }

    async fn remind(&self, bucket: HourBucket) -> Result<GateOutcome, GateError> {
        if self.markers.last_notified().await? == Some(bucket) {
            return Ok(GateOutcome::AlreadyNotifiedThisHour);
        }
        if self.notifier.permission().await? != Permission::Granted {
            return Ok(GateOutcome::PermissionNotGranted);
        }
        let tasks = self.feed.open_tasks(&self.session).await?;
        let Some(notification) = Notification::reminder(&tasks)? else {
            return Ok(GateOutcome::NothingPending);
        };
        self.notifier.send(&notification).await?;
        self.markers.record(bucket).await?;
        info!(user_id = %self.session.user_id(), pending = tasks.len(), hour = %bucket, "reminder sent");
        Ok(GateOutcome::Notified {
            pending: tasks.len(),
        })
    }

    async fn announce(&self, task_id: TaskId) -> Result<bool, GateError> {
        if self.notifier.permission().await? != Permission::Granted {
            return Ok(false);
        }
        let Some(task) = self.feed.task(&self.session, task_id).await? else {
            return Ok(false);
        };
        self.notifier.send(&Notification::assignment(&task)?).await?;
        info!(task_id = %task_id, user_id = %self.session.user_id(), "assignment notification sent");
        Ok(true)
    }
}
