//! In-memory marker store and recording notifier.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use crate::notification::{
    domain::{HourBucket, Notification},
    ports::{
        MarkerStore, MarkerStoreError, MarkerStoreResult, Notifier, NotifierError,
        NotifierResult, Permission,
    },
};

/// Marker store that forgets its value when dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarkerStore {
    last: Arc<RwLock<Option<HourBucket>>>,
}

impl InMemoryMarkerStore {
    /// Creates an empty marker store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MarkerStore for InMemoryMarkerStore {
    async fn last_notified(&self) -> MarkerStoreResult<Option<HourBucket>> {
        let guard = self.last.read().map_err(|err| {
            MarkerStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(*guard)
    }

    async fn record(&self, bucket: HourBucket) -> MarkerStoreResult<()> {
        let mut guard = self.last.write().map_err(|err| {
            MarkerStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        *guard = Some(bucket);
        Ok(())
    }
}

#[derive(Debug)]
struct RecordingState {
    permission: Permission,
    answer: Permission,
    prompts: usize,
    sent: Vec<Notification>,
}

/// Notifier that keeps every delivered notification in memory.
///
/// Prompting moves a [`Permission::Prompt`] state to the configured answer.
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingNotifier {
    /// Creates a notifier in the given permission state that answers prompts
    /// with [`Permission::Granted`].
    #[must_use]
    pub fn new(permission: Permission) -> Self {
        Self {
            state: Arc::new(Mutex::new(RecordingState {
                permission,
                answer: Permission::Granted,
                prompts: 0,
                sent: Vec::new(),
            })),
        }
    }

    /// Creates a notifier that already holds permission.
    #[must_use]
    pub fn granted() -> Self {
        Self::new(Permission::Granted)
    }

    /// Sets the answer given when the user is prompted.
    #[must_use]
    pub fn answering(self, answer: Permission) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.answer = answer;
        }
        self
    }

    /// Returns every notification delivered so far.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Delivery`] when the internal lock is poisoned.
    pub fn sent(&self) -> NotifierResult<Vec<Notification>> {
        Ok(self.lock()?.sent.clone())
    }

    /// Returns how many times the user was prompted.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Delivery`] when the internal lock is poisoned.
    pub fn prompts(&self) -> NotifierResult<usize> {
        Ok(self.lock()?.prompts)
    }

    fn lock(&self) -> NotifierResult<MutexGuard<'_, RecordingState>> {
        self.state
            .lock()
            .map_err(|err| NotifierError::delivery(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn permission(&self) -> NotifierResult<Permission> {
        Ok(self.lock()?.permission)
    }

    async fn request_permission(&self) -> NotifierResult<Permission> {
        let mut state = self.lock()?;
        if state.permission == Permission::Prompt {
            state.prompts = state.prompts.saturating_add(1);
            state.permission = state.answer;
        }
        Ok(state.permission)
    }

    async fn send(&self, notification: &Notification) -> NotifierResult<()> {
        let mut state = self.lock()?;
        if state.permission != Permission::Granted {
            return Err(NotifierError::NotPermitted);
        }
        state.sent.push(notification.clone());
        Ok(())
    }
}
