//! Notifier that writes notifications to the log.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use tracing::info;

use crate::notification::{
    domain::Notification,
    ports::{Notifier, NotifierError, NotifierResult, Permission},
};

/// Headless notifier emitting each notification as an `info` event.
///
/// A pending prompt is answered with [`Permission::Granted`] since there is
/// nobody to ask.
#[derive(Debug, Clone)]
pub struct TracingNotifier {
    permission: Arc<RwLock<Permission>>,
}

impl TracingNotifier {
    /// Creates a notifier in the given permission state.
    #[must_use]
    pub fn new(permission: Permission) -> Self {
        Self {
            permission: Arc::new(RwLock::new(permission)),
        }
    }

    fn current(&self) -> NotifierResult<Permission> {
        self.permission
            .read()
            .map(|guard| *guard)
            .map_err(|err| NotifierError::delivery(std::io::Error::other(err.to_string())))
    }
}

impl Default for TracingNotifier {
    fn default() -> Self {
        Self::new(Permission::Prompt)
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn permission(&self) -> NotifierResult<Permission> {
        self.current()
    }

    async fn request_permission(&self) -> NotifierResult<Permission> {
        let mut guard = self
            .permission
            .write()
            .map_err(|err| NotifierError::delivery(std::io::Error::other(err.to_string())))?;
        if *guard == Permission::Prompt {
            *guard = Permission::Granted;
        }
        Ok(*guard)
    }

    async fn send(&self, notification: &Notification) -> NotifierResult<()> {
        if self.current()? != Permission::Granted {
            return Err(NotifierError::NotPermitted);
        }
        info!(
            title = notification.title(),
            body = notification.body(),
            tag = notification.tag(),
            "notification"
        );
        Ok(())
    }
}
