//! Port for the device-level notification channel.

use crate::notification::domain::Notification;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Delivery permission granted by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    /// The user has not been asked yet.
    #[default]
    Prompt,
    /// Notifications may be shown.
    Granted,
    /// The user refused notifications.
    Denied,
}

/// Channel that shows notifications to the signed-in user.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Returns the current permission without prompting.
    async fn permission(&self) -> NotifierResult<Permission>;

    /// Prompts for permission when it has not been decided yet.
    ///
    /// An already granted or denied permission is returned unchanged.
    async fn request_permission(&self) -> NotifierResult<Permission>;

    /// Shows a notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::NotPermitted`] when permission is not granted.
    async fn send(&self, notification: &Notification) -> NotifierResult<()>;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    /// The channel cannot show notifications at all.
    #[error("notifications are not supported")]
    Unsupported,

    /// Permission was not granted.
    #[error("notification permission not granted")]
    NotPermitted,

    /// The notification could not be delivered.
    #[error("notification delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
    /// Wraps a delivery failure.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
