//! Port contracts used by the notification gate.

pub mod feed;
pub mod marker;
pub mod notifier;

pub use feed::{PendingTaskFeed, PendingTaskFeedError, PendingTaskFeedResult};
pub use marker::{MarkerStore, MarkerStoreError, MarkerStoreResult};
pub use notifier::{Notifier, NotifierError, NotifierResult, Permission};
