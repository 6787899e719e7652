//! Adapter implementations of the notification ports.

pub mod file;
pub mod memory;
pub mod task_feed;
pub mod tracing_notifier;

pub use file::{FileMarkerStore, MARKER_FILE_NAME};
pub use memory::{InMemoryMarkerStore, RecordingNotifier};
pub use tracing_notifier::TracingNotifier;
