//! Application services for task lifecycle orchestration.

mod events;
mod lifecycle;
mod watcher;

pub use events::{TaskEvent, TaskEventBus};
pub use lifecycle::{
    CancelTaskRequest, CreateTaskRequest, PostponeTaskRequest, TaskLifecycleError,
    TaskLifecycleResult, TaskLifecycleService,
};
pub use watcher::AssignmentWatcher;
