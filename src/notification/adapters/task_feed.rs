//! Task lifecycle service as the gate's task feed.

use async_trait::async_trait;
use mockable::Clock;

use crate::notification::ports::{PendingTaskFeed, PendingTaskFeedError, PendingTaskFeedResult};
use crate::session::SessionContext;
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskQuery, TaskRepository},
    services::{TaskLifecycleError, TaskLifecycleService},
};

#[async_trait]
impl<R, C> PendingTaskFeed for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    async fn open_tasks(&self, session: &SessionContext) -> PendingTaskFeedResult<Vec<Task>> {
        let query = TaskQuery::all().with_statuses(TaskStatus::AWAITING_WORK);
        self.list_visible(session, query)
            .await
            .map_err(PendingTaskFeedError::unavailable)
    }

    async fn task(
        &self,
        session: &SessionContext,
        task_id: TaskId,
    ) -> PendingTaskFeedResult<Option<Task>> {
        match self.find(session, task_id).await {
            Ok(task) => Ok(Some(task)),
            Err(TaskLifecycleError::NotFound(_) | TaskLifecycleError::NotAssigned { .. }) => {
                Ok(None)
            }
            Err(err) => Err(PendingTaskFeedError::unavailable(err)),
        }
    }
}
